//! SNMP session parameters.

use secrecy::SecretString;

/// Parameters for an SNMPv2c session.
#[derive(Debug)]
pub struct SnmpParameters {
    /// Agent host (hostname or IP address).
    pub host: String,

    /// Agent UDP port (default: 161).
    pub port: u16,

    /// Read community, already decrypted.
    pub community: SecretString,

    /// GETBULK max-repetitions (default: 10).
    pub max_repetitions: u32,
}

impl SnmpParameters {
    /// SNMPv2c parameters with default port and repetitions.
    pub fn v2c(host: impl Into<String>, community: SecretString) -> Self {
        Self {
            host: host.into(),
            port: 161,
            community,
            max_repetitions: 10,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_max_repetitions(mut self, max_repetitions: u32) -> Self {
        self.max_repetitions = max_repetitions.max(1);
        self
    }

    /// `host:port` form used in log lines and errors.
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
