//! Driver-level settings.

use std::time::Duration;

use crate::transport::HostKeyVerification;

/// Settings shared by every operation of a driver instance.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Vendor recorded on the discovered device.
    pub vendor: String,
    pub ssh_port: u16,
    pub snmp_port: u16,
    /// Connect and prompt timeout for CLI sessions.
    pub command_timeout: Duration,
    pub host_key_verification: HostKeyVerification,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            vendor: "VyOS".to_string(),
            ssh_port: 22,
            snmp_port: 161,
            command_timeout: Duration::from_secs(30),
            host_key_verification: HostKeyVerification::Disabled,
        }
    }
}

impl ShellConfig {
    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    pub fn with_ssh_port(mut self, port: u16) -> Self {
        self.ssh_port = port;
        self
    }

    pub fn with_snmp_port(mut self, port: u16) -> Self {
        self.snmp_port = port;
        self
    }

    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn with_host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }
}
