//! Settings for the SSH leg of a CLI session.
//!
//! Built by [`CliSessionBuilder`](crate::cli::CliSessionBuilder); the driver
//! fills it from the resource address, the `User`/`Password` attributes and
//! its [`ShellConfig`](crate::shell::ShellConfig).

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

/// How the router's host key is checked against known_hosts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HostKeyVerification {
    /// Only routers already listed in known_hosts are accepted.
    Strict,

    /// First contact records the key; a later mismatch is refused.
    #[default]
    AcceptNew,

    /// known_hosts is neither read nor written.
    Disabled,
}

/// Credentials presented to the router.
#[derive(Debug)]
pub enum AuthMethod {
    /// Decrypted `Password` attribute.
    Password(SecretString),

    /// Key file on the driver host, optionally passphrase protected.
    PrivateKey {
        path: PathBuf,
        passphrase: Option<SecretString>,
    },
}

/// Where and how to open the SSH shell.
#[derive(Debug)]
pub struct SshConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub auth: AuthMethod,

    /// Bounds the TCP/SSH handshake and every wait for a prompt.
    pub timeout: Duration,

    /// PTY columns. Wide enough that VyOS does not wrap table output.
    pub terminal_width: u32,
    pub terminal_height: u32,

    pub host_key_verification: HostKeyVerification,

    /// Alternate known_hosts file; `~/.ssh/known_hosts` when unset.
    pub known_hosts_path: Option<PathBuf>,
}

impl SshConfig {
    /// `host:port`, as shown in logs.
    pub fn target(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_and_redacted_password() {
        let config = SshConfig {
            host: "192.0.2.10".to_string(),
            port: 2222,
            username: "vyos".to_string(),
            auth: AuthMethod::Password(SecretString::from("hunter2")),
            timeout: Duration::from_secs(5),
            terminal_width: 511,
            terminal_height: 24,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        };

        assert_eq!(config.target(), "192.0.2.10:2222");
        assert_eq!(config.host_key_verification, HostKeyVerification::AcceptNew);
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
