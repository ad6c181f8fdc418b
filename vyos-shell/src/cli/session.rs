//! Prompt-driven CLI sessions over SSH.

use std::future::Future;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use regex::bytes::Regex;
use secrecy::SecretString;

use super::platform::{self, Platform};
use super::response::Response;
use crate::error::{DriverError, Result};
use crate::transport::{AuthMethod, HostKeyVerification, SshConfig, SshTransport};

/// An open CLI session that accepts commands.
pub trait CliService: Send {
    /// Send a command and wait for the next prompt.
    fn send_command(&mut self, command: &str) -> impl Future<Output = Result<Response>> + Send;

    /// Close the session.
    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

/// Opens CLI sessions.
pub trait CliConnector: Send + Sync {
    type Session: CliService;

    fn open(&self, config: SshConfig) -> impl Future<Output = Result<Self::Session>> + Send;
}

/// Connector producing SSH-backed sessions for one platform.
#[derive(Debug, Clone)]
pub struct SshCli {
    platform: Platform,
}

impl SshCli {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    /// Connector for VyOS devices.
    pub fn vyos() -> Result<Self> {
        let platform = platform::vyos::platform().map_err(crate::error::ChannelError::from)?;
        Ok(Self::new(platform))
    }
}

impl CliConnector for SshCli {
    type Session = SshCliSession;

    async fn open(&self, config: SshConfig) -> Result<SshCliSession> {
        SshCliSession::open(config, self.platform.clone()).await
    }
}

/// CLI session over an SSH PTY shell.
pub struct SshCliSession {
    transport: SshTransport,
    platform: Platform,
    timeout: Duration,
    current_mode: Option<String>,
}

impl SshCliSession {
    /// Connect, wait for the first prompt and run the platform's setup commands.
    pub async fn open(config: SshConfig, platform: Platform) -> Result<Self> {
        info!("Opening CLI session to {} as {}", config.target(), config.username);
        let mut transport = SshTransport::connect(&config).await?;

        let banner = transport
            .read_until_prompt(platform.prompt_pattern(), config.timeout)
            .await?;
        let banner = String::from_utf8_lossy(&banner);
        let current_mode = find_prompt(&banner, platform.prompt_pattern())
            .and_then(|start| platform.mode_for_prompt(banner[start..].trim()))
            .map(|mode| mode.name.clone());
        debug!("Initial mode: {:?}", current_mode);

        let mut session = Self {
            transport,
            platform,
            timeout: config.timeout,
            current_mode,
        };

        for command in session.platform.on_open_commands.clone() {
            session.send_command(&command).await?;
        }

        Ok(session)
    }

    /// Mode reported by the most recent prompt.
    pub fn current_mode(&self) -> Option<&str> {
        self.current_mode.as_deref()
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    pub fn is_alive(&self) -> bool {
        self.transport.is_alive()
    }
}

impl CliService for SshCliSession {
    async fn send_command(&mut self, command: &str) -> Result<Response> {
        let start = Instant::now();
        debug!("Sending command: {}", command);

        self.transport.send_line(command).await?;
        let data = self
            .transport
            .read_until_prompt(self.platform.prompt_pattern(), self.timeout)
            .await?;
        let raw = String::from_utf8_lossy(&data);

        let prompt_start = find_prompt(&raw, self.platform.prompt_pattern()).unwrap_or(raw.len());
        let prompt = raw[prompt_start..].trim().to_string();
        let mode = self.platform.mode_for_prompt(&prompt).map(|m| m.name.clone());
        if mode.is_some() {
            self.current_mode = mode.clone();
        }

        let result = normalize_output(&raw[..prompt_start], command);
        let failure_message = self.platform.detect_failure(&result).map(str::to_string);
        if let Some(ref failure) = failure_message {
            warn!("Command '{}' matched failure pattern '{}'", command, failure);
        }

        Ok(Response {
            command: command.to_string(),
            result,
            prompt,
            mode,
            elapsed: start.elapsed(),
            failure_message,
        })
    }

    async fn close(self) -> Result<()> {
        debug!("Closing CLI session");
        self.transport.close().await
    }
}

/// Offset of the last prompt in `output`.
fn find_prompt(output: &str, prompt: &Regex) -> Option<usize> {
    prompt.find_iter(output.as_bytes()).last().map(|m| m.start())
}

/// Drop the echoed command line and normalise line endings.
fn normalize_output(body: &str, command: &str) -> String {
    let body = body.trim_start_matches(['\r', '\n']);

    let body = match memchr::memchr(b'\n', body.as_bytes()) {
        Some(eol) if body[..eol].trim_end().ends_with(command) => &body[eol + 1..],
        None if body.trim_end().ends_with(command) => "",
        _ => body,
    };

    body.replace("\r\n", "\n")
        .trim_end_matches(['\r', '\n', ' '])
        .to_string()
}

/// Builder for [`SshConfig`].
///
/// # Example
///
/// ```rust,no_run
/// use vyos_shell::cli::{CliConnector, CliService, CliSessionBuilder, SshCli};
///
/// # async fn example() -> Result<(), vyos_shell::Error> {
/// let config = CliSessionBuilder::new("192.0.2.10")
///     .username("vyos")
///     .password("secret")
///     .build()?;
/// let mut session = SshCli::vyos()?.open(config).await?;
/// let response = session.send_command("show interfaces").await?;
/// println!("{}", response);
/// session.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct CliSessionBuilder {
    host: String,
    port: u16,
    username: Option<String>,
    auth: Option<AuthMethod>,
    timeout: Duration,
    terminal_width: u32,
    terminal_height: u32,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
}

impl CliSessionBuilder {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: None,
            auth: None,
            timeout: Duration::from_secs(30),
            terminal_width: 511,
            terminal_height: 24,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.auth = Some(AuthMethod::Password(SecretString::from(password.into())));
        self
    }

    /// Use an already protected password.
    pub fn secret_password(mut self, password: SecretString) -> Self {
        self.auth = Some(AuthMethod::Password(password));
        self
    }

    pub fn private_key(mut self, key_path: impl Into<PathBuf>) -> Self {
        self.auth = Some(AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: None,
        });
        self
    }

    pub fn private_key_with_passphrase(
        mut self,
        key_path: impl Into<PathBuf>,
        passphrase: impl Into<String>,
    ) -> Self {
        self.auth = Some(AuthMethod::PrivateKey {
            path: key_path.into(),
            passphrase: Some(SecretString::from(passphrase.into())),
        });
        self
    }

    /// Connect and per-command prompt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    pub fn known_hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Validate and produce the connection configuration.
    pub fn build(self) -> Result<SshConfig> {
        let username = self.username.ok_or_else(|| DriverError::InvalidConfig {
            message: "Username is required".to_string(),
        })?;
        let auth = self.auth.ok_or_else(|| DriverError::InvalidConfig {
            message: "A password or private key is required".to_string(),
        })?;
        if self.host.is_empty() {
            return Err(DriverError::InvalidConfig {
                message: "Host is required".to_string(),
            }
            .into());
        }

        Ok(SshConfig {
            host: self.host,
            port: self.port,
            username,
            auth,
            timeout: self.timeout,
            terminal_width: self.terminal_width,
            terminal_height: self.terminal_height,
            host_key_verification: self.host_key_verification,
            known_hosts_path: self.known_hosts_path,
        })
    }
}
