//! In-memory collaborators for unit tests.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::cli::{CliConnector, CliService, Response};
use crate::error::{CredentialError, Result, SnmpError, TransportError};
use crate::shell::CredentialStore;
use crate::snmp::{MibObject, SnmpConnector, SnmpParameters, SnmpRow, SnmpService, SnmpTable, SnmpValue};
use crate::transport::SshConfig;

/// Build an ifXTable where `None` stands for a row without `ifName`.
pub(crate) fn if_x_table(names: &[Option<&str>]) -> SnmpTable {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let row: SnmpRow = name
                .map(|n| ("ifName", SnmpValue::OctetString(n.as_bytes().to_vec())))
                .into_iter()
                .collect();
            ((i + 1).to_string(), row)
        })
        .collect()
}

#[derive(Clone)]
pub(crate) enum SnmpBehavior {
    Table(SnmpTable),
    OpenFails,
    FetchFails,
}

/// SNMP connector that serves a fixed table and records what it saw.
#[derive(Clone)]
pub(crate) struct FakeSnmp {
    behavior: SnmpBehavior,
    pub closed: Arc<AtomicBool>,
    pub community: Arc<Mutex<Option<String>>>,
    pub requested: Arc<Mutex<Option<MibObject>>>,
}

impl FakeSnmp {
    pub fn new(behavior: SnmpBehavior) -> Self {
        Self {
            behavior,
            closed: Arc::new(AtomicBool::new(false)),
            community: Arc::new(Mutex::new(None)),
            requested: Arc::new(Mutex::new(None)),
        }
    }

    pub fn serving(table: SnmpTable) -> Self {
        Self::new(SnmpBehavior::Table(table))
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn seen_community(&self) -> Option<String> {
        self.community.lock().unwrap().clone()
    }
}

pub(crate) struct FakeSnmpSession {
    table: Option<SnmpTable>,
    closed: Arc<AtomicBool>,
    requested: Arc<Mutex<Option<MibObject>>>,
}

impl SnmpConnector for FakeSnmp {
    type Session = FakeSnmpSession;

    async fn open(&self, params: &SnmpParameters) -> Result<FakeSnmpSession> {
        *self.community.lock().unwrap() = Some(params.community.expose_secret().to_string());
        let table = match &self.behavior {
            SnmpBehavior::OpenFails => {
                return Err(SnmpError::SessionOpen {
                    host: params.target(),
                    source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
                }
                .into());
            }
            SnmpBehavior::FetchFails => None,
            SnmpBehavior::Table(table) => Some(table.clone()),
        };
        Ok(FakeSnmpSession {
            table,
            closed: self.closed.clone(),
            requested: self.requested.clone(),
        })
    }
}

impl SnmpService for FakeSnmpSession {
    async fn get_table(&mut self, object: &MibObject) -> Result<SnmpTable> {
        *self.requested.lock().unwrap() = Some(object.clone());
        self.table.clone().ok_or_else(|| {
            SnmpError::MalformedResponse {
                oid: "1.3.6.1.2.1.31.1.1.1".to_string(),
                reason: "truncated".to_string(),
            }
            .into()
        })
    }

    async fn close(self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// CLI connector answering every command with the same output.
#[derive(Clone)]
pub(crate) struct FakeCli {
    output: String,
    refuse: bool,
    pub commands: Arc<Mutex<Vec<String>>>,
    pub login: Arc<Mutex<Option<(String, String)>>>,
    pub closed: Arc<AtomicBool>,
}

impl FakeCli {
    pub fn answering(output: &str) -> Self {
        Self {
            output: output.to_string(),
            refuse: false,
            commands: Arc::new(Mutex::new(Vec::new())),
            login: Arc::new(Mutex::new(None)),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::answering("")
        }
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

pub(crate) struct FakeCliSession {
    cli: FakeCli,
}

impl CliConnector for FakeCli {
    type Session = FakeCliSession;

    async fn open(&self, config: SshConfig) -> Result<FakeCliSession> {
        if self.refuse {
            return Err(TransportError::AuthenticationFailed {
                user: config.username,
            }
            .into());
        }
        let password = match config.auth {
            crate::transport::AuthMethod::Password(ref p) => p.expose_secret().to_string(),
            crate::transport::AuthMethod::PrivateKey { .. } => String::new(),
        };
        *self.login.lock().unwrap() = Some((config.username.clone(), password));
        Ok(FakeCliSession { cli: self.clone() })
    }
}

impl CliService for FakeCliSession {
    async fn send_command(&mut self, command: &str) -> Result<Response> {
        self.cli.commands.lock().unwrap().push(command.to_string());
        let failure_message = self
            .cli
            .output
            .contains("Invalid command")
            .then(|| "Invalid command".to_string());
        Ok(Response {
            command: command.to_string(),
            result: self.cli.output.clone(),
            prompt: "vyos@vyos:~$".to_string(),
            mode: Some("operational".to_string()),
            elapsed: Duration::from_millis(5),
            failure_message,
        })
    }

    async fn close(self) -> Result<()> {
        self.cli.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Credential store where the ciphertext is the plaintext prefixed with `enc:`.
pub(crate) struct PrefixCredentials;

impl CredentialStore for PrefixCredentials {
    async fn decrypt(&self, attribute: &str, encrypted: &str) -> Result<SecretString> {
        encrypted
            .strip_prefix("enc:")
            .map(|plain| SecretString::from(plain.to_string()))
            .ok_or_else(|| {
                CredentialError::Decrypt {
                    attribute: attribute.to_string(),
                    message: "not an encrypted value".to_string(),
                }
                .into()
            })
    }
}
