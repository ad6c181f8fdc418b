//! Error types for vyos-shell.

use std::io;
use thiserror::Error;

/// Main error type for vyos-shell operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// CLI channel errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// SNMP session and table errors
    #[error("SNMP error: {0}")]
    Snmp(#[from] SnmpError),

    /// Credential decryption errors
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Autoload result serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// SSH key error
    #[error("SSH key error: {0}")]
    Key(String),

    /// Host is not in known_hosts and strict checking is enabled
    #[error("Host key for {host}:{port} is not known")]
    HostKeyUnknown { host: String, port: u16 },

    /// Host key does not match the known_hosts entry
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Operation timed out
    #[error("Operation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// CLI channel errors (prompt matching, PTY reads).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Prompt was not seen in time
    #[error("Prompt not found within {0:?}")]
    PromptTimeout(std::time::Duration),

    /// Channel closed unexpectedly
    #[error("Channel closed")]
    Closed,

    /// Invalid regex pattern
    #[error("Invalid prompt pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// SNMP errors.
#[derive(Error, Debug)]
pub enum SnmpError {
    /// Could not create the UDP session
    #[error("Failed to open SNMP session to {host}: {source}")]
    SessionOpen {
        host: String,
        #[source]
        source: io::Error,
    },

    /// A GETBULK request failed
    #[error("SNMP request failed: {0}")]
    Request(#[from] snmp2::Error),

    /// The agent answered with a non-zero error-status
    #[error("Agent reported {status} at varbind {index}")]
    AgentError { status: String, index: u32 },

    /// MIB object name is not known to the resolver
    #[error("Unknown MIB object {module}::{object}")]
    UnknownMibObject { module: String, object: String },

    /// OID could not be built or parsed
    #[error("Invalid OID: {0}")]
    InvalidOid(String),

    /// Varbind under the table does not carry a column and an index
    #[error("Malformed varbind {oid}: {reason}")]
    MalformedResponse { oid: String, reason: String },
}

/// Credential store errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    /// The store refused or failed to decrypt the value
    #[error("Failed to decrypt '{attribute}': {message}")]
    Decrypt { attribute: String, message: String },
}

/// Driver layer errors (dispatch, context, command execution).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Operation name is not part of the driver contract
    #[error("Unknown operation '{name}'")]
    UnknownOperation { name: String },

    /// Resource attribute missing from the command context
    #[error("Missing resource attribute '{name}'")]
    MissingAttribute { name: String },

    /// Command output matched a failure pattern
    #[error("Command '{command}' failed: {message}")]
    CommandFailed { command: String, message: String },

    /// Invalid configuration in a builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type alias using vyos-shell's Error.
pub type Result<T> = std::result::Result<T, Error>;
