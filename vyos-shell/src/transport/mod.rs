//! SSH transport layer wrapping russh.
//!
//! Connection setup, authentication, host key policy and the PTY shell
//! channel that the CLI session reads prompts from.

pub mod config;
mod ssh;

pub use config::{AuthMethod, HostKeyVerification, SshConfig};
pub use ssh::SshTransport;
