//! Interactive CLI layer on top of the SSH transport.
//!
//! Sessions wait for platform prompts, strip the command echo from the
//! output and flag responses that contain a platform failure string.

mod buffer;
pub mod platform;
mod response;
mod session;

pub use buffer::PromptBuffer;
pub use platform::{CommandMode, Platform};
pub use response::Response;
pub use session::{CliConnector, CliService, CliSessionBuilder, SshCli, SshCliSession};
