//! Result of a single CLI command.

use std::time::Duration;

/// Response from a command execution.
#[derive(Debug, Clone)]
pub struct Response {
    /// The command that was executed.
    pub command: String,

    /// Output with the command echo and trailing prompt removed.
    pub result: String,

    /// The prompt that ended the output.
    pub prompt: String,

    /// Mode the device reported after the command, if recognised.
    pub mode: Option<String>,

    /// Time taken to execute the command.
    pub elapsed: Duration,

    /// Failure string matched in the output, if any.
    pub failure_message: Option<String>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        self.failure_message.is_none()
    }

    /// Output lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.result.lines()
    }
}

impl std::fmt::Display for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.result)
    }
}
