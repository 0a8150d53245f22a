//! Result type for a single executed command.

use std::time::Duration;

/// Outcome of running one command through the executor.
///
/// The executor never returns an error: transport failures are reported
/// here with `succeeded == false` and no output.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The command that was executed.
    pub command: String,

    /// Cleaned output (prompts, echo and blank edges removed).
    /// `None` when the command could not be run.
    pub raw_output: Option<String>,

    /// Whether the command was sent and the session torn down normally.
    pub succeeded: bool,

    /// The accumulation loop hit its idle ceiling without collecting
    /// enough output to call the command complete.
    pub idle_ceiling_reached: bool,

    /// Time taken from connecting to closing.
    pub elapsed: Duration,

    /// Why the command failed. Also set on a completed command that hit the
    /// idle ceiling without producing any output.
    pub failure_message: Option<String>,
}

impl CommandResult {
    /// Create a result for a command that ran to completion.
    pub fn completed(
        command: impl Into<String>,
        output: impl Into<String>,
        idle_ceiling_reached: bool,
        elapsed: Duration,
    ) -> Self {
        Self {
            command: command.into(),
            raw_output: Some(output.into()),
            succeeded: true,
            idle_ceiling_reached,
            elapsed,
            failure_message: None,
        }
    }

    /// Create a result for a command that failed at the transport level.
    pub fn failed(
        command: impl Into<String>,
        elapsed: Duration,
        failure_message: impl Into<String>,
    ) -> Self {
        Self {
            command: command.into(),
            raw_output: None,
            succeeded: false,
            idle_ceiling_reached: false,
            elapsed,
            failure_message: Some(failure_message.into()),
        }
    }

    /// Non-empty output, if any. Parsers are only fed from this.
    pub fn output(&self) -> Option<&str> {
        self.raw_output.as_deref().filter(|text| !text.is_empty())
    }

    /// Get the output lines as an iterator.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.raw_output.as_deref().unwrap_or_default().lines()
    }
}

impl std::fmt::Display for CommandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw_output.as_deref().unwrap_or_default())
    }
}
