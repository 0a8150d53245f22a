//! Timing and completion thresholds for the command executor.

use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::channel::PromptMarkers;
use crate::error::ConfigError;

/// Tunables for driving one command through the interactive shell.
///
/// The device never signals the end of a command's output, so the executor
/// decides completion from these thresholds. Lower values poll faster but
/// risk truncating slow reports; higher values add latency to every command.
///
/// Durations are given in milliseconds when deserialized:
///
/// ```rust
/// use zyxssh::ExecutorConfig;
///
/// let config: ExecutorConfig = serde_json::from_str(r#"{
///     "post_send_delay": 3000,
///     "max_idle_attempts": 20
/// }"#).unwrap();
/// assert_eq!(config.max_idle_attempts, 20);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Pause after connecting before draining the login banner.
    #[serde(deserialize_with = "millis")]
    pub banner_delay: Duration,

    /// Pause after sending the command before the first read.
    #[serde(deserialize_with = "millis")]
    pub post_send_delay: Duration,

    /// Pause after a read that returned data.
    #[serde(deserialize_with = "millis")]
    pub chunk_delay: Duration,

    /// Pause after a read that returned nothing.
    #[serde(deserialize_with = "millis")]
    pub idle_delay: Duration,

    /// Output is complete once a read comes back empty and more than this
    /// many bytes have accumulated.
    pub min_output_len: usize,

    /// Consecutive empty reads tolerated before giving up on more output.
    pub max_idle_attempts: u32,

    /// Command sent to leave the shell.
    pub exit_command: String,

    /// Pause after sending the exit command, before closing.
    #[serde(deserialize_with = "millis")]
    pub exit_delay: Duration,

    /// Pause between the commands of a control sequence.
    #[serde(deserialize_with = "millis")]
    pub sequence_delay: Duration,

    /// Prompt markers removed from the output.
    pub prompts: PromptMarkers,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            banner_delay: Duration::from_secs(1),
            post_send_delay: Duration::from_secs(2),
            chunk_delay: Duration::from_millis(200),
            idle_delay: Duration::from_millis(300),
            min_output_len: 50,
            max_idle_attempts: 15,
            exit_command: "exit".to_string(),
            exit_delay: Duration::from_millis(500),
            sequence_delay: Duration::from_millis(500),
            prompts: PromptMarkers::default(),
        }
    }
}

impl ExecutorConfig {
    /// A config with every pause set to zero. Useful against simulated shells.
    pub fn immediate() -> Self {
        Self {
            banner_delay: Duration::ZERO,
            post_send_delay: Duration::ZERO,
            chunk_delay: Duration::ZERO,
            idle_delay: Duration::ZERO,
            exit_delay: Duration::ZERO,
            sequence_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Check that the thresholds can terminate and that the exit command is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_idle_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "max_idle_attempts",
                message: "must be at least 1".to_string(),
            });
        }
        if self.exit_command.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "exit_command",
                message: "must not be empty".to_string(),
            });
        }
        if self.prompts.iter().any(str::is_empty) {
            return Err(ConfigError::Invalid {
                field: "prompts",
                message: "an empty marker would match every line".to_string(),
            });
        }
        Ok(())
    }

    /// Worst-case time spent waiting on a command that never produces output.
    pub fn idle_budget(&self) -> Duration {
        self.banner_delay + self.post_send_delay + self.idle_delay * self.max_idle_attempts
    }
}

fn millis<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}
