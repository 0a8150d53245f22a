//! Configuration-change sequences.
//!
//! A [`ControlSequence`] is an ordered list of literal CLI commands. Each
//! command runs on its own session through the executor, paced by
//! [`ExecutorConfig::sequence_delay`](crate::ExecutorConfig::sequence_delay).
//! The first command that cannot be delivered aborts the rest; nothing is
//! rolled back; unsaved changes are dropped by the device when its
//! configuration session is abandoned.

use log::{debug, info, warn};
use tokio::time::sleep;

use crate::driver::CommandExecutor;
use crate::error::{ControlError, Result};
use crate::model::RadioSlot;
use crate::transport::Connector;

/// An ordered list of commands applied as one change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlSequence {
    /// Short label used in logs and errors.
    pub name: String,
    /// Commands, sent in order.
    pub commands: Vec<String>,
}

impl ControlSequence {
    /// Create a sequence from any list of commands.
    pub fn new<I, S>(name: impl Into<String>, commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            commands: commands.into_iter().map(Into::into).collect(),
        }
    }

    /// Wrap `body` in `configure terminal` / `exit` / `write`.
    fn configure<const N: usize>(name: String, body: [String; N]) -> Self {
        let mut commands = Vec::with_capacity(N + 3);
        commands.push("configure terminal".to_string());
        commands.extend(body);
        commands.push("exit".to_string());
        commands.push("write".to_string());
        Self { name, commands }
    }

    /// Turn the SSID schedule of `profile` off (`enabled == true`, SSID always
    /// broadcast) or back on (`enabled == false`, SSID follows its schedule).
    pub fn schedule_override(profile: &str, enabled: bool) -> Self {
        let directive = if enabled { "no ssid-schedule" } else { "ssid-schedule" };
        Self::configure(
            format!("schedule-override {} {}", profile, on_off(enabled)),
            [format!("wlan-ssid-profile {}", profile), directive.to_string()],
        )
    }

    /// Activate or deactivate a radio slot.
    pub fn radio(slot: RadioSlot, enabled: bool) -> Self {
        let directive = if enabled { "activate" } else { "no activate" };
        Self::configure(
            format!("radio slot{} {}", slot.number(), on_off(enabled)),
            [format!("wlan slot{}", slot.number()), directive.to_string()],
        )
    }

    /// Reboot the device.
    pub fn reboot() -> Self {
        Self::new("reboot", ["reboot"])
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

/// Run `sequence` one command at a time.
///
/// Returns [`ControlError::SequenceAborted`] for the first command the
/// executor could not deliver. Commands after it are not sent.
pub async fn run_sequence<C: Connector>(
    executor: &CommandExecutor<C>,
    sequence: &ControlSequence,
) -> Result<()> {
    let pacing = executor.config().sequence_delay;
    info!("Running '{}' ({} commands)", sequence.name, sequence.commands.len());

    for (step, command) in sequence.commands.iter().enumerate() {
        if step > 0 {
            sleep(pacing).await;
        }

        let result = executor.execute(command).await;
        if !result.succeeded {
            let reason = result
                .failure_message
                .unwrap_or_else(|| "command not delivered".to_string());
            warn!(
                "'{}' aborted at step {} ('{}'); {} command(s) skipped",
                sequence.name,
                step + 1,
                command,
                sequence.commands.len() - step - 1
            );
            return Err(ControlError::SequenceAborted {
                sequence: sequence.name.clone(),
                step: step + 1,
                command: command.clone(),
                reason,
            }
            .into());
        }
        debug!("'{}' step {}: '{}' sent", sequence.name, step + 1, command);
    }

    info!("'{}' applied", sequence.name);
    Ok(())
}
