//! Single-command executor for prompt-based shells without output framing.
//!
//! Each call to [`CommandExecutor::execute`] walks this state machine on a
//! session of its own:
//!
//! ```text
//! Connecting ─► DrainingBanner ─► Sent ─► Accumulating ─► Terminating ─► Closed
//!     │               │             │           │
//!     └───────────────┴─────────────┴───────────┴──────► Failed
//! ```
//!
//! Completion of `Accumulating` is decided heuristically: an empty read after
//! more than `min_output_len` bytes ends the command, and `max_idle_attempts`
//! consecutive empty reads end it regardless.

use std::fmt;
use std::time::Instant;

use log::{debug, trace, warn};
use tokio::time::sleep;

use super::config::ExecutorConfig;
use super::response::CommandResult;
use crate::channel::{OutputBuffer, clean_output};
use crate::error::{ChannelError, Error, ExecutorError, Result};
use crate::transport::{Connector, ShellSession};

/// Executor state, used for tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecState {
    Connecting,
    DrainingBanner,
    Sent,
    Accumulating,
    Terminating,
    Closed,
    Failed,
}

impl fmt::Display for ExecState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecState::Connecting => "CONNECTING",
            ExecState::DrainingBanner => "DRAINING_BANNER",
            ExecState::Sent => "SENT",
            ExecState::Accumulating => "ACCUMULATING",
            ExecState::Terminating => "TERMINATING",
            ExecState::Closed => "CLOSED",
            ExecState::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// Output collected by the accumulation loop.
struct Capture {
    buffer: OutputBuffer,
    timeout: Option<ExecutorError>,
}

/// Runs commands one session at a time through a [`Connector`].
pub struct CommandExecutor<C> {
    connector: C,
    config: ExecutorConfig,
}

impl<C: Connector> CommandExecutor<C> {
    /// Create an executor. Thresholds are not validated here; use
    /// [`AccessPointBuilder`](crate::AccessPointBuilder) for a checked setup.
    pub fn new(connector: C, config: ExecutorConfig) -> Self {
        Self { connector, config }
    }

    /// Get the executor configuration.
    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Get the underlying connector.
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Run one command on a fresh session and return its cleaned output.
    ///
    /// Never fails: connection or channel errors produce a result with
    /// `succeeded == false`. The session is always closed before returning.
    pub async fn execute(&self, command: &str) -> CommandResult {
        let start = Instant::now();
        let target = self.connector.target();
        self.enter(&target, command, ExecState::Connecting);

        let mut session = match self.connector.open().await {
            Ok(session) => session,
            Err(e) => {
                self.enter(&target, command, ExecState::Failed);
                warn!("{}: could not open session for '{}': {}", target, command, e);
                return CommandResult::failed(command, start.elapsed(), e.to_string());
            }
        };

        match self.drive(&mut session, &target, command).await {
            Ok(capture) => {
                self.terminate(session, &target, command).await;
                let raw = capture.buffer.into_string_lossy();
                let cleaned = clean_output(&raw, command, &self.config.prompts);
                debug!(
                    "{}: '{}' returned {} characters in {:?}",
                    target,
                    command,
                    cleaned.len(),
                    start.elapsed()
                );
                let empty = cleaned.is_empty();
                let mut result = CommandResult::completed(
                    command,
                    cleaned,
                    capture.timeout.is_some(),
                    start.elapsed(),
                );
                if let Some(timeout) = capture.timeout.filter(|_| empty) {
                    result.failure_message = Some(timeout.to_string());
                }
                result
            }
            Err(e) => {
                self.enter(&target, command, ExecState::Failed);
                warn!("{}: command '{}' failed: {}", target, command, e);
                if let Err(close_err) = session.close().await {
                    trace!("{}: forced close failed: {}", target, close_err);
                }
                CommandResult::failed(command, start.elapsed(), e.to_string())
            }
        }
    }

    /// Drain the banner, send the command and accumulate its output.
    async fn drive(&self, session: &mut C::Session, target: &str, command: &str) -> Result<Capture> {
        self.enter(target, command, ExecState::DrainingBanner);
        sleep(self.config.banner_delay).await;
        let banner = session.read_available()?;
        trace!("{}: discarded {} banner bytes", target, banner.len());

        session.send(&format!("{}\n", command)).await?;
        self.enter(target, command, ExecState::Sent);
        sleep(self.config.post_send_delay).await;

        self.enter(target, command, ExecState::Accumulating);
        self.accumulate(session, target, command).await
    }

    async fn accumulate(
        &self,
        session: &mut C::Session,
        target: &str,
        command: &str,
    ) -> Result<Capture> {
        let mut buffer = OutputBuffer::default();
        let mut idle_attempts = 0u32;
        let mut timeout = None;

        loop {
            let chunk = match session.read_available() {
                Ok(chunk) => chunk,
                Err(Error::Channel(ChannelError::Closed)) => {
                    debug!("{}: shell closed while reading '{}'", target, command);
                    break;
                }
                Err(e) => return Err(e),
            };

            if !chunk.is_empty() {
                buffer.extend(&chunk);
                idle_attempts = 0;
                sleep(self.config.chunk_delay).await;
                continue;
            }

            if buffer.len() > self.config.min_output_len {
                break;
            }

            if idle_attempts >= self.config.max_idle_attempts {
                let err = ExecutorError::CommandTimeout {
                    command: command.to_string(),
                    attempts: idle_attempts,
                    received: buffer.len(),
                };
                debug!("{}: {}", target, err);
                timeout = Some(err);
                break;
            }

            idle_attempts += 1;
            sleep(self.config.idle_delay).await;
        }

        Ok(Capture { buffer, timeout })
    }

    /// Leave the shell and close the connection. Output is already captured,
    /// so failures here are only logged.
    async fn terminate(&self, mut session: C::Session, target: &str, command: &str) {
        self.enter(target, command, ExecState::Terminating);
        if let Err(e) = session
            .send(&format!("{}\n", self.config.exit_command))
            .await
        {
            debug!("{}: exit after '{}' not delivered: {}", target, command, e);
        }
        sleep(self.config.exit_delay).await;

        if let Err(e) = session.close().await {
            debug!("{}: close after '{}' failed: {}", target, command, e);
        }
        self.enter(target, command, ExecState::Closed);
    }

    fn enter(&self, target: &str, command: &str, state: ExecState) {
        trace!("{}: [{}] -> {}", target, command, state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::ScriptedConnector;

    const VERSION_REPLY: &str = "Zyxel Communications Corp.\r\n\
        model                  : NWA50AX\r\n\
        firmware version       : V7.10(ABYW.3)\r\n";

    fn executor(connector: ScriptedConnector) -> CommandExecutor<ScriptedConnector> {
        CommandExecutor::new(connector, ExecutorConfig::immediate())
    }

    #[tokio::test]
    async fn test_execute_cleans_output() {
        let connector = ScriptedConnector::new().reply("show version", VERSION_REPLY);
        let log = connector.sent_log();
        let exec = executor(connector);

        let result = exec.execute("show version").await;

        assert!(result.succeeded);
        assert!(!result.idle_ceiling_reached);
        assert_eq!(
            result.output(),
            Some(
                "Zyxel Communications Corp.\n\
                 model                  : NWA50AX\n\
                 firmware version       : V7.10(ABYW.3)"
            )
        );
        assert_eq!(*log.lock().unwrap(), vec!["show version", "exit"]);
    }

    #[tokio::test]
    async fn test_silent_command_stops_at_idle_ceiling() {
        let connector = ScriptedConnector::new().silent();
        let exec = executor(connector);

        let result = exec.execute("show wlan all").await;

        assert!(result.succeeded);
        assert!(result.idle_ceiling_reached);
        assert_eq!(result.output(), None);
        let message = result.failure_message.unwrap();
        assert!(message.contains("show wlan all"), "{message}");
    }

    #[tokio::test]
    async fn test_short_output_waits_for_ceiling_but_is_kept() {
        let connector = ScriptedConnector::new().reply("show mem status", "memory usage: 41%\r\n");
        let exec = executor(connector);

        let result = exec.execute("show mem status").await;

        assert!(result.succeeded);
        assert!(result.idle_ceiling_reached);
        assert_eq!(result.output(), Some("memory usage: 41%"));
        assert!(result.failure_message.is_none());
    }

    #[tokio::test]
    async fn test_idle_counter_resets_on_data() {
        // 10 empty reads before every chunk: below the ceiling of 15 each
        // time, but 30 in total across echo, body and prompt
        let connector = ScriptedConnector::new()
            .reply("show mem status", "memory usage: 41%\r\nfree: 59%\r\n")
            .idle_gap(10);
        let exec = executor(connector);
        assert_eq!(exec.config().max_idle_attempts, 15);

        let result = exec.execute("show mem status").await;

        assert!(result.succeeded);
        assert!(!result.idle_ceiling_reached);
        assert_eq!(result.output(), Some("memory usage: 41%\nfree: 59%"));
    }

    #[tokio::test]
    async fn test_connect_failure_yields_failed_result() {
        let connector = ScriptedConnector::new().fail_open(1);
        let exec = executor(connector);

        let result = exec.execute("show version").await;

        assert!(!result.succeeded);
        assert!(result.raw_output.is_none());
        assert!(result.failure_message.is_some());
    }

    #[tokio::test]
    async fn test_send_failure_closes_session() {
        let connector = ScriptedConnector::new().fail_send("show cpu all");
        let closed = connector.close_count();
        let exec = executor(connector);

        let result = exec.execute("show cpu all").await;

        assert!(!result.succeeded);
        assert_eq!(closed.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_remote_close_ends_accumulation() {
        let connector = ScriptedConnector::new()
            .reply("reboot", "Rebooting...\r\n")
            .close_after("reboot");
        let exec = executor(connector);

        let result = exec.execute("reboot").await;

        assert!(result.succeeded);
        assert!(!result.idle_ceiling_reached);
        assert_eq!(result.output(), Some("Rebooting..."));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ExecState::DrainingBanner.to_string(), "DRAINING_BANNER");
        assert_eq!(ExecState::Failed.to_string(), "FAILED");
    }
}
