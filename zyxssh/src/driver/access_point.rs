//! The access point handle used by collaborators.

use std::sync::Mutex;

use log::{error, info, warn};

use super::config::ExecutorConfig;
use super::executor::CommandExecutor;
use super::response::CommandResult;
use crate::control::{self, ControlSequence};
use crate::model::{DeviceSnapshot, RadioSlot};
use crate::snapshot;
use crate::transport::{Connector, ShellSession, SshConnector};

/// SSID profile whose schedule is overridden unless configured otherwise.
pub const DEFAULT_GUEST_PROFILE: &str = "Guest";

/// One Zyxel NWA access point.
///
/// Holds no connection. Every method opens and closes its own sessions, so a
/// handle can be shared and kept around indefinitely. Failures are logged and
/// reported as `false` or as a defaulted snapshot; nothing here returns an
/// error.
pub struct AccessPoint<C: Connector = SshConnector> {
    executor: CommandExecutor<C>,
    guest_profile: String,
    schedule_override: Mutex<Option<bool>>,
}

impl<C: Connector> AccessPoint<C> {
    /// Create a handle over any connector.
    pub fn with_connector(connector: C, config: ExecutorConfig, guest_profile: impl Into<String>) -> Self {
        Self {
            executor: CommandExecutor::new(connector, config),
            guest_profile: guest_profile.into(),
            schedule_override: Mutex::new(None),
        }
    }

    /// Get the executor running this handle's commands.
    pub fn executor(&self) -> &CommandExecutor<C> {
        &self.executor
    }

    /// SSID profile targeted by [`set_schedule_override`](Self::set_schedule_override).
    pub fn guest_profile(&self) -> &str {
        &self.guest_profile
    }

    /// Collect a full device snapshot. Never fails; unavailable parts keep
    /// their defaults.
    pub async fn get_snapshot(&self) -> DeviceSnapshot {
        snapshot::collect(&self.executor).await
    }

    /// Run one ad-hoc command.
    pub async fn execute(&self, command: &str) -> CommandResult {
        self.executor.execute(command).await
    }

    /// Check that a session can be opened, then close it again.
    pub async fn test_connection(&self) -> bool {
        let target = self.executor.connector().target();
        match self.executor.connector().open().await {
            Ok(session) => {
                if let Err(e) = session.close().await {
                    warn!("{}: close after connection test failed: {}", target, e);
                }
                info!("{}: connection test passed", target);
                true
            }
            Err(e) => {
                error!("{}: connection test failed: {}", target, e);
                false
            }
        }
    }

    /// Force the guest SSID on regardless of its schedule (`true`), or hand
    /// control back to the schedule (`false`).
    ///
    /// The device cannot report this setting back. On success the value is
    /// remembered and returned by
    /// [`assumed_schedule_override`](Self::assumed_schedule_override).
    pub async fn set_schedule_override(&self, enabled: bool) -> bool {
        let sequence = ControlSequence::schedule_override(&self.guest_profile, enabled);
        let applied = self.run(&sequence).await;
        if applied {
            if let Ok(mut state) = self.schedule_override.lock() {
                *state = Some(enabled);
            }
        }
        applied
    }

    /// Last schedule override value that was applied successfully.
    ///
    /// This is what was sent, not what the device reports; `None` until the
    /// first successful [`set_schedule_override`](Self::set_schedule_override).
    pub fn assumed_schedule_override(&self) -> Option<bool> {
        self.schedule_override.lock().ok().and_then(|state| *state)
    }

    /// Activate or deactivate one radio.
    pub async fn set_radio_enabled(&self, slot: RadioSlot, enabled: bool) -> bool {
        self.run(&ControlSequence::radio(slot, enabled)).await
    }

    /// Reboot the device. Returns once the command has been delivered.
    pub async fn reboot(&self) -> bool {
        self.run(&ControlSequence::reboot()).await
    }

    async fn run(&self, sequence: &ControlSequence) -> bool {
        match control::run_sequence(&self.executor, sequence).await {
            Ok(()) => true,
            Err(e) => {
                error!("{}: {}", self.executor.connector().target(), e);
                false
            }
        }
    }
}
