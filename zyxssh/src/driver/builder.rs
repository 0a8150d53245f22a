//! Builder for creating access point handles.

use std::path::PathBuf;
use std::time::Duration;

use super::access_point::{AccessPoint, DEFAULT_GUEST_PROFILE};
use super::config::ExecutorConfig;
use crate::error::{ConfigError, Result};
use crate::transport::{HostKeyVerification, SshConfig, SshConnector};

/// Builder for constructing an [`AccessPoint`].
///
/// # Example
///
/// ```rust,no_run
/// use zyxssh::AccessPointBuilder;
///
/// # async fn example() -> Result<(), zyxssh::Error> {
/// let ap = AccessPointBuilder::new("192.168.1.2")
///     .username("admin")
///     .password("secret")
///     .build()?;
///
/// let snapshot = ap.get_snapshot().await;
/// println!("{} running {}", snapshot.device_info.model, snapshot.device_info.firmware);
/// # Ok(())
/// # }
/// ```
pub struct AccessPointBuilder {
    host: String,
    port: u16,
    username: Option<String>,
    password: Option<String>,
    timeout: Duration,
    terminal_width: u32,
    terminal_height: u32,
    host_key_verification: HostKeyVerification,
    known_hosts_path: Option<PathBuf>,
    executor: ExecutorConfig,
    guest_profile: String,
}

impl AccessPointBuilder {
    /// Create a new builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: None,
            password: None,
            timeout: Duration::from_secs(10),
            terminal_width: 511,
            terminal_height: 24,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
            executor: ExecutorConfig::default(),
            guest_profile: DEFAULT_GUEST_PROFILE.to_string(),
        }
    }

    /// Set the SSH port (default: 22).
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the username for authentication.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password for authentication.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the connection timeout (default: 10s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set terminal dimensions.
    pub fn terminal_size(mut self, width: u32, height: u32) -> Self {
        self.terminal_width = width;
        self.terminal_height = height;
        self
    }

    /// Set the host key verification mode.
    pub fn host_key_verification(mut self, mode: HostKeyVerification) -> Self {
        self.host_key_verification = mode;
        self
    }

    /// Use a specific known_hosts file.
    pub fn known_hosts(mut self, path: impl Into<PathBuf>) -> Self {
        self.known_hosts_path = Some(path.into());
        self
    }

    /// Replace the executor timing and prompt settings.
    pub fn executor_config(mut self, config: ExecutorConfig) -> Self {
        self.executor = config;
        self
    }

    /// SSID profile targeted by schedule overrides (default: `Guest`).
    pub fn guest_profile(mut self, profile: impl Into<String>) -> Self {
        self.guest_profile = profile.into();
        self
    }

    /// Build the handle.
    ///
    /// Nothing is connected here; every operation opens its own sessions.
    pub fn build(self) -> Result<AccessPoint<SshConnector>> {
        let username = self
            .username
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::Missing("username"))?;
        let password = self.password.ok_or(ConfigError::Missing("password"))?;
        if self.host.is_empty() {
            return Err(ConfigError::Missing("host").into());
        }
        if self.guest_profile.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "guest_profile",
                message: "profile name cannot be empty".to_string(),
            }
            .into());
        }
        self.executor.validate()?;

        let mut ssh = SshConfig::new(self.host, username, password);
        ssh.port = self.port;
        ssh.timeout = self.timeout;
        ssh.terminal_width = self.terminal_width;
        ssh.terminal_height = self.terminal_height;
        ssh.host_key_verification = self.host_key_verification;
        ssh.known_hosts_path = self.known_hosts_path;

        Ok(AccessPoint::with_connector(
            SshConnector::new(ssh),
            self.executor,
            self.guest_profile,
        ))
    }
}
