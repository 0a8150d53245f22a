//! SSH connection configuration.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

/// Host key verification mode, analogous to OpenSSH's `StrictHostKeyChecking`.
///
/// Access points ship with self-generated host keys that change on factory
/// reset, so the default accepts any key. Switch to [`AcceptNew`] or
/// [`Strict`] to pin keys.
///
/// [`AcceptNew`]: HostKeyVerification::AcceptNew
/// [`Strict`]: HostKeyVerification::Strict
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HostKeyVerification {
    /// Reject unknown and changed keys. Connection fails if the host
    /// is not already in known_hosts.
    Strict,

    /// Accept and auto-learn unknown keys, but reject changed keys.
    AcceptNew,

    /// Accept all keys without checking or recording them.
    #[default]
    Disabled,
}

/// SSH connection configuration for one access point.
#[derive(Debug)]
pub struct SshConfig {
    /// Target host (hostname or IP address).
    pub host: String,

    /// SSH port (default: 22).
    pub port: u16,

    /// Username for password authentication.
    pub username: String,

    /// Password. Only exposed while authenticating.
    pub password: SecretString,

    /// Connection establishment timeout.
    pub timeout: Duration,

    /// Terminal width for PTY.
    pub terminal_width: u32,

    /// Terminal height for PTY.
    pub terminal_height: u32,

    /// Host key verification mode.
    pub host_key_verification: HostKeyVerification,

    /// Path to known_hosts file (defaults to the user's known_hosts).
    pub known_hosts_path: Option<PathBuf>,
}

impl SshConfig {
    /// Create a config with default port, timeout and terminal size.
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: 22,
            username: username.into(),
            password: SecretString::from(password.into()),
            timeout: Duration::from_secs(10),
            terminal_width: 511,
            terminal_height: 24,
            host_key_verification: HostKeyVerification::default(),
            known_hosts_path: None,
        }
    }

    /// Get the socket address for connection.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
