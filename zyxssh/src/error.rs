//! Error types for zyxssh.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for zyxssh operations.
#[derive(Error, Debug)]
pub enum Error {
    /// SSH transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Interactive channel errors
    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Command execution errors
    #[error("Executor error: {0}")]
    Executor(#[from] ExecutorError),

    /// Control sequence errors
    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Transport layer errors (SSH connection, authentication).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to connect to host
    #[error("Connection failed to {host}:{port}: {source}")]
    ConnectionFailed {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// SSH handshake or protocol error
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    /// Authentication failed
    #[error("Authentication failed for user '{user}'")]
    AuthenticationFailed { user: String },

    /// Host key does not match the one recorded in known_hosts
    #[error("Host key for {host}:{port} changed (known_hosts line {line})")]
    HostKeyChanged { host: String, port: u16, line: usize },

    /// Host is not present in known_hosts and strict checking is on
    #[error("Host {host}:{port} not found in known_hosts")]
    HostKeyUnknown { host: String, port: u16 },

    /// known_hosts could not be read or written
    #[error("known_hosts error: {0}")]
    KnownHosts(String),

    /// Connection establishment timed out
    #[error("Connection timed out after {0:?}")]
    Timeout(Duration),
}

/// Interactive channel errors (PTY, shell, reads and writes).
#[derive(Error, Debug)]
pub enum ChannelError {
    /// Failed to open the PTY channel
    #[error("Failed to open PTY channel: {0}")]
    PtyOpenFailed(russh::Error),

    /// Failed to request a shell
    #[error("Failed to request shell: {0}")]
    ShellRequestFailed(russh::Error),

    /// Channel was closed by the remote side
    #[error("Channel closed")]
    Closed,

    /// SSH protocol error on the channel
    #[error("Channel SSH error: {0}")]
    Ssh(russh::Error),
}

/// Command execution errors.
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// The accumulation loop gave up before enough output arrived
    #[error("Command '{command}' produced {received} bytes after {attempts} idle polls")]
    CommandTimeout {
        command: String,
        attempts: u32,
        received: usize,
    },
}

/// Control sequence errors.
#[derive(Error, Debug)]
pub enum ControlError {
    /// A step of a configuration sequence failed and the rest was skipped
    #[error("Sequence '{sequence}' aborted at step {step} ('{command}'): {reason}")]
    SequenceAborted {
        sequence: String,
        step: usize,
        command: String,
        reason: String,
    },
}

/// Client configuration errors, raised when building an [`AccessPoint`](crate::AccessPoint).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required builder field was not set
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    /// A setting has a value that cannot work
    #[error("Invalid setting '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },

    /// Radio slot outside 1..=2
    #[error("Unknown radio slot {0} (expected 1 or 2)")]
    UnknownSlot(u8),
}

/// Result type alias using zyxssh's Error.
pub type Result<T> = std::result::Result<T, Error>;
