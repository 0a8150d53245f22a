//! SSH transport layer wrapping russh.
//!
//! A session is one authenticated connection plus one interactive PTY shell.
//! Sessions are never reused: the executor opens one per command and closes
//! it before returning.

pub mod config;
#[cfg(test)]
pub(crate) mod mock;
mod ssh;

use std::future::Future;

pub use config::{HostKeyVerification, SshConfig};
pub use ssh::{SshConnector, SshSession};

use crate::error::Result;

/// An open interactive shell on the device.
pub trait ShellSession: Send {
    /// Write raw text to the shell.
    fn send(&mut self, text: &str) -> impl Future<Output = Result<()>> + Send;

    /// Return whatever bytes have already arrived, without waiting.
    ///
    /// An empty vector means nothing is pending. Returns
    /// [`ChannelError::Closed`](crate::error::ChannelError::Closed) once the
    /// remote side has closed the channel and no buffered data remains.
    fn read_available(&mut self) -> Result<Vec<u8>>;

    /// Close the channel and the connection.
    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

/// Opens fresh [`ShellSession`]s against one device.
pub trait Connector: Send + Sync {
    /// Session type produced by this connector.
    type Session: ShellSession;

    /// Connect, authenticate and start an interactive shell.
    fn open(&self) -> impl Future<Output = Result<Self::Session>> + Send;

    /// Human-readable target used in log lines (e.g. `admin@10.0.0.2:22`).
    fn target(&self) -> String;
}
