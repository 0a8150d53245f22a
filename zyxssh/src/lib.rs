//! # zyxssh
//!
//! Async SSH polling client for Zyxel NWA-series access points.
//!
//! The NWA management shell has no machine-readable output and no command
//! framing. zyxssh opens one SSH session per command, decides heuristically
//! when the output has finished arriving, strips echo and prompts, and parses
//! the text reports into typed records.
//!
//! ## Features
//!
//! - Async SSH sessions via russh with an interactive PTY shell
//! - Idle-polling read loop with configurable thresholds
//! - Parsers for version, uptime, CPU, memory, stations, interfaces, radios
//!   and the uplink port
//! - Best-effort [`DeviceSnapshot`] that is always fully populated
//! - Configuration sequences: guest SSID schedule override, radio toggle,
//!   reboot
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zyxssh::{AccessPointBuilder, RadioSlot};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zyxssh::Error> {
//!     let ap = AccessPointBuilder::new("192.168.1.2")
//!         .username("admin")
//!         .password("secret")
//!         .build()?;
//!
//!     let snapshot = ap.get_snapshot().await;
//!     println!("{} clients on {}", snapshot.clients.len(), snapshot.device_info.model);
//!
//!     if !snapshot.radio.slot(RadioSlot::Slot2).active {
//!         ap.set_radio_enabled(RadioSlot::Slot2, true).await;
//!     }
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod control;
pub mod driver;
pub mod error;
pub mod model;
pub mod parser;
pub mod snapshot;
pub mod transport;

// Re-export main types for convenience
pub use control::ControlSequence;
pub use driver::{AccessPoint, AccessPointBuilder, CommandExecutor, CommandResult, ExecutorConfig};
pub use error::Error;
pub use model::{
    ClientRecord, CpuStats, DeviceInfo, DeviceSnapshot, InterfaceRecord, NetworkInfo, PortStats,
    RadioInfo, RadioSlot, RadioSlotInfo, Report, Status,
};
pub use transport::{HostKeyVerification, SshConfig};
