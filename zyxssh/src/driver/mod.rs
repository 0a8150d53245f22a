//! Command execution and the access point facade.
//!
//! [`CommandExecutor`] runs one command per session; [`AccessPoint`] builds
//! snapshots and control sequences on top of it.

mod access_point;
mod builder;
mod config;
mod executor;
mod response;

pub use access_point::{AccessPoint, DEFAULT_GUEST_PROFILE};
pub use builder::AccessPointBuilder;
pub use config::ExecutorConfig;
pub use executor::{CommandExecutor, ExecState};
pub use response::CommandResult;
