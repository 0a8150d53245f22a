//! Snapshot aggregation.
//!
//! Runs every read-only report in [`Report::ALL`] order, one session per
//! command, and folds the parsed records into a [`DeviceSnapshot`]. A report
//! that fails or comes back empty leaves its part of the snapshot at the
//! default; the pass always completes.

use std::time::Instant;

use log::{debug, info, warn};

use crate::driver::CommandExecutor;
use crate::model::{DeviceSnapshot, Report};
use crate::parser;
use crate::transport::Connector;

/// Collect a full snapshot through `executor`.
pub async fn collect<C: Connector>(executor: &CommandExecutor<C>) -> DeviceSnapshot {
    let start = Instant::now();
    let mut snapshot = DeviceSnapshot::default();

    for report in Report::ALL {
        debug!("Fetching {:?} ({})", report, report.command());
        let result = executor.execute(report.command()).await;

        if !result.succeeded {
            warn!(
                "'{}' failed: {}",
                report.command(),
                result.failure_message.as_deref().unwrap_or("unknown error")
            );
            continue;
        }

        match result.output() {
            Some(text) => {
                apply(&mut snapshot, report, text);
                snapshot.collected.push(report);
            }
            None => warn!("No output from '{}'", report.command()),
        }
    }

    info!(
        "Collected {}/{} reports in {:?}",
        snapshot.collected.len(),
        Report::ALL.len(),
        start.elapsed()
    );
    snapshot
}

/// Parse one report's text into its slot of the snapshot.
pub fn apply(snapshot: &mut DeviceSnapshot, report: Report, text: &str) {
    match report {
        Report::Version => snapshot.device_info = parser::parse_version(text),
        Report::Uptime => snapshot.status.uptime_seconds = parser::parse_uptime(text),
        Report::Cpu => snapshot.status.cpu = parser::parse_cpu(text),
        Report::Memory => snapshot.status.memory_percent = parser::parse_memory(text),
        Report::Clients => snapshot.clients = parser::parse_clients(text),
        Report::Interfaces => {
            let network = parser::parse_interfaces(text);
            snapshot.network.ip_address = network.ip_address;
            snapshot.network.netmask = network.netmask;
            snapshot.network.interfaces = network.interfaces;
        }
        Report::Wlan => snapshot.radio = parser::parse_wlan(text),
        Report::Port => snapshot.network.port = parser::parse_port_status(text),
    }
}
