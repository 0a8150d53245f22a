//! `show port status`
//!
//! Fixed-column table; only the first (uplink) port row is read:
//!
//! ```text
//! Port Status      STP  TxPkts RxPkts Colli. Errors Tx B/s Rx B/s Up Time  Flap TxBytes  RxBytes
//! 1    1000M/Full  0    5012   8830   0      11     1532   2410   10:21:05 0    3322110  9821734
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::pattern;
use crate::model::PortStats;

static PORT_ROW: LazyLock<Regex> = LazyLock::new(|| {
    pattern(concat!(
        r"(?m)^[ \t]*1[ \t]+(\S+)",
        r"[ \t]+\d+[ \t]+\d+[ \t]+\d+[ \t]+\d+[ \t]+\d+",
        r"[ \t]+(\d+)[ \t]+(\d+)[ \t]+([\d:]+)[ \t]+\d+[ \t]+(\d+)[ \t]+(\d+)",
    ))
});

/// Parse link state, rates, uptime and byte counters of port 1.
pub fn parse_port_status(output: &str) -> PortStats {
    let mut port = PortStats::default();

    let Some(caps) = PORT_ROW.captures(output) else {
        return port;
    };

    let number = |i: usize| caps[i].parse::<u64>().unwrap_or(0);

    port.status = caps[1].to_string();
    port.tx_rate = number(2);
    port.rx_rate = number(3);
    port.uptime = caps[4].to_string();
    port.tx_bytes = number(5);
    port.rx_bytes = number(6);

    if let Some((speed, _duplex)) = port.status.split_once('/') {
        port.speed = speed.to_string();
    }

    port
}
