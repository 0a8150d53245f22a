//! `show interface all`
//!
//! ```text
//! No.  Name      Status   IP Address      Mask            IP Assignment
//! ===========================================================================
//! 1    lan       Up       192.168.1.2     255.255.255.0   DHCP client
//! 2    vlan0     Down     n/a             n/a             n/a
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::pattern;
use crate::model::{InterfaceRecord, NetworkInfo};

static LAN: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?m)^[ \t]*\d+[ \t]+lan[ \t]+Up[ \t]+([\d.]+)[ \t]+([\d.]+)")
});
static ROW: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?m)^[ \t]*(\d+)[ \t]+(\S+)[ \t]+(Up|Down|n/a)[ \t]+([\d.]+|n/a)")
});

/// Parse the management address and interface rows.
///
/// The returned [`NetworkInfo`] carries a default port; fill it from
/// [`parse_port_status`](super::parse_port_status).
pub fn parse_interfaces(output: &str) -> NetworkInfo {
    let mut network = NetworkInfo::default();

    if let Some(caps) = LAN.captures(output) {
        network.ip_address = caps[1].to_string();
        network.netmask = caps[2].to_string();
    }

    network.interfaces = ROW
        .captures_iter(output)
        .map(|caps| InterfaceRecord {
            name: caps[2].to_string(),
            status: caps[3].to_string(),
            ip: match &caps[4] {
                "n/a" => None,
                ip => Some(ip.to_string()),
            },
        })
        .collect();

    network
}
