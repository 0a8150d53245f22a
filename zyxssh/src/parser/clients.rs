//! `show wireless-hal station info`
//!
//! The report is a list of blocks, each opened by an `index: N` line:
//!
//! ```text
//! index: 1
//!   MAC: 3c:22:fb:01:02:03
//!   IPv4: 192.168.1.34
//!   Display SSID: Home
//!   Security: WPA2-PSK
//!   RSSI dBm: -52
//!   RSSI: 96
//!   Band: 5GHz
//!   Slot: 2
//!   TxRate: 866M
//!   RxRate: 780M
//!   Capability: 802.11ax
//!   Time: 2024/05/16 10:12:33
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::{capture, capture_num, pattern};
use crate::model::ClientRecord;

static INDEX: LazyLock<Regex> = LazyLock::new(|| pattern(r"index:\s*\d+"));
static MAC: LazyLock<Regex> = LazyLock::new(|| pattern(r"MAC:\s*([\da-fA-F:]+)"));
static IPV4: LazyLock<Regex> = LazyLock::new(|| pattern(r"IPv4:\s*([\d.]+)"));
static DISPLAY_SSID: LazyLock<Regex> = LazyLock::new(|| pattern(r"Display SSID:[ \t]*(.+)"));
static SSID: LazyLock<Regex> = LazyLock::new(|| pattern(r"\bSSID:[ \t]*(.+)"));
static SECURITY: LazyLock<Regex> = LazyLock::new(|| pattern(r"Security:[ \t]*(.+)"));
static RSSI_DBM: LazyLock<Regex> = LazyLock::new(|| pattern(r"RSSI dBm:\s*(-?\d+)"));
static RSSI: LazyLock<Regex> = LazyLock::new(|| pattern(r"RSSI:\s*(\d+)"));
static BAND: LazyLock<Regex> = LazyLock::new(|| pattern(r"Band:\s*([\dG.Hz]+)"));
static SLOT: LazyLock<Regex> = LazyLock::new(|| pattern(r"Slot:\s*(\d+)"));
static TX_RATE: LazyLock<Regex> = LazyLock::new(|| pattern(r"TxRate:\s*(\d+)M"));
static RX_RATE: LazyLock<Regex> = LazyLock::new(|| pattern(r"RxRate:\s*(\d+)M"));
static CAPABILITY: LazyLock<Regex> = LazyLock::new(|| pattern(r"Capability:[ \t]*(.+)"));
static TIME: LazyLock<Regex> = LazyLock::new(|| pattern(r"Time:[ \t]*(.+)"));

/// Parse every station block that carries a MAC address.
pub fn parse_clients(output: &str) -> Vec<ClientRecord> {
    // Text before the first marker is a header, not a station
    INDEX
        .split(output)
        .skip(1)
        .filter_map(parse_block)
        .collect()
}

fn parse_block(block: &str) -> Option<ClientRecord> {
    let mac = capture(&MAC, block)?;
    let mut client = ClientRecord::new(mac.to_uppercase());

    let owned = |re: &Regex| capture(re, block).map(str::to_string);

    client.ip = owned(&IPV4);
    client.ssid = owned(&DISPLAY_SSID).or_else(|| owned(&SSID));
    client.security = owned(&SECURITY);
    client.rssi_dbm = capture_num(&RSSI_DBM, block);
    client.rssi_percent = capture_num(&RSSI, block);
    client.band = owned(&BAND);
    client.slot = capture_num(&SLOT, block);
    client.tx_rate_mbps = capture_num(&TX_RATE, block);
    client.rx_rate_mbps = capture_num(&RX_RATE, block);
    client.capability = owned(&CAPABILITY);
    client.connected_since = owned(&TIME);

    Some(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Station count: 3
index: 1
  MAC: 3c:22:fb:01:02:03
  IPv4: 192.168.1.34
  Display SSID: Home Network
  Security: WPA2-PSK
  RSSI dBm: -52
  RSSI: 96
  Band: 5GHz
  Slot: 2
  TxRate: 866M
  RxRate: 780M
  Capability: 802.11ax
  Time: 2024/05/16 10:12:33
index: 2
  IPv4: 192.168.1.50
  SSID: Guest
index: 3
  MAC: aa:bb:cc:dd:ee:0f
  SSID: Guest
  Band: 2.4GHz
";

    #[test]
    fn test_full_block() {
        let clients = parse_clients(SAMPLE);
        let first = &clients[0];
        assert_eq!(first.mac, "3C:22:FB:01:02:03");
        assert_eq!(first.ip.as_deref(), Some("192.168.1.34"));
        assert_eq!(first.ssid.as_deref(), Some("Home Network"));
        assert_eq!(first.security.as_deref(), Some("WPA2-PSK"));
        assert_eq!(first.rssi_dbm, Some(-52));
        assert_eq!(first.rssi_percent, Some(96));
        assert_eq!(first.band.as_deref(), Some("5GHz"));
        assert_eq!(first.slot, Some(2));
        assert_eq!(first.tx_rate_mbps, Some(866));
        assert_eq!(first.rx_rate_mbps, Some(780));
        assert_eq!(first.capability.as_deref(), Some("802.11ax"));
        assert_eq!(first.connected_since.as_deref(), Some("2024/05/16 10:12:33"));
    }

    #[test]
    fn test_block_without_mac_is_dropped() {
        let clients = parse_clients(SAMPLE);
        assert_eq!(clients.len(), 2);
        assert!(clients.iter().all(|c| c.mac == c.mac.to_uppercase()));
    }

    #[test]
    fn test_partial_block_and_ssid_fallback() {
        let clients = parse_clients(SAMPLE);
        let last = &clients[1];
        assert_eq!(last.mac, "AA:BB:CC:DD:EE:0F");
        assert_eq!(last.ssid.as_deref(), Some("Guest"));
        assert_eq!(last.band.as_deref(), Some("2.4GHz"));
        assert_eq!(last.ip, None);
        assert_eq!(last.rssi_dbm, None);
    }

    #[test]
    fn test_bssid_is_not_ssid() {
        let clients = parse_clients("index: 1\nMAC: 00:11:22:33:44:55\nBSSID: 66:77:88:99:aa:bb\n");
        assert_eq!(clients[0].ssid, None);
    }

    #[test]
    fn test_no_stations() {
        assert!(parse_clients("Station count: 0").is_empty());
        assert!(parse_clients("").is_empty());
    }
}
