//! Typed records built from the access point's reports.
//!
//! Every string field defaults to [`UNKNOWN`] and every numeric field to `0`,
//! so a consumer always sees every key even when the source command failed.

use serde::Serialize;

/// Sentinel for string fields that could not be parsed.
pub const UNKNOWN: &str = "Unknown";

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// One best-effort capture of device state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceSnapshot {
    pub device_info: DeviceInfo,
    pub status: Status,
    pub clients: Vec<ClientRecord>,
    pub network: NetworkInfo,
    pub radio: RadioInfo,
    /// Reports that produced output during this pass, in collection order.
    pub collected: Vec<Report>,
}

impl DeviceSnapshot {
    /// Whether the given report contributed to this snapshot.
    pub fn has(&self, report: Report) -> bool {
        self.collected.contains(&report)
    }
}

/// The read-only reports a snapshot is assembled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Report {
    Version,
    Uptime,
    Cpu,
    Memory,
    Clients,
    Interfaces,
    Wlan,
    Port,
}

impl Report {
    /// All reports, in the order they are collected.
    pub const ALL: [Report; 8] = [
        Report::Version,
        Report::Uptime,
        Report::Cpu,
        Report::Memory,
        Report::Clients,
        Report::Interfaces,
        Report::Wlan,
        Report::Port,
    ];

    /// CLI command producing this report.
    pub fn command(self) -> &'static str {
        match self {
            Report::Version => "show version",
            Report::Uptime => "show system uptime",
            Report::Cpu => "show cpu all",
            Report::Memory => "show mem status",
            Report::Clients => "show wireless-hal station info",
            Report::Interfaces => "show interface all",
            Report::Wlan => "show wlan all",
            Report::Port => "show port status",
        }
    }
}

/// Model and firmware from `show version`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub model: String,
    pub firmware: String,
    pub build_date: String,
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self {
            model: unknown(),
            firmware: unknown(),
            build_date: unknown(),
        }
    }
}

/// Uptime, CPU and memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Status {
    pub uptime_seconds: u64,
    pub cpu: CpuStats,
    pub memory_percent: u32,
}

/// CPU utilization in percent, averaged across cores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CpuStats {
    pub current: u32,
    pub avg_1min: u32,
    pub avg_5min: u32,
    /// Instantaneous per-core values, in report order.
    pub cores: Vec<u32>,
}

/// One associated wireless station.
///
/// Only the MAC address is guaranteed; absent fields serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRecord {
    /// Upper-cased MAC address.
    pub mac: String,
    pub ip: Option<String>,
    pub ssid: Option<String>,
    pub security: Option<String>,
    pub rssi_dbm: Option<i32>,
    pub rssi_percent: Option<u32>,
    pub band: Option<String>,
    pub slot: Option<u8>,
    pub tx_rate_mbps: Option<u32>,
    pub rx_rate_mbps: Option<u32>,
    pub capability: Option<String>,
    pub connected_since: Option<String>,
}

impl ClientRecord {
    /// A record with only the MAC address known.
    pub fn new(mac: impl Into<String>) -> Self {
        Self {
            mac: mac.into(),
            ip: None,
            ssid: None,
            security: None,
            rssi_dbm: None,
            rssi_percent: None,
            band: None,
            slot: None,
            tx_rate_mbps: None,
            rx_rate_mbps: None,
            capability: None,
            connected_since: None,
        }
    }
}

/// Management address, interface table and uplink port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub ip_address: String,
    pub netmask: String,
    pub interfaces: Vec<InterfaceRecord>,
    pub port: PortStats,
}

impl Default for NetworkInfo {
    fn default() -> Self {
        Self {
            ip_address: unknown(),
            netmask: unknown(),
            interfaces: Vec::new(),
            port: PortStats::default(),
        }
    }
}

/// One row of `show interface all`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceRecord {
    pub name: String,
    /// `Up`, `Down` or `n/a`.
    pub status: String,
    /// `None` when the device reports `n/a`.
    pub ip: Option<String>,
}

/// Uplink statistics from `show port status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortStats {
    /// Link state as printed, e.g. `1000M/Full`.
    pub status: String,
    /// The speed part of `status`, e.g. `1000M`.
    pub speed: String,
    pub tx_bytes: u64,
    pub rx_bytes: u64,
    pub tx_rate: u64,
    pub rx_rate: u64,
    /// Link uptime as printed (`HH:MM:SS`).
    pub uptime: String,
}

impl Default for PortStats {
    fn default() -> Self {
        Self {
            status: unknown(),
            speed: unknown(),
            tx_bytes: 0,
            rx_bytes: 0,
            tx_rate: 0,
            rx_rate: 0,
            uptime: unknown(),
        }
    }
}

/// Both radio slots from `show wlan all`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RadioInfo {
    /// Slot 1, the 2.4 GHz radio on NWA50AX.
    pub slot1: RadioSlotInfo,
    /// Slot 2, the 5 GHz radio on NWA50AX.
    pub slot2: RadioSlotInfo,
}

impl RadioInfo {
    /// Get the info for a slot.
    pub fn slot(&self, slot: RadioSlot) -> &RadioSlotInfo {
        match slot {
            RadioSlot::Slot1 => &self.slot1,
            RadioSlot::Slot2 => &self.slot2,
        }
    }
}

/// State of one radio slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadioSlotInfo {
    pub active: bool,
    pub band: String,
    /// SSID profile names bound to the slot.
    pub ssids: Vec<String>,
}

impl Default for RadioSlotInfo {
    fn default() -> Self {
        Self {
            active: false,
            band: unknown(),
            ssids: Vec::new(),
        }
    }
}

/// Radio slot selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RadioSlot {
    Slot1,
    Slot2,
}

impl RadioSlot {
    /// Slot number as used by the CLI (`1` or `2`).
    pub fn number(self) -> u8 {
        match self {
            RadioSlot::Slot1 => 1,
            RadioSlot::Slot2 => 2,
        }
    }
}

impl TryFrom<u8> for RadioSlot {
    type Error = crate::error::ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RadioSlot::Slot1),
            2 => Ok(RadioSlot::Slot2),
            other => Err(crate::error::ConfigError::UnknownSlot(other)),
        }
    }
}
