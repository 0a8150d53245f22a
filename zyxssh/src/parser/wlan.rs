//! `show wlan all`
//!
//! ```text
//! slot: slot1
//!   Activate: yes
//!   Band: 2.4G
//!   SSID_profile_1: default
//!   SSID_profile_2: Guest
//! slot: slot2
//!   Activate: no
//!   Band: 5G
//!   SSID_profile_1: default
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::{capture, pattern};
use crate::model::{RadioInfo, RadioSlotInfo};

const SLOT1_MARKER: &str = "slot: slot1";
const SLOT2_MARKER: &str = "slot: slot2";

static ACTIVATE: LazyLock<Regex> = LazyLock::new(|| pattern(r"Activate:[ \t]*(\w+)"));
static BAND: LazyLock<Regex> = LazyLock::new(|| pattern(r"Band:[ \t]*([\dG.]+)"));
static SSID_PROFILE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"SSID_profile_\d+:[ \t]*(\S+)"));

/// Parse activation, band and SSID profiles for both radio slots.
pub fn parse_wlan(output: &str) -> RadioInfo {
    let slot2_start = output.find(SLOT2_MARKER);

    // slot1 runs up to the slot2 marker, or to the end when there is none
    let slot1 = output.find(SLOT1_MARKER).map(|start| {
        let body = start + SLOT1_MARKER.len();
        match slot2_start {
            Some(end) if end >= body => &output[body..end],
            _ => &output[body..],
        }
    });
    let slot2 = slot2_start.map(|start| &output[start + SLOT2_MARKER.len()..]);

    RadioInfo {
        slot1: slot1.map(parse_slot).unwrap_or_default(),
        slot2: slot2.map(parse_slot).unwrap_or_default(),
    }
}

fn parse_slot(section: &str) -> RadioSlotInfo {
    let mut slot = RadioSlotInfo::default();

    if let Some(flag) = capture(&ACTIVATE, section) {
        slot.active = flag.eq_ignore_ascii_case("yes");
    }
    if let Some(band) = capture(&BAND, section) {
        slot.band = band.to_string();
    }
    slot.ssids = SSID_PROFILE
        .captures_iter(section)
        .map(|caps| caps[1].to_string())
        .collect();

    slot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNKNOWN;

    const SAMPLE: &str = "\
slot: slot1
  Activate: yes
  Band: 2.4G
  SSID_profile_1: default
  SSID_profile_2: Guest
  SSID_profile_3:
slot: slot2
  Activate: no
  Band: 5G
  SSID_profile_1: default";

    #[test]
    fn test_both_slots() {
        let radio = parse_wlan(SAMPLE);
        assert!(radio.slot1.active);
        assert_eq!(radio.slot1.band, "2.4G");
        assert!(!radio.slot2.active);
        assert_eq!(radio.slot2.band, "5G");
    }

    #[test]
    fn test_ssids_stay_in_their_slot() {
        let radio = parse_wlan(SAMPLE);
        assert_eq!(radio.slot1.ssids, vec!["default", "Guest"]);
        assert_eq!(radio.slot2.ssids, vec!["default"]);
    }

    #[test]
    fn test_activation_is_case_insensitive() {
        let radio = parse_wlan("slot: slot1\nActivate: YES\nBand: 2.4G");
        assert!(radio.slot1.active);

        let radio = parse_wlan("slot: slot1\nActivate: enabled\nBand: 2.4G");
        assert!(!radio.slot1.active);
    }

    #[test]
    fn test_slot1_only() {
        let radio = parse_wlan("slot: slot1\nActivate: yes\nBand: 2.4G\nSSID_profile_1: iot");
        assert_eq!(radio.slot1.ssids, vec!["iot"]);
        assert_eq!(radio.slot2, RadioSlotInfo::default());
        assert_eq!(radio.slot2.band, UNKNOWN);
    }

    #[test]
    fn test_slot1_fields_do_not_leak_from_slot2() {
        let radio = parse_wlan("slot: slot1\nSSID_profile_1: a\nslot: slot2\nActivate: yes\nBand: 5G");
        assert!(!radio.slot1.active);
        assert_eq!(radio.slot1.band, UNKNOWN);
        assert!(radio.slot2.active);
    }
}
