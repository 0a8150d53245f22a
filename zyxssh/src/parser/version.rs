//! `show version`

use std::sync::LazyLock;

use regex::Regex;

use super::{capture, pattern};
use crate::model::DeviceInfo;

static MODEL: LazyLock<Regex> = LazyLock::new(|| pattern(r"model\s*:[ \t]*(.+)"));
static FIRMWARE: LazyLock<Regex> = LazyLock::new(|| pattern(r"firmware version\s*:[ \t]*(.+)"));
static BUILD_DATE: LazyLock<Regex> = LazyLock::new(|| pattern(r"build date\s*:[ \t]*(.+)"));

/// Parse model, firmware version and build date.
pub fn parse_version(output: &str) -> DeviceInfo {
    let mut info = DeviceInfo::default();

    if let Some(model) = capture(&MODEL, output) {
        info.model = model.to_string();
    }
    if let Some(firmware) = capture(&FIRMWARE, output) {
        info.firmware = firmware.to_string();
    }
    if let Some(build_date) = capture(&BUILD_DATE, output) {
        info.build_date = build_date.to_string();
    }

    info
}
