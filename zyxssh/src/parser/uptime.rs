//! `show system uptime`

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::pattern;

static WITH_DAYS: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(\d+)\s+days?\s+(\d+):(\d+):(\d+)"));
static CLOCK: LazyLock<Regex> = LazyLock::new(|| pattern(r"(\d+):(\d+):(\d+)"));

/// Parse the uptime line into seconds.
///
/// Accepts `<days> days HH:MM:SS` or a bare `HH:MM:SS`; anything else is 0.
pub fn parse_uptime(output: &str) -> u64 {
    if let Some(caps) = WITH_DAYS.captures(output) {
        return seconds(&caps, 1).unwrap_or(0);
    }
    CLOCK
        .captures(output)
        .and_then(|caps| seconds(&caps, 0))
        .unwrap_or(0)
}

/// Sum `days? hours minutes seconds` groups; `day_group == 0` means no day field.
fn seconds(caps: &Captures<'_>, day_group: usize) -> Option<u64> {
    let field = |i: usize| -> Option<u64> { caps.get(i)?.as_str().parse().ok() };
    let days = if day_group == 0 { 0 } else { field(day_group)? };
    let base = day_group + 1;
    let hours = field(base)?;
    let minutes = field(base + 1)?;
    let secs = field(base + 2)?;

    days.checked_mul(86_400)?
        .checked_add(hours.checked_mul(3_600)?)?
        .checked_add(minutes.checked_mul(60)?)?
        .checked_add(secs)
}
