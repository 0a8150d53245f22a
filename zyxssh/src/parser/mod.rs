//! Report parsers.
//!
//! One pure function per report shape. Each field is matched on its own, so
//! a label that is missing or malformed only leaves that field at its
//! default. None of these functions can fail.

mod clients;
mod cpu;
mod interfaces;
mod memory;
mod port;
mod uptime;
mod version;
mod wlan;

pub use clients::parse_clients;
pub use cpu::parse_cpu;
pub use interfaces::parse_interfaces;
pub use memory::parse_memory;
pub use port::parse_port_status;
pub use uptime::parse_uptime;
pub use version::parse_version;
pub use wlan::parse_wlan;

use std::str::FromStr;

use regex::Regex;

/// Compile a pattern that is known to be valid.
fn pattern(re: &str) -> Regex {
    Regex::new(re).unwrap_or_else(|e| panic!("invalid built-in pattern {re:?}: {e}"))
}

/// First capture group of the first match, trimmed.
fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// First capture group parsed as a number.
fn capture_num<T: FromStr>(re: &Regex, text: &str) -> Option<T> {
    capture(re, text).and_then(|s| s.parse().ok())
}

/// Truncating integer mean; 0 for an empty slice.
fn int_mean(values: &[u32]) -> u32 {
    if values.is_empty() {
        return 0;
    }
    let sum: u64 = values.iter().map(|&v| u64::from(v)).sum();
    (sum / values.len() as u64) as u32
}
