//! `show mem status`

use std::sync::LazyLock;

use regex::Regex;

use super::{capture_num, pattern};

static USAGE: LazyLock<Regex> = LazyLock::new(|| pattern(r"memory usage:\s*(\d+)\s*%"));

/// Parse the memory usage percentage; 0 if absent.
pub fn parse_memory(output: &str) -> u32 {
    capture_num(&USAGE, output).unwrap_or(0)
}
