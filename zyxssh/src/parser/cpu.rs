//! `show cpu all`

use std::sync::LazyLock;

use regex::Regex;

use super::{int_mean, pattern};
use crate::model::CpuStats;

static CORE_NOW: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"CPU core (\d+) utilization:\s*(\d+)\s*%"));
static CORE_1MIN: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"CPU core (\d+) utilization for 1 min:\s*(\d+)\s*%"));
static CORE_5MIN: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"CPU core (\d+) utilization for 5 min:\s*(\d+)\s*%"));

/// Parse per-core utilization and the 1/5 minute averages.
///
/// Each aggregate is the truncating mean of the per-core values it is built
/// from, or 0 when the report has no such lines.
pub fn parse_cpu(output: &str) -> CpuStats {
    let cores = per_core(&CORE_NOW, output);

    CpuStats {
        current: int_mean(&cores),
        avg_1min: int_mean(&per_core(&CORE_1MIN, output)),
        avg_5min: int_mean(&per_core(&CORE_5MIN, output)),
        cores,
    }
}

fn per_core(re: &Regex, output: &str) -> Vec<u32> {
    re.captures_iter(output)
        .filter_map(|caps| caps.get(2)?.as_str().parse().ok())
        .collect()
}
