//! Utilization computation
//!
//! Joins declared limits with measured usage by container name and derives
//! CPU and memory percentages, floored to hundredths.

use crate::models::{ResourceLimit, ResourceUsage, UsagePercentage};
use std::collections::HashMap;

/// Compute per-container utilization percentages
///
/// Only usages with a limit of the same name produce an entry, and the
/// output keeps the order of `usages`. When several limits share a name the
/// last one wins. A zero limit yields `0.0` for that resource.
pub fn compute_percentages(
    limits: &[ResourceLimit],
    usages: &[ResourceUsage],
) -> Vec<UsagePercentage> {
    let by_name: HashMap<&str, &ResourceLimit> = limits
        .iter()
        .map(|limit| (limit.name.as_str(), limit))
        .collect();

    usages
        .iter()
        .filter_map(|usage| {
            let limit = by_name.get(usage.pod_name.as_str())?;
            Some(UsagePercentage {
                name: usage.pod_name.clone(),
                cpu_percentage: percentage(usage.cpu, limit.limit_cpu),
                memory_percentage: percentage(usage.memory, limit.limit_memory),
            })
        })
        .collect()
}

/// `floor(used / limit * 10000) / 100`, or `0.0` when no limit is declared
fn percentage(used: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        (used / limit * 10000.0).floor() / 100.0
    } else {
        0.0
    }
}
