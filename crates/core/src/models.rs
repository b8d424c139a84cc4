//! Core data models for the dashboard

use serde::{Deserialize, Serialize};

/// Declared resource ceilings for one container
///
/// CPU is in cores, memory in MiB. A value of `0.0` means the field was not
/// declared on the container spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLimit {
    pub name: String,
    pub namespace: String,
    pub request_cpu: f64,
    pub request_memory: f64,
    pub limit_cpu: f64,
    pub limit_memory: f64,
}

/// Point-in-time consumption of one container, as reported by metrics-server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// Container name (join key against [`ResourceLimit::name`])
    pub pod_name: String,
    pub cpu: f64,
    pub memory: f64,
}

/// Utilization of one container relative to its declared limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsagePercentage {
    pub name: String,
    pub cpu_percentage: f64,
    pub memory_percentage: f64,
}

impl UsagePercentage {
    /// The larger of the two percentages, used for status classification
    pub fn peak(&self) -> f64 {
        self.cpu_percentage.max(self.memory_percentage)
    }
}

/// Limits and usage obtained within one poll cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub limits: Vec<ResourceLimit>,
    pub usages: Vec<ResourceUsage>,
}
