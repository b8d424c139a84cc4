//! Structured logging for monitor events
//!
//! Emits named `tracing` events so log files can be filtered by `event`.

use crate::error::ProviderError;
use std::time::Duration;
use tracing::{info, warn};

/// Structured logger scoped to one monitored namespace
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    namespace: String,
}

impl StructuredLogger {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Log monitor startup
    pub fn log_startup(&self, version: &str, interval: Duration) {
        info!(
            event = "monitor_started",
            namespace = %self.namespace,
            version = %version,
            interval_ms = interval.as_millis() as u64,
            "Resource monitor started"
        );
    }

    /// Log a successful fetch
    pub fn log_fetch_completed(&self, containers: usize, elapsed: Duration) {
        info!(
            event = "fetch_completed",
            namespace = %self.namespace,
            containers = containers,
            elapsed_ms = elapsed.as_millis() as u64,
            "Fetched resource usage"
        );
    }

    /// Log a failed fetch; polling continues
    pub fn log_fetch_failed(&self, error: &ProviderError, elapsed: Duration) {
        warn!(
            event = "fetch_failed",
            namespace = %self.namespace,
            error = %error,
            elapsed_ms = elapsed.as_millis() as u64,
            "Failed to fetch resource usage, keeping previous data"
        );
    }

    /// Log monitor shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "monitor_shutdown",
            namespace = %self.namespace,
            reason = %reason,
            "Resource monitor shutting down"
        );
    }
}
