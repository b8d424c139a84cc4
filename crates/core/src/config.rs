//! Monitor configuration
//!
//! Assembled once at startup, validated, and passed by reference into the
//! scheduler and the view.

use crate::dashboard::ViewOptions;
use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_NAMESPACE: &str = "default";
pub const DEFAULT_INTERVAL_MS: u64 = 1000;
pub const MIN_INTERVAL_MS: u64 = 100;
pub const MAX_INTERVAL_MS: u64 = 3_600_000;

/// Validated settings for one monitoring session
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Namespace whose deployments are monitored
    pub namespace: String,
    /// Delay between the end of one fetch and the start of the next
    pub interval: Duration,
    /// Rendering options
    pub view: ViewOptions,
}

impl MonitorConfig {
    /// Build a config, rejecting values the cluster or the scheduler cannot use
    pub fn new(
        namespace: impl Into<String>,
        interval_ms: u64,
        view: ViewOptions,
    ) -> Result<Self, ConfigError> {
        let namespace = namespace.into();
        if !is_valid_namespace(&namespace) {
            return Err(ConfigError::InvalidNamespace(namespace));
        }
        if !(MIN_INTERVAL_MS..=MAX_INTERVAL_MS).contains(&interval_ms) {
            return Err(ConfigError::InvalidInterval(interval_ms));
        }
        if view.name_width == 0 {
            return Err(ConfigError::InvalidWidth(view.name_width));
        }

        Ok(Self {
            namespace,
            interval: Duration::from_millis(interval_ms),
            view,
        })
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            view: ViewOptions::default(),
        }
    }
}

/// RFC 1123 label: 1-63 lowercase alphanumerics or '-', alphanumeric at both ends
fn is_valid_namespace(name: &str) -> bool {
    let bytes = name.as_bytes();
    let edge_ok = |b: &u8| b.is_ascii_lowercase() || b.is_ascii_digit();

    !bytes.is_empty()
        && bytes.len() <= 63
        && bytes.first().is_some_and(edge_ok)
        && bytes.last().is_some_and(edge_ok)
        && bytes.iter().all(|b| edge_ok(b) || *b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.namespace, "default");
        assert_eq!(config.interval, Duration::from_millis(1000));
        assert_eq!(config.view.name_width, 22);
    }

    #[test]
    fn test_valid_config() {
        let config = MonitorConfig::new("kube-system", 2000, ViewOptions::default()).unwrap();
        assert_eq!(config.namespace, "kube-system");
        assert_eq!(config.interval, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_namespaces() {
        for ns in ["", "Default", "-lead", "trail-", "has_underscore", "dots.are.not.labels"] {
            assert_eq!(
                MonitorConfig::new(ns, 1000, ViewOptions::default()),
                Err(ConfigError::InvalidNamespace(ns.to_string())),
                "{ns:?} should be rejected"
            );
        }
        let long = "a".repeat(64);
        assert!(MonitorConfig::new(long, 1000, ViewOptions::default()).is_err());
        assert!(MonitorConfig::new("a".repeat(63), 1000, ViewOptions::default()).is_ok());
    }

    #[test]
    fn test_interval_bounds() {
        assert_eq!(
            MonitorConfig::new("default", 0, ViewOptions::default()),
            Err(ConfigError::InvalidInterval(0))
        );
        assert!(MonitorConfig::new("default", MIN_INTERVAL_MS, ViewOptions::default()).is_ok());
        assert!(
            MonitorConfig::new("default", MAX_INTERVAL_MS + 1, ViewOptions::default()).is_err()
        );
    }

    #[test]
    fn test_zero_name_width_rejected() {
        let view = ViewOptions {
            name_width: 0,
            ..ViewOptions::default()
        };
        assert_eq!(
            MonitorConfig::new("default", 1000, view),
            Err(ConfigError::InvalidWidth(0))
        );
    }
}
