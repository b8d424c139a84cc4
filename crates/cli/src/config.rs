//! Configuration management for the CLI
//!
//! Settings are layered: built-in defaults, then `~/.config/gk/config.json`,
//! then `GK_*` environment variables, then command-line flags.

use anyhow::{Context, Result};
use gk_core::config::{DEFAULT_INTERVAL_MS, DEFAULT_NAMESPACE};
use gk_core::dashboard::ViewOptions;
use gk_core::{ConfigError, MonitorConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Values read from the config file and environment
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    /// Default namespace
    pub namespace: Option<String>,
    /// Default refresh interval in milliseconds
    pub interval_ms: Option<u64>,
    /// Width of the name column
    pub name_width: Option<usize>,
    /// Width of the progress bars, 0 to hide them
    pub bar_width: Option<usize>,
}

impl Config {
    /// Load configuration from the default file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path().ok();
        Self::load_from(path.as_deref())
    }

    /// Load configuration from `path` (if it exists) and the environment
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Json)
                    .required(false),
            );
        }

        builder
            .add_source(config::Environment::with_prefix("GK").try_parsing(true))
            .build()
            .and_then(|settings| settings.try_deserialize())
            .map_err(|e| ConfigError::Load(e.to_string()))
    }

    /// Combine with command-line overrides into a validated monitor config
    pub fn monitor_config(
        &self,
        namespace: Option<String>,
        interval_ms: Option<u64>,
    ) -> Result<MonitorConfig, ConfigError> {
        let defaults = ViewOptions::default();
        let view = ViewOptions {
            name_width: self.name_width.unwrap_or(defaults.name_width),
            bar_width: self.bar_width.unwrap_or(defaults.bar_width),
        };

        let namespace = namespace
            .or_else(|| self.namespace.clone())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string());
        let interval_ms = interval_ms
            .or(self.interval_ms)
            .unwrap_or(DEFAULT_INTERVAL_MS);

        MonitorConfig::new(namespace, interval_ms, view)
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("gk").join("config.json"))
    }
}
