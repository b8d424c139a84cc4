//! Core library for the gk resource monitor
//!
//! This crate provides:
//! - Container utilization computation from declared limits and usage
//! - Snapshot providers backed by the Kubernetes API and metrics-server
//! - A polling scheduler and reducer-driven terminal dashboard
//! - Configuration validation and structured logging

pub mod config;
pub mod dashboard;
pub mod engine;
pub mod error;
pub mod models;
pub mod observability;
pub mod provider;
pub mod quantity;
pub mod scheduler;

pub use config::MonitorConfig;
pub use engine::compute_percentages;
pub use error::{ConfigError, ProviderError};
pub use models::*;
pub use observability::StructuredLogger;
pub use provider::{KubeProvider, ResourceSnapshotProvider};
pub use scheduler::{Effect, Phase, PollingScheduler};
