//! Live dashboard command

use anyhow::Result;
use gk_core::{MonitorConfig, StructuredLogger};
use std::path::Path;
use std::sync::Arc;

/// Connect, then hand the terminal to the dashboard until the user quits
pub async fn run_dashboard(kubeconfig: Option<&Path>, config: MonitorConfig) -> Result<()> {
    let provider = super::connect(kubeconfig).await?;

    StructuredLogger::new(config.namespace.clone())
        .log_startup(env!("CARGO_PKG_VERSION"), config.interval);

    gk_core::dashboard::run(Arc::new(provider), &config).await
}
