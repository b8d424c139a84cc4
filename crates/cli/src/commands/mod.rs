//! CLI command implementations

pub mod resource;
pub mod snapshot;

use anyhow::{Context, Result};
use gk_core::KubeProvider;
use std::path::Path;
use tracing::info;

/// Connect to the cluster and make sure the API server answers
async fn connect(kubeconfig: Option<&Path>) -> Result<KubeProvider> {
    let provider = KubeProvider::connect(kubeconfig).await?;
    let version = provider
        .preflight()
        .await
        .context("Kubernetes API server is unreachable")?;
    info!(%version, "Connected to API server");
    Ok(provider)
}
