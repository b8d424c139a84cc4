//! Kubernetes API provider
//!
//! Limits come from the pod templates of the namespace's Deployments,
//! usage from metrics-server PodMetrics.

use super::metrics::PodMetrics;
use super::{async_trait, ResourceSnapshotProvider};
use crate::error::ProviderError;
use crate::models::{ResourceLimit, ResourceUsage};
use crate::quantity::{cpu_cores, memory_mib};
use anyhow::{Context, Result};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Container;
use kube::api::ListParams;
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config};
use std::path::Path;
use tracing::{debug, info};

/// Provider backed by a live cluster connection
#[derive(Clone)]
pub struct KubeProvider {
    client: Client,
}

impl KubeProvider {
    /// Wrap an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from an explicit kubeconfig, or infer one
    ///
    /// Inference tries `KUBECONFIG`, then `~/.kube/config`, then the
    /// in-cluster service account.
    pub async fn connect(kubeconfig: Option<&Path>) -> Result<Self> {
        let config = match kubeconfig {
            Some(path) => {
                let kubeconfig = Kubeconfig::read_from(path)
                    .with_context(|| format!("Failed to read kubeconfig {}", path.display()))?;
                Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                    .await
                    .context("Failed to load kubeconfig")?
            }
            None => Config::infer()
                .await
                .context("No kubeconfig found and not running in a cluster")?,
        };

        info!(cluster_url = %config.cluster_url, "Connecting to Kubernetes API");
        let client = Client::try_from(config).context("Failed to create Kubernetes client")?;

        Ok(Self { client })
    }

    /// Check the API server answers; returns its version string
    pub async fn preflight(&self) -> Result<String, ProviderError> {
        let info = self.client.apiserver_version().await?;
        debug!(version = %info.git_version, "API server reachable");
        Ok(info.git_version)
    }
}

#[async_trait]
impl ResourceSnapshotProvider for KubeProvider {
    async fn fetch_limits(&self, namespace: &str) -> Result<Vec<ResourceLimit>, ProviderError> {
        let api: Api<Deployment> = Api::namespaced(self.client.clone(), namespace);
        let deployments = api.list(&ListParams::default()).await?;

        Ok(deployments
            .items
            .iter()
            .flat_map(|deployment| limits_from_deployment(namespace, deployment))
            .collect())
    }

    async fn fetch_usage(&self, namespace: &str) -> Result<Vec<ResourceUsage>, ProviderError> {
        let api: Api<PodMetrics> = Api::namespaced(self.client.clone(), namespace);
        let metrics = api.list(&ListParams::default()).await?;

        Ok(metrics.items.iter().flat_map(usages_from_pod_metrics).collect())
    }
}

/// One limit per container of the Deployment's pod template
fn limits_from_deployment(namespace: &str, deployment: &Deployment) -> Vec<ResourceLimit> {
    deployment
        .spec
        .as_ref()
        .and_then(|spec| spec.template.spec.as_ref())
        .map(|pod| {
            pod.containers
                .iter()
                .map(|container| limit_from_container(namespace, container))
                .collect()
        })
        .unwrap_or_default()
}

fn limit_from_container(namespace: &str, container: &Container) -> ResourceLimit {
    let resources = container.resources.as_ref();
    let requests = resources.and_then(|r| r.requests.as_ref());
    let limits = resources.and_then(|r| r.limits.as_ref());

    ResourceLimit {
        name: container.name.clone(),
        namespace: namespace.to_string(),
        request_cpu: cpu_cores(requests.and_then(|m| m.get("cpu"))),
        request_memory: memory_mib(requests.and_then(|m| m.get("memory"))),
        limit_cpu: cpu_cores(limits.and_then(|m| m.get("cpu"))),
        limit_memory: memory_mib(limits.and_then(|m| m.get("memory"))),
    }
}

fn usages_from_pod_metrics(pod: &PodMetrics) -> impl Iterator<Item = ResourceUsage> + '_ {
    pod.containers.iter().map(|container| ResourceUsage {
        pod_name: container.name.clone(),
        cpu: cpu_cores(container.usage.cpu.as_ref()),
        memory: memory_mib(container.usage.memory.as_ref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployment() -> Deployment {
        serde_json::from_value(serde_json::json!({
            "metadata": { "name": "shop", "namespace": "prod" },
            "spec": {
                "selector": { "matchLabels": { "app": "shop" } },
                "template": {
                    "metadata": { "labels": { "app": "shop" } },
                    "spec": {
                        "containers": [
                            {
                                "name": "api",
                                "resources": {
                                    "requests": { "cpu": "100m", "memory": "128Mi" },
                                    "limits": { "cpu": "500m", "memory": "1Gi" }
                                }
                            },
                            { "name": "sidecar" }
                        ]
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_limits_from_deployment() {
        let limits = limits_from_deployment("prod", &deployment());

        assert_eq!(limits.len(), 2);
        assert_eq!(
            limits[0],
            ResourceLimit {
                name: "api".to_string(),
                namespace: "prod".to_string(),
                request_cpu: 0.1,
                request_memory: 128.0,
                limit_cpu: 0.5,
                limit_memory: 1024.0,
            }
        );
        // undeclared resources are reported as zero
        assert_eq!(limits[1].name, "sidecar");
        assert_eq!(limits[1].limit_cpu, 0.0);
        assert_eq!(limits[1].limit_memory, 0.0);
    }

    #[test]
    fn test_deployment_without_spec_has_no_limits() {
        let deployment: Deployment =
            serde_json::from_value(serde_json::json!({ "metadata": { "name": "empty" } })).unwrap();
        assert!(limits_from_deployment("prod", &deployment).is_empty());
    }

    #[test]
    fn test_usages_from_pod_metrics() {
        let pod: PodMetrics = serde_json::from_value(serde_json::json!({
            "metadata": { "name": "shop-abc" },
            "containers": [
                { "name": "api", "usage": { "cpu": "250m", "memory": "256Mi" } },
                { "name": "sidecar", "usage": { "cpu": "2m", "memory": "8Mi" } }
            ]
        }))
        .unwrap();

        let usages: Vec<_> = usages_from_pod_metrics(&pod).collect();

        assert_eq!(usages.len(), 2);
        assert_eq!(usages[0].pod_name, "api");
        assert_eq!(usages[0].cpu, 0.25);
        assert_eq!(usages[0].memory, 256.0);
        assert_eq!(usages[1].pod_name, "sidecar");
        assert_eq!(usages[1].memory, 8.0);
    }
}
