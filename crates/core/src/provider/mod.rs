//! Resource snapshot sources
//!
//! A provider supplies the two datasets the engine joins: declared limits
//! and measured usage, both keyed by container name.

mod kubernetes;
mod metrics;

pub use kubernetes::KubeProvider;
pub use metrics::{ContainerMetrics, ContainerUsage, PodMetrics};

use crate::error::ProviderError;
use crate::models::{ResourceLimit, ResourceUsage, Snapshot};

pub use async_trait::async_trait;

/// Trait for sources of limits and usage
#[async_trait]
pub trait ResourceSnapshotProvider: Send + Sync {
    /// Declared limits of every container in the namespace
    async fn fetch_limits(&self, namespace: &str) -> Result<Vec<ResourceLimit>, ProviderError>;

    /// Current usage of every container in the namespace
    async fn fetch_usage(&self, namespace: &str) -> Result<Vec<ResourceUsage>, ProviderError>;

    /// Fetch both datasets concurrently
    async fn fetch_snapshot(&self, namespace: &str) -> Result<Snapshot, ProviderError> {
        let (limits, usages) =
            tokio::try_join!(self.fetch_limits(namespace), self.fetch_usage(namespace))?;
        Ok(Snapshot { limits, usages })
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockProvider;
    use super::*;

    fn limit(name: &str) -> ResourceLimit {
        ResourceLimit {
            name: name.to_string(),
            namespace: "default".to_string(),
            request_cpu: 0.1,
            request_memory: 64.0,
            limit_cpu: 0.2,
            limit_memory: 128.0,
        }
    }

    #[tokio::test]
    async fn test_fetch_snapshot_combines_both_calls() {
        let usage = ResourceUsage {
            pod_name: "web".to_string(),
            cpu: 0.1,
            memory: 32.0,
        };
        let provider = MockProvider::new(vec![limit("web")], vec![usage.clone()]);

        let snapshot = provider.fetch_snapshot("default").await.unwrap();

        assert_eq!(snapshot.limits, vec![limit("web")]);
        assert_eq!(snapshot.usages, vec![usage]);
    }

    #[tokio::test]
    async fn test_fetch_snapshot_propagates_failure() {
        let provider = MockProvider::new(vec![limit("web")], vec![]);
        provider.fail_usage_with(ProviderError::Transport("connection refused".to_string()));

        let result = provider.fetch_snapshot("default").await;

        assert_eq!(
            result,
            Err(ProviderError::Transport("connection refused".to_string()))
        );
    }
}
