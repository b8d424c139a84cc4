//! Error types shared across the crate

use thiserror::Error;

/// Failure while fetching limits or usage from the cluster
///
/// Recoverable: the dashboard keeps the previous data and keeps polling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("request to cluster failed: {0}")]
    Transport(String),

    #[error("unexpected response from cluster: {0}")]
    Decode(String),
}

impl From<kube::Error> for ProviderError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(resp) if resp.code == 401 || resp.code == 403 => {
                ProviderError::Auth(resp.message)
            }
            kube::Error::Auth(e) => ProviderError::Auth(e.to_string()),
            kube::Error::SerdeError(e) => ProviderError::Decode(e.to_string()),
            other => ProviderError::Transport(other.to_string()),
        }
    }
}

/// Invalid startup configuration; fatal before the dashboard starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid namespace {0:?}: must be a lowercase RFC 1123 label of at most 63 characters")]
    InvalidNamespace(String),

    #[error(
        "invalid interval {0} ms: must be between {min} and {max} ms",
        min = crate::config::MIN_INTERVAL_MS,
        max = crate::config::MAX_INTERVAL_MS
    )]
    InvalidInterval(u64),

    #[error("invalid name column width {0}: must be at least 1")]
    InvalidWidth(usize),

    #[error("failed to load configuration: {0}")]
    Load(String),
}
