//! Shared, swappable reference to the current graph.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::sources::NetworkSources;

use super::builder::{RouteFailure, build_network};
use super::config::BuildConfig;
use super::error::GraphError;
use super::snapshot::GraphSnapshot;

/// Thread-safe holder of the published snapshot.
///
/// Starts out not built. Readers get an `Arc` to whatever snapshot was
/// current when they asked and keep it for as long as they like; a rebuild
/// swaps in a new snapshot without disturbing them.
#[derive(Debug, Clone, Default)]
pub struct GraphHandle {
    inner: Arc<RwLock<Option<Arc<GraphSnapshot>>>>,
}

impl GraphHandle {
    /// Create a handle with nothing published.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle that already holds `snapshot`.
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Some(Arc::new(snapshot)))),
        }
    }

    /// The current snapshot.
    pub async fn snapshot(&self) -> Result<Arc<GraphSnapshot>, GraphError> {
        let guard = self.inner.read().await;
        guard.clone().ok_or(GraphError::NotBuilt)
    }

    pub async fn is_built(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// Replace the current snapshot, returning the previous one.
    pub async fn publish(&self, snapshot: GraphSnapshot) -> Option<Arc<GraphSnapshot>> {
        let snapshot = Arc::new(snapshot);
        let mut guard = self.inner.write().await;
        guard.replace(snapshot)
    }

    /// Build a new snapshot off the async runtime and publish it.
    ///
    /// The current snapshot stays visible until the build has finished.
    /// Route failures are returned; the build itself only fails if the
    /// blocking task does.
    pub async fn rebuild(
        &self,
        sources: Arc<NetworkSources>,
        config: BuildConfig,
    ) -> Result<Vec<RouteFailure>, GraphError> {
        let outcome = tokio::task::spawn_blocking(move || build_network(&sources, &config))
            .await
            .map_err(|e| GraphError::BuildTask(e.to_string()))?;

        info!(
            nodes = outcome.snapshot.node_count(),
            edges = outcome.snapshot.edge_count(),
            failures = outcome.failures.len(),
            "Publishing graph snapshot"
        );

        self.publish(outcome.snapshot).await;
        Ok(outcome.failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgePolicy;
    use crate::sources::fixtures::{complex, line_network};

    #[tokio::test]
    async fn not_built_until_published() {
        let handle = GraphHandle::new();

        assert!(!handle.is_built().await);
        assert_eq!(handle.snapshot().await.unwrap_err(), GraphError::NotBuilt);
    }

    #[tokio::test]
    async fn rebuild_publishes_snapshot() {
        let sources = Arc::new(line_network(&[("1", vec!["101", "102", "103"])]));
        let handle = GraphHandle::new();

        let failures = handle
            .rebuild(sources, BuildConfig::new(EdgePolicy::Adjacency))
            .await
            .unwrap();

        assert!(failures.is_empty());
        assert!(handle.is_built().await);
        let snapshot = handle.snapshot().await.unwrap();
        assert_eq!(snapshot.node_count(), 3);
        assert_eq!(snapshot.edge_count(), 2);
    }

    #[tokio::test]
    async fn readers_keep_their_snapshot_across_a_swap() {
        let sources = Arc::new(line_network(&[("1", vec!["101", "102", "103"])]));
        let handle = GraphHandle::new();
        handle
            .rebuild(sources.clone(), BuildConfig::new(EdgePolicy::Adjacency))
            .await
            .unwrap();

        let before = handle.snapshot().await.unwrap();
        handle
            .rebuild(sources, BuildConfig::new(EdgePolicy::AllPairsForward))
            .await
            .unwrap();
        let after = handle.snapshot().await.unwrap();

        assert_eq!(before.policy(), EdgePolicy::Adjacency);
        assert_eq!(before.successors(&complex("101")).unwrap().len(), 1);
        assert_eq!(after.policy(), EdgePolicy::AllPairsForward);
        assert_eq!(after.successors(&complex("101")).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn publish_returns_previous_snapshot() {
        let network = line_network(&[("1", vec!["101", "102"])]);
        let first = build_network(&network, &BuildConfig::new(EdgePolicy::Adjacency)).snapshot;
        let second = build_network(&network, &BuildConfig::default()).snapshot;

        let handle = GraphHandle::from_snapshot(first.clone());
        let previous = handle.publish(second.clone()).await;

        assert_eq!(previous.as_deref(), Some(&first));
        assert_eq!(*handle.snapshot().await.unwrap(), second);
    }
}
