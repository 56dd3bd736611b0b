//! Graph build configuration.

use crate::sequencer::SequencerConfig;

use super::policy::EdgePolicy;

/// Configuration for one graph build.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildConfig {
    /// How route sequences become edges.
    pub edge_policy: EdgePolicy,

    /// Representative trip selection per route.
    pub sequencer: SequencerConfig,

    /// Upper bound on the number of edges.
    /// A route direction whose new edges would cross it is skipped.
    pub max_edges: Option<usize>,
}

impl BuildConfig {
    /// Create a new configuration with the given policy and default sequencing.
    pub fn new(edge_policy: EdgePolicy) -> Self {
        Self {
            edge_policy,
            ..Self::default()
        }
    }

    pub fn with_sequencer(mut self, sequencer: SequencerConfig) -> Self {
        self.sequencer = sequencer;
        self
    }

    pub fn with_max_edges(mut self, max_edges: usize) -> Self {
        self.max_edges = Some(max_edges);
        self
    }
}
