//! Edge construction policies.

use std::fmt;
use std::str::FromStr;

/// How a route's complex sequence becomes graph edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgePolicy {
    /// Undirected edges between consecutive complexes only: literal track
    /// adjacency, minimal edge set.
    Adjacency,

    /// A directed edge from each complex to every later complex on the same
    /// trip. A ride of any length on one line is a single hop, so fewest-hop
    /// paths minimise transfers rather than stops.
    #[default]
    AllPairsForward,
}

impl EdgePolicy {
    /// True if edges have an orientation.
    pub fn is_directed(self) -> bool {
        matches!(self, EdgePolicy::AllPairsForward)
    }
}

/// Error returned when parsing an unknown edge policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown edge policy {0:?}: expected \"adjacency\" or \"all-pairs\"")]
pub struct InvalidEdgePolicy(pub String);

impl FromStr for EdgePolicy {
    type Err = InvalidEdgePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "adjacency" | "adjacent" => Ok(EdgePolicy::Adjacency),
            "all-pairs" | "all-pairs-forward" => Ok(EdgePolicy::AllPairsForward),
            other => Err(InvalidEdgePolicy(other.to_string())),
        }
    }
}

impl fmt::Display for EdgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgePolicy::Adjacency => f.write_str("adjacency"),
            EdgePolicy::AllPairsForward => f.write_str("all-pairs"),
        }
    }
}
