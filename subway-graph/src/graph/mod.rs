//! Station complex graph: construction, snapshots and queries.
//!
//! A build turns each route's representative stop sequence into complex
//! sequences and emits edges according to an [`EdgePolicy`]. The result is
//! an immutable [`GraphSnapshot`] that answers neighbour, line and path
//! queries without locking. [`GraphHandle`] holds the current snapshot and
//! swaps in rebuilt ones.

mod builder;
mod config;
mod error;
mod handle;
mod policy;
mod query;
mod search;
mod snapshot;

#[cfg(test)]
mod query_tests;

pub use builder::{BuildOutcome, GraphBuilder, RouteError, RouteFailure, build_network};
pub use config::BuildConfig;
pub use error::GraphError;
pub use handle::GraphHandle;
pub use policy::{EdgePolicy, InvalidEdgePolicy};
pub use query::{PathSegment, PathStep};
pub use snapshot::{GraphEdge, GraphNode, GraphSnapshot};
