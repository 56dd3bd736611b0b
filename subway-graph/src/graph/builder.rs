//! Graph construction from route sequences.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::complexes::ComplexResolver;
use crate::domain::{ComplexId, Direction, RouteId, StopId};
use crate::sequencer::RouteSequencer;
use crate::sources::NetworkSources;

use super::config::BuildConfig;
use super::policy::EdgePolicy;
use super::snapshot::{GraphNode, GraphSnapshot};

/// Why a single (route, direction) was left out of the graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route would add {new_edges} edges, exceeding the cap of {cap}")]
    EdgeCapExceeded { cap: usize, new_edges: usize },
}

/// A (route, direction) that failed and was excluded from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteFailure {
    pub route: RouteId,
    pub direction: Direction,
    pub error: RouteError,
}

/// Result of one build: the snapshot plus every contained failure.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub snapshot: GraphSnapshot,
    pub failures: Vec<RouteFailure>,
}

/// Turns route sequences into a [`GraphSnapshot`].
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder<'a> {
    resolver: &'a ComplexResolver,
    config: &'a BuildConfig,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(resolver: &'a ComplexResolver, config: &'a BuildConfig) -> Self {
        Self { resolver, config }
    }

    /// Build a snapshot from `routes` in both directions.
    ///
    /// Sequencing and resolution run in parallel per (route, direction);
    /// merging into the snapshot happens on the calling thread in job order,
    /// so the result does not depend on scheduling.
    pub fn build(&self, routes: &[RouteId], sequencer: &RouteSequencer<'_>) -> BuildOutcome {
        let jobs: Vec<(&RouteId, Direction)> = routes
            .iter()
            .flat_map(|route| Direction::ALL.into_iter().map(move |d| (route, d)))
            .collect();

        let sequenced: Vec<(&RouteId, Direction, Vec<ComplexId>)> = jobs
            .into_par_iter()
            .map(|(route, direction)| {
                let stops = sequencer.ordered_stops(route, direction);
                (route, direction, self.complex_sequence(&stops))
            })
            .collect();

        let mut acc = GraphAccumulator::new(self.resolver, self.config);
        let mut failures = Vec::new();

        for (route, direction, sequence) in sequenced {
            if let Err(error) = acc.add(route, direction, sequence) {
                warn!(
                    route = %route,
                    direction = %direction,
                    error = %error,
                    "Skipping route direction"
                );
                failures.push(RouteFailure {
                    route: route.clone(),
                    direction,
                    error,
                });
            }
        }

        let snapshot = acc.finish();
        debug!(
            policy = %snapshot.policy(),
            nodes = snapshot.node_count(),
            edges = snapshot.edge_count(),
            failures = failures.len(),
            "Graph build complete"
        );

        BuildOutcome { snapshot, failures }
    }

    /// Resolve raw stops to complexes, dropping unresolved stops and
    /// collapsing consecutive repeats of the same complex.
    pub fn complex_sequence(&self, stops: &[StopId]) -> Vec<ComplexId> {
        let mut sequence: Vec<ComplexId> = Vec::with_capacity(stops.len());

        for stop in stops {
            let Some(id) = self.resolver.resolve(stop) else {
                trace!(stop = %stop, "Dropping unresolved stop");
                continue;
            };
            if sequence.last() != Some(id) {
                sequence.push(id.clone());
            }
        }

        sequence
    }
}

/// Build a snapshot over every route in the schedule.
pub fn build_network(sources: &NetworkSources, config: &BuildConfig) -> BuildOutcome {
    let sequencer = sources.sequencer(&config.sequencer);
    GraphBuilder::new(&sources.resolver, config).build(sources.schedule.routes(), &sequencer)
}

/// Serial merge state for one build.
struct GraphAccumulator<'a> {
    resolver: &'a ComplexResolver,
    policy: EdgePolicy,
    max_edges: Option<usize>,
    nodes: BTreeMap<ComplexId, GraphNode>,
    edges: BTreeMap<(ComplexId, ComplexId), BTreeSet<RouteId>>,
    sequences: BTreeMap<(RouteId, Direction), Vec<ComplexId>>,
}

impl<'a> GraphAccumulator<'a> {
    fn new(resolver: &'a ComplexResolver, config: &BuildConfig) -> Self {
        Self {
            resolver,
            policy: config.edge_policy,
            max_edges: config.max_edges,
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            sequences: BTreeMap::new(),
        }
    }

    /// Edge keys a sequence contributes under the current policy.
    fn edge_keys(&self, sequence: &[ComplexId]) -> BTreeSet<(ComplexId, ComplexId)> {
        let mut keys = BTreeSet::new();

        match self.policy {
            EdgePolicy::Adjacency => {
                for pair in sequence.windows(2) {
                    let (a, b) = (&pair[0], &pair[1]);
                    if a == b {
                        continue;
                    }
                    let key = if a <= b { (a.clone(), b.clone()) } else { (b.clone(), a.clone()) };
                    keys.insert(key);
                }
            }
            EdgePolicy::AllPairsForward => {
                for (i, from) in sequence.iter().enumerate() {
                    for to in &sequence[i + 1..] {
                        if from != to {
                            keys.insert((from.clone(), to.clone()));
                        }
                    }
                }
            }
        }

        keys
    }

    fn add(
        &mut self,
        route: &RouteId,
        direction: Direction,
        sequence: Vec<ComplexId>,
    ) -> Result<(), RouteError> {
        let keys = self.edge_keys(&sequence);

        if let Some(cap) = self.max_edges {
            let new_edges = keys.iter().filter(|k| !self.edges.contains_key(*k)).count();
            if self.edges.len() + new_edges > cap {
                return Err(RouteError::EdgeCapExceeded { cap, new_edges });
            }
        }

        debug!(
            route = %route,
            direction = %direction,
            complexes = sequence.len(),
            edges = keys.len(),
            "Merging route sequence"
        );

        for id in &sequence {
            if !self.nodes.contains_key(id) {
                let node = GraphNode {
                    id: id.clone(),
                    name: self.resolver.name(id).to_string(),
                    stop_ids: self
                        .resolver
                        .member_stop_ids(id)
                        .map(<[StopId]>::to_vec)
                        .unwrap_or_default(),
                };
                self.nodes.insert(id.clone(), node);
            }
        }

        for key in keys {
            self.edges.entry(key).or_default().insert(route.clone());
        }

        if !sequence.is_empty() {
            self.sequences.insert((route.clone(), direction), sequence);
        }

        Ok(())
    }

    fn finish(self) -> GraphSnapshot {
        GraphSnapshot::from_parts(self.policy, self.nodes, self.edges, self.sequences)
    }
}
