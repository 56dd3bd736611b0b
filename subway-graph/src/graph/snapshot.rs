//! Immutable graph snapshot.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{ComplexId, Direction, RouteId, StopId};

use super::policy::EdgePolicy;

/// A station complex in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: ComplexId,
    pub name: String,
    /// Member stop IDs of the complex.
    pub stop_ids: Vec<StopId>,
}

/// A connection between two complexes and the lines serving it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge<'a> {
    pub from: &'a ComplexId,
    pub to: &'a ComplexId,
    /// Sorted route IDs.
    pub lines: &'a [RouteId],
}

/// The complete node and edge set produced by one build.
///
/// Nodes and adjacency are kept in ordered maps so iteration, and therefore
/// search, is deterministic. Under [`EdgePolicy::Adjacency`] every edge is
/// stored under both endpoints with the same line list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSnapshot {
    policy: EdgePolicy,
    nodes: BTreeMap<ComplexId, GraphNode>,
    adjacency: BTreeMap<ComplexId, BTreeMap<ComplexId, Vec<RouteId>>>,
    /// Incoming neighbours, directed graphs only.
    incoming: BTreeMap<ComplexId, BTreeSet<ComplexId>>,
    edge_count: usize,
    sequences: BTreeMap<(RouteId, Direction), Vec<ComplexId>>,
}

impl GraphSnapshot {
    /// Assemble a snapshot from accumulated build state.
    ///
    /// Edge keys are `(from, to)`; for undirected policies each pair
    /// appears once. Line sets become sorted lists here.
    pub(crate) fn from_parts(
        policy: EdgePolicy,
        nodes: BTreeMap<ComplexId, GraphNode>,
        edges: BTreeMap<(ComplexId, ComplexId), BTreeSet<RouteId>>,
        sequences: BTreeMap<(RouteId, Direction), Vec<ComplexId>>,
    ) -> Self {
        let edge_count = edges.len();
        let mut adjacency: BTreeMap<ComplexId, BTreeMap<ComplexId, Vec<RouteId>>> =
            BTreeMap::new();
        let mut incoming: BTreeMap<ComplexId, BTreeSet<ComplexId>> = BTreeMap::new();

        for ((from, to), lines) in edges {
            let lines: Vec<RouteId> = lines.into_iter().collect();

            if policy.is_directed() {
                incoming.entry(to.clone()).or_default().insert(from.clone());
            } else {
                adjacency
                    .entry(to.clone())
                    .or_default()
                    .insert(from.clone(), lines.clone());
            }
            adjacency.entry(from).or_default().insert(to, lines);
        }

        Self {
            policy,
            nodes,
            adjacency,
            incoming,
            edge_count,
            sequences,
        }
    }

    /// The policy this snapshot was built with.
    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    pub fn is_directed(&self) -> bool {
        self.policy.is_directed()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges; an undirected edge counts once.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, id: &ComplexId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &ComplexId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// All nodes in complex ID order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// All edges. Undirected edges are reported once, with `from <= to`.
    pub fn edges(&self) -> impl Iterator<Item = GraphEdge<'_>> {
        let directed = self.is_directed();
        self.adjacency.iter().flat_map(move |(from, targets)| {
            targets
                .iter()
                .filter(move |(to, _)| directed || from <= *to)
                .map(move |(to, lines)| GraphEdge {
                    from,
                    to,
                    lines,
                })
        })
    }

    /// Every route that contributed a sequence, sorted.
    pub fn routes(&self) -> Vec<&RouteId> {
        let routes: BTreeSet<&RouteId> = self.sequences.keys().map(|(route, _)| route).collect();
        routes.into_iter().collect()
    }

    /// The complex sequence a route contributed in one direction, after
    /// resolution and collapsing of consecutive repeats.
    pub fn route_complexes(&self, route: &RouteId, direction: Direction) -> Option<&[ComplexId]> {
        self.sequences
            .get(&(route.clone(), direction))
            .map(|v| v.as_slice())
    }

    /// Direct neighbours reachable from `id` in one hop, in ID order.
    pub(crate) fn neighbors<'a>(
        &'a self,
        id: &ComplexId,
    ) -> impl Iterator<Item = &'a ComplexId> + use<'a> {
        self.adjacency.get(id).into_iter().flat_map(|targets| targets.keys())
    }

    /// Complexes with a directed edge into `id`. Empty for undirected graphs.
    pub(crate) fn incoming<'a>(
        &'a self,
        id: &ComplexId,
    ) -> impl Iterator<Item = &'a ComplexId> + use<'a> {
        self.incoming.get(id).into_iter().flatten()
    }

    /// Lines on edge `from → to`, if the edge exists.
    pub(crate) fn edge_lines(&self, from: &ComplexId, to: &ComplexId) -> Option<&[RouteId]> {
        self.adjacency
            .get(from)
            .and_then(|targets| targets.get(to))
            .map(|lines| lines.as_slice())
    }
}
