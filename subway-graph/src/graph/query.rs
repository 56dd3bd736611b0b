//! Read-only lookups and directions over a built snapshot.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::complexes::{ComplexResolver, UNKNOWN_STATION};
use crate::domain::{ComplexId, RouteId, StopId};

use super::snapshot::GraphSnapshot;

/// One station along a path, with the lines running to the next station.
/// The final step has no lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    pub complex: ComplexId,
    pub lines: Vec<RouteId>,
}

/// One hop of a path, with display names for both ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathSegment {
    pub from: ComplexId,
    pub from_name: String,
    pub to: ComplexId,
    pub to_name: String,
    pub lines: Vec<RouteId>,
}

impl GraphSnapshot {
    /// Complexes one hop from `id`: out-neighbours when directed, adjacent
    /// complexes otherwise. `None` if `id` is not in the graph.
    pub fn successors(&self, id: &ComplexId) -> Option<Vec<ComplexId>> {
        if !self.contains(id) {
            return None;
        }
        Some(self.neighbors(id).cloned().collect())
    }

    /// Sorted lines on the edge `a → b`, empty if there is no such edge.
    pub fn connecting_lines(&self, a: &ComplexId, b: &ComplexId) -> &[RouteId] {
        self.edge_lines(a, b).unwrap_or(&[])
    }

    /// Sorted union of lines on every edge touching `id`, in either direction.
    pub fn lines_at(&self, id: &ComplexId) -> Vec<RouteId> {
        let mut lines: BTreeSet<&RouteId> = BTreeSet::new();

        for next in self.neighbors(id) {
            lines.extend(self.connecting_lines(id, next));
        }
        for prev in self.incoming(id) {
            lines.extend(self.connecting_lines(prev, id));
        }

        lines.into_iter().cloned().collect()
    }

    /// Lines serving the complex a raw stop belongs to.
    pub fn lines_at_stop(&self, resolver: &ComplexResolver, stop: &StopId) -> Vec<RouteId> {
        resolver
            .resolve(stop)
            .map(|id| self.lines_at(id))
            .unwrap_or_default()
    }

    /// [`shortest_path`](Self::shortest_path) with the lines of each hop attached.
    pub fn shortest_path_with_lines(
        &self,
        from: &ComplexId,
        to: &ComplexId,
    ) -> Option<Vec<PathStep>> {
        let path = self.shortest_path(from, to)?;

        let steps = path
            .iter()
            .enumerate()
            .map(|(i, complex)| PathStep {
                complex: complex.clone(),
                lines: path
                    .get(i + 1)
                    .map(|next| self.connecting_lines(complex, next).to_vec())
                    .unwrap_or_default(),
            })
            .collect();

        Some(steps)
    }

    /// Human-readable directions for the shortest path, one instruction per line.
    pub fn directions(&self, from: &ComplexId, to: &ComplexId) -> Option<String> {
        let steps = self.shortest_path_with_lines(from, to)?;
        Some(self.format_directions(&steps))
    }

    /// Render path steps as directions.
    ///
    /// ```text
    /// Start at Times Sq-42 St (611)
    /// Take the N, Q, R, W trains to 14 St-Union Sq (602)
    /// ```
    ///
    /// A hop with no known lines is rendered as `Transfer at ...`.
    pub fn format_directions(&self, steps: &[PathStep]) -> String {
        let Some(first) = steps.first() else {
            return String::new();
        };

        let mut lines = vec![format!(
            "Start at {} ({})",
            self.display_name(&first.complex),
            first.complex
        )];

        for pair in steps.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            let name = self.display_name(&next.complex);

            if current.lines.is_empty() {
                lines.push(format!("Transfer at {} ({})", name, next.complex));
            } else {
                let joined = current
                    .lines
                    .iter()
                    .map(RouteId::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                lines.push(format!(
                    "Take the {} trains to {} ({})",
                    joined, name, next.complex
                ));
            }
        }

        lines.join("\n")
    }

    /// One segment per hop of `path`.
    pub fn path_segments(&self, path: &[ComplexId]) -> Vec<PathSegment> {
        path.windows(2)
            .map(|pair| {
                let (from, to) = (&pair[0], &pair[1]);
                PathSegment {
                    from: from.clone(),
                    from_name: self.display_name(from).to_string(),
                    to: to.clone(),
                    to_name: self.display_name(to).to_string(),
                    lines: self.connecting_lines(from, to).to_vec(),
                }
            })
            .collect()
    }

    /// Segments for every shortest path between two complexes.
    pub fn all_directions(&self, from: &ComplexId, to: &ComplexId) -> Vec<Vec<PathSegment>> {
        self.all_shortest_paths(from, to)
            .iter()
            .map(|path| self.path_segments(path))
            .collect()
    }

    /// First complex, in ID order, whose display name is exactly `name`.
    pub fn name_to_complex_id(&self, name: &str) -> Option<&ComplexId> {
        self.nodes().find(|node| node.name == name).map(|node| &node.id)
    }

    pub fn complex_id_to_name(&self, id: &ComplexId) -> Option<&str> {
        self.node(id).map(|node| node.name.as_str())
    }

    fn display_name(&self, id: &ComplexId) -> &str {
        self.complex_id_to_name(id).unwrap_or(UNKNOWN_STATION)
    }
}
