//! Fewest-hop path search.
//!
//! Every edge costs one hop. Under [`EdgePolicy::AllPairsForward`] a hop is
//! a ride of any length on one line, so the shortest path minimises the
//! number of boardings rather than stations passed.
//!
//! [`EdgePolicy::AllPairsForward`]: super::EdgePolicy::AllPairsForward

use std::collections::{HashMap, VecDeque};

use crate::domain::ComplexId;

use super::snapshot::GraphSnapshot;

impl GraphSnapshot {
    /// One fewest-hop path from `from` to `to`, both ends included.
    ///
    /// Neighbours are expanded in ID order, so the same snapshot always
    /// returns the same path. Returns `None` if either end is not in the
    /// graph or `to` is unreachable.
    pub fn shortest_path(&self, from: &ComplexId, to: &ComplexId) -> Option<Vec<ComplexId>> {
        let start = &self.node(from)?.id;
        let goal = &self.node(to)?.id;

        if start == goal {
            return Some(vec![start.clone()]);
        }

        let mut parent: HashMap<&ComplexId, &ComplexId> = HashMap::new();
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current) {
                if next == start || parent.contains_key(next) {
                    continue;
                }
                parent.insert(next, current);

                if next == goal {
                    return Some(walk_back(&parent, start, goal));
                }
                queue.push_back(next);
            }
        }

        None
    }

    /// Every path from `from` to `to` with the minimum hop count, sorted.
    ///
    /// Empty when either end is unknown or no path exists.
    pub fn all_shortest_paths(&self, from: &ComplexId, to: &ComplexId) -> Vec<Vec<ComplexId>> {
        let (Some(start), Some(goal)) = (self.node(from), self.node(to)) else {
            return Vec::new();
        };
        let (start, goal) = (&start.id, &goal.id);

        if start == goal {
            return vec![vec![start.clone()]];
        }

        // Layered BFS recording every predecessor one level closer to the start
        let mut depth: HashMap<&ComplexId, usize> = HashMap::from([(start, 0)]);
        let mut preds: HashMap<&ComplexId, Vec<&ComplexId>> = HashMap::new();
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((current, d)) = queue.pop_front() {
            if let Some(&goal_depth) = depth.get(goal)
                && d >= goal_depth
            {
                break;
            }

            for next in self.neighbors(current) {
                match depth.get(next) {
                    None => {
                        depth.insert(next, d + 1);
                        preds.entry(next).or_default().push(current);
                        queue.push_back((next, d + 1));
                    }
                    Some(&seen) if seen == d + 1 => {
                        preds.entry(next).or_default().push(current);
                    }
                    Some(_) => {}
                }
            }
        }

        let mut paths = Vec::new();
        if preds.contains_key(goal) {
            let mut stack = vec![goal];
            collect_paths(&preds, start, &mut stack, &mut paths);
        }
        paths.sort();
        paths
    }
}

fn walk_back(
    parent: &HashMap<&ComplexId, &ComplexId>,
    start: &ComplexId,
    goal: &ComplexId,
) -> Vec<ComplexId> {
    let mut path = vec![goal.clone()];
    let mut current = goal;

    while current != start {
        let Some(&prev) = parent.get(current) else {
            break;
        };
        path.push(prev.clone());
        current = prev;
    }

    path.reverse();
    path
}

/// Depth-first walk over the predecessor DAG from the goal back to the start.
fn collect_paths<'a>(
    preds: &HashMap<&'a ComplexId, Vec<&'a ComplexId>>,
    start: &ComplexId,
    stack: &mut Vec<&'a ComplexId>,
    out: &mut Vec<Vec<ComplexId>>,
) {
    let Some(&current) = stack.last() else {
        return;
    };

    if current == start {
        out.push(stack.iter().rev().map(|&id| id.clone()).collect());
        return;
    }

    for &prev in preds.get(current).into_iter().flatten() {
        stack.push(prev);
        collect_paths(preds, start, stack, out);
        stack.pop();
    }
}
