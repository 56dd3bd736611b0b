//! Trip selection configuration.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::domain::RouteId;

/// Routes whose first listed trip often misses branches or local stops.
const BRANCHING_ROUTES: [&str; 2] = ["A", "4"];

/// How to pick the representative trip of a (route, direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TripSelection {
    /// The first trip in schedule order.
    #[default]
    FirstListed,
    /// The trip with the most stop times; the smallest trip ID wins ties.
    MostStops,
}

/// Error returned when parsing an unknown trip selection name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown trip selection {0:?}: expected \"first-listed\" or \"most-stops\"")]
pub struct InvalidTripSelection(pub String);

impl FromStr for TripSelection {
    type Err = InvalidTripSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-listed" | "first" => Ok(TripSelection::FirstListed),
            "most-stops" | "longest" => Ok(TripSelection::MostStops),
            other => Err(InvalidTripSelection(other.to_string())),
        }
    }
}

impl fmt::Display for TripSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripSelection::FirstListed => f.write_str("first-listed"),
            TripSelection::MostStops => f.write_str("most-stops"),
        }
    }
}

/// Per-route trip selection strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequencerConfig {
    /// Strategy for routes without an override.
    pub default: TripSelection,

    /// Route-specific strategies.
    pub overrides: HashMap<RouteId, TripSelection>,
}

impl SequencerConfig {
    /// A config with no overrides.
    pub fn new(default: TripSelection) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Use `selection` for `route`.
    pub fn with_override(mut self, route: RouteId, selection: TripSelection) -> Self {
        self.overrides.insert(route, selection);
        self
    }

    /// The strategy that applies to `route`.
    pub fn selection_for(&self, route: &RouteId) -> TripSelection {
        self.overrides.get(route).copied().unwrap_or(self.default)
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        BRANCHING_ROUTES
            .iter()
            .filter_map(|r| RouteId::new(r).ok())
            .fold(Self::new(TripSelection::FirstListed), |config, route| {
                config.with_override(route, TripSelection::MostStops)
            })
    }
}
