//! Application configuration.
//!
//! Values come from the environment, with defaults matching the usual
//! data layout:
//!
//! | Variable                        | Meaning                                 |
//! |---------------------------------|-----------------------------------------|
//! | `SUBWAY_GTFS_DIR`               | Directory holding the GTFS tables       |
//! | `SUBWAY_COMPLEXES_CSV`          | Station complex registry file           |
//! | `SUBWAY_EDGE_POLICY`            | `adjacency` or `all-pairs`              |
//! | `SUBWAY_MOST_STOPS_ROUTES`      | Comma-separated routes using most-stops |
//! | `SUBWAY_DEFAULT_TRIP_SELECTION` | Selection for the remaining routes      |
//! | `SUBWAY_MAX_EDGES`              | Upper bound on graph edges              |

use std::path::PathBuf;

use crate::domain::{InvalidRouteId, RouteId};
use crate::graph::{BuildConfig, InvalidEdgePolicy};
use crate::sequencer::{InvalidTripSelection, SequencerConfig, TripSelection};

const DEFAULT_GTFS_DIR: &str = "data/gtfs_subway";
const DEFAULT_COMPLEXES_CSV: &str = "data/Complexes.csv";

/// Errors from reading configuration values.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: {source}")]
    EdgePolicy {
        var: &'static str,
        source: InvalidEdgePolicy,
    },

    #[error("{var}: {source}")]
    TripSelection {
        var: &'static str,
        source: InvalidTripSelection,
    },

    #[error("{var}: {source}")]
    Route {
        var: &'static str,
        source: InvalidRouteId,
    },

    #[error("{var}: expected a non-negative integer, got {value:?}")]
    Number { var: &'static str, value: String },
}

/// Where the source tables live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    /// Directory with `stops.txt`, `trips.txt` and `stop_times.txt`.
    pub gtfs_dir: PathBuf,

    /// Station complex registry CSV.
    pub complexes_csv: PathBuf,
}

impl SourcePaths {
    pub fn new(gtfs_dir: impl Into<PathBuf>, complexes_csv: impl Into<PathBuf>) -> Self {
        Self {
            gtfs_dir: gtfs_dir.into(),
            complexes_csv: complexes_csv.into(),
        }
    }
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self::new(DEFAULT_GTFS_DIR, DEFAULT_COMPLEXES_CSV)
    }
}

/// Everything the binary needs to load and build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub sources: SourcePaths,
    pub build: BuildConfig,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get("SUBWAY_GTFS_DIR") {
            config.sources.gtfs_dir = PathBuf::from(dir);
        }
        if let Some(path) = get("SUBWAY_COMPLEXES_CSV") {
            config.sources.complexes_csv = PathBuf::from(path);
        }

        if let Some(policy) = get("SUBWAY_EDGE_POLICY") {
            config.build.edge_policy = policy.parse().map_err(|source| ConfigError::EdgePolicy {
                var: "SUBWAY_EDGE_POLICY",
                source,
            })?;
        }

        if let Some(list) = get("SUBWAY_MOST_STOPS_ROUTES") {
            let mut sequencer = SequencerConfig::new(TripSelection::FirstListed);
            for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let route = RouteId::new(name).map_err(|source| ConfigError::Route {
                    var: "SUBWAY_MOST_STOPS_ROUTES",
                    source,
                })?;
                sequencer = sequencer.with_override(route, TripSelection::MostStops);
            }
            config.build.sequencer = sequencer;
        }

        if let Some(selection) = get("SUBWAY_DEFAULT_TRIP_SELECTION") {
            config.build.sequencer.default =
                selection.parse().map_err(|source| ConfigError::TripSelection {
                    var: "SUBWAY_DEFAULT_TRIP_SELECTION",
                    source,
                })?;
        }

        if let Some(value) = get("SUBWAY_MAX_EDGES") {
            let max_edges = value.trim().parse().map_err(|_| ConfigError::Number {
                var: "SUBWAY_MAX_EDGES",
                value: value.clone(),
            })?;
            config.build.max_edges = Some(max_edges);
        }

        Ok(config)
    }
}
