//! Subway station complex graph.
//!
//! Loads a GTFS schedule and a station complex registry, builds an
//! immutable graph of complexes connected by the lines that run between
//! them, and answers neighbour, line and fewest-hop path queries.

pub mod complexes;
pub mod config;
pub mod domain;
pub mod graph;
pub mod ridership;
pub mod sequencer;
pub mod sources;
