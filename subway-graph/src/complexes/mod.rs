//! Station complexes.
//!
//! A complex groups the platforms and entrances of one logical station.
//! The resolver reconciles the schedule's raw, often direction-suffixed,
//! stop IDs with the registry's complex IDs.

mod resolver;

pub use resolver::{ComplexResolver, StationComplex, UNKNOWN_STATION};
