//! Raw stop → station complex resolution.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::domain::{ComplexId, Heading, StopId};
use crate::sources::ComplexRecord;

/// Name reported for a complex none of whose members has a known name.
pub const UNKNOWN_STATION: &str = "Unknown";

/// A logical station: one or more physically connected raw stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationComplex {
    pub id: ComplexId,
    /// Member stop IDs in registry order.
    pub members: Vec<StopId>,
    pub num_stations: u32,
    /// Display names of the members that have one, in member order.
    pub names: Vec<String>,
}

impl StationComplex {
    /// Primary display name: the first member's known name.
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or(UNKNOWN_STATION)
    }
}

/// Maps raw stop IDs, with or without N/S suffix, to station complexes.
///
/// Built once from the registry and the stop-name table. Every declared
/// member maps to its complex; a suffixed member (`A34N`) also registers
/// its base (`A34`) unless the base is itself declared elsewhere.
#[derive(Debug, Clone, Default)]
pub struct ComplexResolver {
    complexes: BTreeMap<ComplexId, StationComplex>,
    by_stop: HashMap<StopId, ComplexId>,
    stop_names: HashMap<StopId, String>,
}

impl ComplexResolver {
    /// Index the registry.
    pub fn new(records: Vec<ComplexRecord>, stop_names: HashMap<StopId, String>) -> Self {
        let mut by_stop = HashMap::new();

        // Explicit declarations first, so derived bases never shadow them
        let declared: HashSet<&StopId> = records.iter().flat_map(|r| &r.members).collect();
        for record in &records {
            for member in &record.members {
                if let Some(previous) = by_stop.insert(member.clone(), record.id.clone())
                    && previous != record.id
                {
                    debug!(
                        stop = %member,
                        previous = %previous,
                        complex = %record.id,
                        "Stop declared in more than one complex, keeping the later one"
                    );
                }
            }
        }

        for record in &records {
            for base in record.members.iter().filter_map(StopId::base) {
                if !declared.contains(&base) {
                    by_stop.entry(base).or_insert_with(|| record.id.clone());
                }
            }
        }

        let complexes = records
            .into_iter()
            .map(|record| {
                let names = record
                    .members
                    .iter()
                    .filter_map(|m| stop_names.get(m).cloned())
                    .collect();
                let complex = StationComplex {
                    id: record.id.clone(),
                    members: record.members,
                    num_stations: record.num_stations,
                    names,
                };
                (record.id, complex)
            })
            .collect();

        Self {
            complexes,
            by_stop,
            stop_names,
        }
    }

    /// Resolve a raw stop ID to its complex.
    ///
    /// Tries the exact ID; then, for a suffixed ID, its base; for an
    /// unsuffixed ID, the northbound variant.
    pub fn resolve(&self, stop: &StopId) -> Option<&ComplexId> {
        if let Some(id) = self.by_stop.get(stop) {
            return Some(id);
        }

        match stop.base() {
            Some(base) => self.by_stop.get(&base),
            None => self.by_stop.get(&stop.with_heading(Heading::North)),
        }
    }

    /// Resolve an unvalidated stop ID string. Invalid IDs resolve to nothing.
    pub fn resolve_str(&self, stop: &str) -> Option<&ComplexId> {
        StopId::parse(stop).ok().and_then(|s| self.resolve(&s))
    }

    /// Display name of a complex, or [`UNKNOWN_STATION`].
    pub fn name(&self, id: &ComplexId) -> &str {
        self.complexes
            .get(id)
            .map(StationComplex::name)
            .unwrap_or(UNKNOWN_STATION)
    }

    /// Names of every member stop that has one.
    pub fn station_names(&self, id: &ComplexId) -> Option<&[String]> {
        self.complexes.get(id).map(|c| c.names.as_slice())
    }

    /// Member stop IDs in registry order.
    pub fn member_stop_ids(&self, id: &ComplexId) -> Option<&[StopId]> {
        self.complexes.get(id).map(|c| c.members.as_slice())
    }

    /// Number of stations the registry says the complex contains.
    pub fn num_stations(&self, id: &ComplexId) -> Option<u32> {
        self.complexes.get(id).map(|c| c.num_stations)
    }

    /// Display name of a raw stop, with the same suffix fallbacks as [`resolve`](Self::resolve).
    pub fn stop_name(&self, stop: &StopId) -> Option<&str> {
        if let Some(name) = self.stop_names.get(stop) {
            return Some(name.as_str());
        }

        let fallback = match stop.base() {
            Some(base) => base,
            None => stop.with_heading(Heading::North),
        };
        self.stop_names.get(&fallback).map(String::as_str)
    }

    pub fn complex(&self, id: &ComplexId) -> Option<&StationComplex> {
        self.complexes.get(id)
    }

    /// All complexes in ID order.
    pub fn complexes(&self) -> impl Iterator<Item = &StationComplex> {
        self.complexes.values()
    }

    pub fn len(&self) -> usize {
        self.complexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.complexes.is_empty()
    }
}
