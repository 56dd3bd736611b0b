//! Source table loading.
//!
//! Reads the GTFS schedule (`stops.txt`, `trips.txt`, `stop_times.txt`) and
//! the station complex registry. Everything is read once, fully, into
//! memory; any malformed row aborts the load.

mod error;
mod registry;
mod schedule;

#[cfg(test)]
pub(crate) mod fixtures;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::complexes::ComplexResolver;
use crate::config::SourcePaths;
use crate::sequencer::{RouteSequencer, SequencerConfig};

pub use error::SourceError;
pub use registry::{ComplexRecord, REGISTRY_FILE, load_registry, read_registry};
pub use schedule::{
    STOP_TIMES_FILE, STOPS_FILE, Schedule, StopRow, StopTime, StopTimeRow, TRIPS_FILE, Trip,
    TripRow,
};

/// Everything the graph builder reads: the schedule and the complex resolver.
#[derive(Debug)]
pub struct NetworkSources {
    pub schedule: Schedule,
    pub resolver: ComplexResolver,
}

impl NetworkSources {
    /// Combine an already-loaded schedule and registry.
    ///
    /// Complex display names come from the schedule's stop table.
    pub fn new(schedule: Schedule, registry: Vec<ComplexRecord>) -> Self {
        let resolver = ComplexResolver::new(registry, schedule.stop_names().clone());
        Self { schedule, resolver }
    }

    /// Load the GTFS directory and registry file named in `paths`.
    pub fn load(paths: &SourcePaths) -> Result<Self, SourceError> {
        let schedule = Schedule::load(&paths.gtfs_dir)?;
        let registry = load_registry(&paths.complexes_csv)?;

        info!(
            stops = schedule.stop_names().len(),
            trips = schedule.trips().len(),
            routes = schedule.routes().len(),
            complexes = registry.len(),
            "Loaded transit sources"
        );

        Ok(Self::new(schedule, registry))
    }

    /// A sequencer over this schedule.
    pub fn sequencer<'a>(&'a self, config: &'a SequencerConfig) -> RouteSequencer<'a> {
        RouteSequencer::new(&self.schedule, config)
    }
}

pub(crate) fn open(path: &Path) -> Result<BufReader<File>, SourceError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Deserialize every row of a CSV table, trimming fields and headers.
pub(crate) fn read_rows<T: DeserializeOwned, R: Read>(
    file: &'static str,
    reader: R,
) -> Result<Vec<T>, SourceError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize()
        .map(|row| row.map_err(|source| SourceError::Csv { file, source }))
        .collect()
}
