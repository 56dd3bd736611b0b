//! Station complex registry (`Complexes.csv`).

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{ComplexId, StopId};

use super::error::SourceError;
use super::{open, read_rows};

pub const REGISTRY_FILE: &str = "Complexes.csv";

#[derive(Debug, Deserialize)]
struct ComplexRow {
    #[serde(rename = "Complex ID")]
    complex_id: ComplexId,
    #[serde(rename = "Number Of Stations In Complex")]
    num_stations: u32,
    #[serde(rename = "GTFS Stop IDs")]
    gtfs_stop_ids: String,
}

/// One registry entry: a complex and the raw stops grouped under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexRecord {
    pub id: ComplexId,
    pub num_stations: u32,
    /// Member stop IDs in declared order.
    pub members: Vec<StopId>,
}

impl ComplexRecord {
    fn from_row(row: ComplexRow) -> Result<Self, SourceError> {
        let members = row
            .gtfs_stop_ids
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                StopId::parse(s).map_err(|_| SourceError::InvalidMember {
                    complex: row.complex_id.clone(),
                    value: s.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: row.complex_id,
            num_stations: row.num_stations,
            members,
        })
    }
}

/// Parse registry rows from a CSV reader.
///
/// A missing column, an unparsable station count, an invalid member or a
/// repeated complex ID fails the whole load.
pub fn read_registry<R: Read>(reader: R) -> Result<Vec<ComplexRecord>, SourceError> {
    let rows: Vec<ComplexRow> = read_rows(REGISTRY_FILE, reader)?;

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        if !seen.insert(row.complex_id.clone()) {
            return Err(SourceError::DuplicateComplex(row.complex_id));
        }
        records.push(ComplexRecord::from_row(row)?);
    }

    Ok(records)
}

/// Load the registry from a file.
pub fn load_registry(path: &Path) -> Result<Vec<ComplexRecord>, SourceError> {
    read_registry(open(path)?)
}
