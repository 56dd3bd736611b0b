//! GTFS schedule tables: stops, trips and stop times.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{Direction, RouteId, StopId};

use super::error::SourceError;
use super::{open, read_rows};

pub const STOPS_FILE: &str = "stops.txt";
pub const TRIPS_FILE: &str = "trips.txt";
pub const STOP_TIMES_FILE: &str = "stop_times.txt";

/// Row of `stops.txt`. Columns other than these are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StopRow {
    pub stop_id: StopId,
    pub stop_name: String,
}

/// Row of `trips.txt`.
#[derive(Debug, Clone, Deserialize)]
pub struct TripRow {
    pub route_id: RouteId,
    pub trip_id: String,
    pub direction_id: Direction,
}

/// Row of `stop_times.txt`.
#[derive(Debug, Clone, Deserialize)]
pub struct StopTimeRow {
    pub trip_id: String,
    pub stop_id: StopId,
    pub stop_sequence: u32,
}

/// One scheduled run of a route in one direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub trip_id: String,
    pub route: RouteId,
    pub direction: Direction,
}

/// A call at a stop, with its position in the trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTime {
    pub stop_id: StopId,
    pub sequence: u32,
}

/// The schedule tables the graph is built from, indexed for lookup.
///
/// Trips keep their `trips.txt` order, which is what "first trip" means
/// for route sequencing.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    stop_names: HashMap<StopId, String>,
    trips: Vec<Trip>,
    /// (route, direction) -> indices into `trips`, in source order.
    trips_by_route: HashMap<(RouteId, Direction), Vec<usize>>,
    /// Routes in order of first appearance in `trips.txt`.
    routes: Vec<RouteId>,
    stop_times: HashMap<String, Vec<StopTime>>,
}

impl Schedule {
    /// Build a schedule from already-parsed rows.
    ///
    /// Stop times may reference stops missing from `stops`; those stops
    /// simply have no display name.
    pub fn from_rows(
        stops: Vec<StopRow>,
        trips: Vec<TripRow>,
        stop_times: Vec<StopTimeRow>,
    ) -> Self {
        let stop_names = stops
            .into_iter()
            .map(|row| (row.stop_id, row.stop_name))
            .collect();

        let mut schedule_trips = Vec::with_capacity(trips.len());
        let mut trips_by_route: HashMap<(RouteId, Direction), Vec<usize>> = HashMap::new();
        let mut routes = Vec::new();

        for (idx, row) in trips.into_iter().enumerate() {
            if !routes.contains(&row.route_id) {
                routes.push(row.route_id.clone());
            }
            trips_by_route
                .entry((row.route_id.clone(), row.direction_id))
                .or_default()
                .push(idx);
            schedule_trips.push(Trip {
                trip_id: row.trip_id,
                route: row.route_id,
                direction: row.direction_id,
            });
        }

        let mut by_trip: HashMap<String, Vec<StopTime>> = HashMap::new();
        for row in stop_times {
            by_trip.entry(row.trip_id).or_default().push(StopTime {
                stop_id: row.stop_id,
                sequence: row.stop_sequence,
            });
        }

        Self {
            stop_names,
            trips: schedule_trips,
            trips_by_route,
            routes,
            stop_times: by_trip,
        }
    }

    /// Parse the three tables from CSV readers.
    pub fn from_readers<S: Read, T: Read, U: Read>(
        stops: S,
        trips: T,
        stop_times: U,
    ) -> Result<Self, SourceError> {
        let stops = read_rows(STOPS_FILE, stops)?;
        let trips = read_rows(TRIPS_FILE, trips)?;
        let stop_times = read_rows(STOP_TIMES_FILE, stop_times)?;
        Ok(Self::from_rows(stops, trips, stop_times))
    }

    /// Load `stops.txt`, `trips.txt` and `stop_times.txt` from a GTFS directory.
    pub fn load(dir: &Path) -> Result<Self, SourceError> {
        Self::from_readers(
            open(&dir.join(STOPS_FILE))?,
            open(&dir.join(TRIPS_FILE))?,
            open(&dir.join(STOP_TIMES_FILE))?,
        )
    }

    /// Display name of a stop, exact match only.
    pub fn stop_name(&self, stop: &StopId) -> Option<&str> {
        self.stop_names.get(stop).map(String::as_str)
    }

    /// The full stop ID → name table.
    pub fn stop_names(&self) -> &HashMap<StopId, String> {
        &self.stop_names
    }

    /// Every route that has at least one trip, in first-seen order.
    pub fn routes(&self) -> &[RouteId] {
        &self.routes
    }

    /// All trips in source order.
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Trips of a route in one direction, in source order.
    pub fn trips_for(&self, route: &RouteId, direction: Direction) -> impl Iterator<Item = &Trip> {
        self.trips_by_route
            .get(&(route.clone(), direction))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&idx| &self.trips[idx])
    }

    /// Stop times of a trip in source order (not sorted by sequence).
    pub fn stop_times(&self, trip_id: &str) -> &[StopTime] {
        self.stop_times
            .get(trip_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOPS: &str = "stop_id,stop_name,stop_lat,stop_lon\n\
        A34,Times Sq,40.75,-73.98\n\
        A34N,Times Sq,40.75,-73.98\n\
        A33N,34 St,40.74,-73.99\n";

    const TRIPS: &str = "route_id,trip_id,service_id,direction_id\n\
        A,t1,wkd,0\n\
        C,t2,wkd,1\n\
        A,t3,wkd,0\n";

    const STOP_TIMES: &str = "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
        t1,08:00:00,08:00:00,A33N,2\n\
        t1,07:58:00,07:58:00,A34N,1\n\
        t2,09:00:00,09:00:00,Z99S,1\n";

    fn schedule() -> Schedule {
        Schedule::from_readers(STOPS.as_bytes(), TRIPS.as_bytes(), STOP_TIMES.as_bytes()).unwrap()
    }

    fn route(s: &str) -> RouteId {
        RouteId::new(s).unwrap()
    }

    #[test]
    fn parses_names_and_ignores_extra_columns() {
        let s = schedule();
        assert_eq!(s.stop_names().len(), 3);
        assert_eq!(s.stop_name(&StopId::parse("A33N").unwrap()), Some("34 St"));
        assert_eq!(s.stop_name(&StopId::parse("A33").unwrap()), None);
    }

    #[test]
    fn routes_in_first_seen_order() {
        let s = schedule();
        assert_eq!(s.routes(), &[route("A"), route("C")]);
    }

    #[test]
    fn trips_for_keeps_source_order() {
        let s = schedule();
        let ids: Vec<&str> = s
            .trips_for(&route("A"), Direction::Zero)
            .map(|t| t.trip_id.as_str())
            .collect();
        assert_eq!(ids, vec!["t1", "t3"]);
        assert_eq!(s.trips_for(&route("A"), Direction::One).count(), 0);
        assert_eq!(s.trips_for(&route("Q"), Direction::Zero).count(), 0);
    }

    #[test]
    fn stop_times_grouped_by_trip() {
        let s = schedule();
        assert_eq!(s.stop_times("t1").len(), 2);
        assert!(s.stop_times("t3").is_empty());
    }

    #[test]
    fn stop_times_may_reference_unknown_stops() {
        let s = schedule();
        let calls = s.stop_times("t2");
        assert_eq!(calls.len(), 1);
        assert_eq!(s.stop_name(&calls[0].stop_id), None);
    }

    #[test]
    fn bad_direction_is_fatal() {
        let trips = "route_id,trip_id,direction_id\nA,t1,2\n";
        let err = Schedule::from_readers(STOPS.as_bytes(), trips.as_bytes(), STOP_TIMES.as_bytes())
            .unwrap_err();
        assert!(matches!(err, SourceError::Csv { file: TRIPS_FILE, .. }));
    }

    #[test]
    fn missing_column_is_fatal() {
        let stop_times = "trip_id,stop_id\nt1,A34N\n";
        let err = Schedule::from_readers(STOPS.as_bytes(), TRIPS.as_bytes(), stop_times.as_bytes())
            .unwrap_err();
        assert!(matches!(err, SourceError::Csv { file: STOP_TIMES_FILE, .. }));
    }

    #[test]
    fn load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(STOPS_FILE), STOPS).unwrap();
        std::fs::write(dir.path().join(TRIPS_FILE), TRIPS).unwrap();
        std::fs::write(dir.path().join(STOP_TIMES_FILE), STOP_TIMES).unwrap();

        let s = Schedule::load(dir.path()).unwrap();
        assert_eq!(s.trips().len(), 3);
    }

    #[test]
    fn load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Schedule::load(dir.path()).unwrap_err();
        match err {
            SourceError::Io { path, .. } => assert!(path.ends_with(STOPS_FILE)),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
