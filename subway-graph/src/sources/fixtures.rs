//! Small in-memory networks shared by tests.
//!
//! Registry rows list unsuffixed stop IDs; stop times use N for direction 0
//! and S for direction 1, the way the subway feed does.

use crate::domain::{ComplexId, RouteId, StopId};

use super::{NetworkSources, Schedule, read_registry};

pub fn complex(s: &str) -> ComplexId {
    ComplexId::new(s).unwrap()
}

pub fn route(s: &str) -> RouteId {
    RouteId::new(s).unwrap()
}

pub fn stop(s: &str) -> StopId {
    StopId::parse(s).unwrap()
}

pub fn ids(v: &[&str]) -> Vec<ComplexId> {
    v.iter().map(|s| complex(s)).collect()
}

pub fn routes(v: &[&str]) -> Vec<RouteId> {
    v.iter().map(|s| route(s)).collect()
}

/// Network described by `(route, [base stop IDs in direction 0 order])`.
///
/// Each route gets one trip per direction; direction 1 runs the stops in
/// reverse. Stop `Xnn` belongs to complex `Xnn` named "Xnn St".
pub fn line_network<R: AsRef<str>, S: AsRef<str>>(lines: &[(R, Vec<S>)]) -> NetworkSources {
    let mut stops = String::from("stop_id,stop_name\n");
    let mut registry = String::from("Complex ID,Number Of Stations In Complex,GTFS Stop IDs\n");
    let mut trips = String::from("route_id,trip_id,direction_id\n");
    let mut stop_times = String::from("trip_id,stop_id,stop_sequence\n");
    let mut seen: Vec<&str> = Vec::new();

    for (route, line) in lines {
        let route: &str = route.as_ref();
        for base in line.iter().map(AsRef::<str>::as_ref) {
            if !seen.contains(&base) {
                seen.push(base);
                stops.push_str(&format!("{base},{base} St\n"));
                registry.push_str(&format!("{base},1,{base}\n"));
            }
        }

        let north = format!("{route}-north");
        let south = format!("{route}-south");
        trips.push_str(&format!("{route},{north},0\n{route},{south},1\n"));
        for (seq, base) in line.iter().map(AsRef::<str>::as_ref).enumerate() {
            stop_times.push_str(&format!("{north},{base}N,{}\n", seq + 1));
        }
        for (seq, base) in line.iter().rev().map(AsRef::<str>::as_ref).enumerate() {
            stop_times.push_str(&format!("{south},{base}S,{}\n", seq + 1));
        }
    }

    sources(&stops, &trips, &stop_times, &registry)
}

/// Parse sources from CSV text.
pub fn sources(stops: &str, trips: &str, stop_times: &str, registry: &str) -> NetworkSources {
    let schedule =
        Schedule::from_readers(stops.as_bytes(), trips.as_bytes(), stop_times.as_bytes()).unwrap();
    let registry = read_registry(registry.as_bytes()).unwrap();
    NetworkSources::new(schedule, registry)
}
