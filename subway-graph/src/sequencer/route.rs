//! Ordered stops of a route's representative trip.

use tracing::{debug, trace};

use crate::domain::{Direction, RouteId, StopId};
use crate::sources::{Schedule, StopTime, Trip};

use super::config::{SequencerConfig, TripSelection};

/// Produces the ordered raw stops of each (route, direction).
#[derive(Debug, Clone, Copy)]
pub struct RouteSequencer<'a> {
    schedule: &'a Schedule,
    config: &'a SequencerConfig,
}

impl<'a> RouteSequencer<'a> {
    pub fn new(schedule: &'a Schedule, config: &'a SequencerConfig) -> Self {
        Self { schedule, config }
    }

    /// The trip that represents `route` in `direction`, if it has any.
    pub fn select_trip(&self, route: &RouteId, direction: Direction) -> Option<&'a Trip> {
        let schedule = self.schedule;
        let mut trips = schedule.trips_for(route, direction);

        match self.config.selection_for(route) {
            TripSelection::FirstListed => trips.next(),
            TripSelection::MostStops => {
                let mut best: Option<(&Trip, usize)> = None;
                for trip in trips {
                    let count = schedule.stop_times(&trip.trip_id).len();
                    let better = best.is_none_or(|(current, most)| {
                        count > most || (count == most && trip.trip_id < current.trip_id)
                    });
                    if count > 0 && better {
                        best = Some((trip, count));
                    }
                }
                best.map(|(trip, _)| trip)
            }
        }
    }

    /// Stops of the representative trip, sorted by `stop_sequence`.
    ///
    /// Stop times sharing a sequence position keep their file order.
    /// Returns an empty sequence when the route has no trip in `direction`.
    pub fn ordered_stops(&self, route: &RouteId, direction: Direction) -> Vec<StopId> {
        let Some(trip) = self.select_trip(route, direction) else {
            trace!(route = %route, direction = %direction, "No trip for route direction");
            return Vec::new();
        };

        let mut calls: Vec<&StopTime> = self.schedule.stop_times(&trip.trip_id).iter().collect();
        calls.sort_by_key(|c| c.sequence);

        if let Some(pair) = calls.windows(2).find(|w| w[0].sequence == w[1].sequence) {
            debug!(
                route = %route,
                trip = %trip.trip_id,
                sequence = pair[0].sequence,
                "Trip repeats a stop_sequence; keeping file order"
            );
        }

        trace!(
            route = %route,
            direction = %direction,
            trip = %trip.trip_id,
            stops = calls.len(),
            "Selected representative trip"
        );

        calls.into_iter().map(|c| c.stop_id.clone()).collect()
    }
}
