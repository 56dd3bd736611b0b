//! Route sequencing: the ordered stops of a representative trip.
//!
//! Each (route, direction) is represented by one trip. Most routes use the
//! first trip listed in the schedule; routes with branching or express/local
//! variants can be configured to use the trip with the most stops instead.
//! Neither choice is guaranteed to capture every branch of a route.

mod config;
mod route;

pub use config::{InvalidTripSelection, SequencerConfig, TripSelection};
pub use route::RouteSequencer;
