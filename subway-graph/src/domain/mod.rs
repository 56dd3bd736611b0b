//! Domain types for the subway graph.
//!
//! Identifiers coming out of the schedule and registry files are validated
//! once, at load time, so code that receives these types can trust them.

mod complex_id;
mod route;
mod stop_id;

pub use complex_id::{ComplexId, InvalidComplexId};
pub use route::{Direction, InvalidDirection, InvalidRouteId, RouteId};
pub use stop_id::{Heading, InvalidStopId, StopId};
