//! Subway origin/destination ridership statistics.
//!
//! A thin client for the public ridership dataset. Rows are keyed by the
//! same complex IDs the graph uses, but nothing here depends on the graph.

mod client;
mod error;
mod query;
mod types;

pub use client::{DEFAULT_BASE_URL, RidershipClient, RidershipClientConfig};
pub use error::RidershipError;
pub use query::{DayType, InvalidDayType, QUERY_COLUMNS, RidershipQuery};
pub use types::{RidershipRow, RidershipRowDto, parse_rows};
