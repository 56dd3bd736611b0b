//! Route (line) identifiers and travel directions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid route ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route ID: {reason}")]
pub struct InvalidRouteId {
    reason: &'static str,
}

/// A line label such as `A`, `4` or `GS`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteId(String);

impl RouteId {
    /// Create a route ID, trimming surrounding whitespace.
    pub fn new(s: &str) -> Result<Self, InvalidRouteId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidRouteId {
                reason: "route ID cannot be empty",
            });
        }
        Ok(RouteId(trimmed.to_string()))
    }

    /// Returns the route ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteId {
    type Error = InvalidRouteId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        RouteId::new(&s)
    }
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        id.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned for a `direction_id` other than 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction ID {0}: must be 0 or 1")]
pub struct InvalidDirection(pub u8);

/// GTFS `direction_id`: one of the two travel orientations of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    Zero,
    One,
}

impl Direction {
    /// Both directions, in ID order.
    pub const ALL: [Direction; 2] = [Direction::Zero, Direction::One];

    /// The numeric GTFS value.
    pub fn as_u8(self) -> u8 {
        match self {
            Direction::Zero => 0,
            Direction::One => 1,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Zero),
            1 => Ok(Direction::One),
            other => Err(InvalidDirection(other)),
        }
    }
}

impl From<Direction> for u8 {
    fn from(d: Direction) -> Self {
        d.as_u8()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
