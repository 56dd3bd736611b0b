//! Raw GTFS stop identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid stop ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop ID: {reason}")]
pub struct InvalidStopId {
    reason: &'static str,
}

/// Travel heading encoded as the last character of a directional stop ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    North,
    South,
}

impl Heading {
    /// The suffix character used in GTFS stop IDs.
    pub fn suffix(self) -> char {
        match self {
            Heading::North => 'N',
            Heading::South => 'S',
        }
    }

    fn from_suffix(c: char) -> Option<Self> {
        match c {
            'N' => Some(Heading::North),
            'S' => Some(Heading::South),
            _ => None,
        }
    }
}

/// A schedule-level stop identifier, possibly carrying an N/S suffix.
///
/// Platforms of the same station usually share a base ID and differ only
/// in their heading: `A34N` and `A34S` are the two sides of `A34`.
///
/// # Examples
///
/// ```
/// use subway_graph::domain::{Heading, StopId};
///
/// let stop = StopId::parse("A34N").unwrap();
/// assert_eq!(stop.heading(), Some(Heading::North));
/// assert_eq!(stop.base().unwrap().as_str(), "A34");
///
/// // Blank IDs are rejected
/// assert!(StopId::parse("  ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopId(String);

impl StopId {
    /// Parse a stop ID, trimming surrounding whitespace.
    ///
    /// The result must be non-empty and contain no inner whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStopId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStopId {
                reason: "stop ID cannot be empty",
            });
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(InvalidStopId {
                reason: "stop ID cannot contain whitespace",
            });
        }

        Ok(StopId(trimmed.to_string()))
    }

    /// Returns the stop ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The heading suffix, if any.
    ///
    /// A lone `N` or `S` is a stop named after the letter, not a suffix.
    pub fn heading(&self) -> Option<Heading> {
        if self.0.len() < 2 {
            return None;
        }
        self.0.chars().next_back().and_then(Heading::from_suffix)
    }

    /// The ID with its heading suffix removed, or `None` if it has none.
    pub fn base(&self) -> Option<StopId> {
        self.heading()
            .map(|_| StopId(self.0[..self.0.len() - 1].to_string()))
    }

    /// The ID with the given heading suffix appended.
    pub fn with_heading(&self, heading: Heading) -> StopId {
        let mut s = self.0.clone();
        s.push(heading.suffix());
        StopId(s)
    }
}

impl TryFrom<String> for StopId {
    type Error = InvalidStopId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        StopId::parse(&s)
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
