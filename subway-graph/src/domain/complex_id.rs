//! Station complex identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid complex ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid complex ID: {reason}")]
pub struct InvalidComplexId {
    reason: &'static str,
}

/// Identifier of a station complex, e.g. `618` for Times Sq-42 St.
///
/// Complex IDs are opaque strings assigned by the registry. The only
/// validation is that they must be non-empty after trimming.
///
/// # Examples
///
/// ```
/// use subway_graph::domain::ComplexId;
///
/// let id = ComplexId::new("618").unwrap();
/// assert_eq!(id.as_str(), "618");
/// assert!(id.is_numeric());
///
/// assert!(ComplexId::new(" ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComplexId(String);

impl ComplexId {
    /// Create a complex ID from a string.
    pub fn new(s: &str) -> Result<Self, InvalidComplexId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidComplexId {
                reason: "complex ID cannot be empty",
            });
        }
        Ok(ComplexId(trimmed.to_string()))
    }

    /// Returns the complex ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the ID is made up only of ASCII digits.
    pub fn is_numeric(&self) -> bool {
        self.0.bytes().all(|b| b.is_ascii_digit())
    }
}

impl TryFrom<String> for ComplexId {
    type Error = InvalidComplexId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ComplexId::new(&s)
    }
}

impl From<ComplexId> for String {
    fn from(id: ComplexId) -> Self {
        id.0
    }
}

impl fmt::Debug for ComplexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComplexId({})", self.0)
    }
}

impl fmt::Display for ComplexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
