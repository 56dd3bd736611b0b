//! Source loading error types.

use std::path::PathBuf;

use crate::domain::ComplexId;

/// Errors raised while reading schedule or registry tables.
///
/// All of these are fatal: the graph cannot be built from a source that
/// fails to load.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// File could not be opened
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row is missing a required column or has an unparsable value
    #[error("malformed row in {file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    /// A registry member list contains an invalid stop ID
    #[error("complex {complex} lists invalid stop ID {value:?}")]
    InvalidMember { complex: ComplexId, value: String },

    /// The same complex ID appears on more than one registry row
    #[error("complex {0} is declared more than once")]
    DuplicateComplex(ComplexId),
}
