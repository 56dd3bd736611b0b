//! Graph access errors.

/// Errors from the shared graph handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// No snapshot has been published yet
    #[error("graph has not been built")]
    NotBuilt,

    /// The background build task panicked or was cancelled
    #[error("graph build task failed: {0}")]
    BuildTask(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(GraphError::NotBuilt.to_string(), "graph has not been built");
        assert_eq!(
            GraphError::BuildTask("panicked".into()).to_string(),
            "graph build task failed: panicked"
        );
    }
}
