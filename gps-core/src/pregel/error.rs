//! Error types for the superstep engine
//!
//! A round itself never fails; these errors come from algorithm selection
//! (rejected before any round runs), configuration, and the run driver.

use thiserror::Error;

use crate::graph::VertexId;

/// Errors raised around superstep execution
#[derive(Debug, Error)]
pub enum PregelError {
    /// The driver hit its superstep cap before the halt condition held
    #[error("Max supersteps exceeded: {0}")]
    MaxSuperstepsExceeded(usize),

    /// Algorithm tag not recognised
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Source vertex is not in the graph
    #[error("Source vertex {0} does not exist in the graph")]
    MissingSource(VertexId),

    /// Algorithm needs at least one vertex
    #[error("Graph has no vertices")]
    EmptyGraph,

    /// Invalid engine or driver configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PregelError {
    /// Create an unknown algorithm error
    pub fn unknown_algorithm(tag: impl Into<String>) -> Self {
        Self::UnknownAlgorithm(tag.into())
    }

    /// Create a config error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }
}

#[cfg(test)]
mod tests {
    // Ensure errors are Send + Sync (compile-time check)
    static_assertions::assert_impl_all!(super::PregelError: Send, Sync);
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PregelError::MaxSuperstepsExceeded(100);
        assert_eq!(format!("{}", err), "Max supersteps exceeded: 100");

        let err = PregelError::MissingSource(9);
        assert_eq!(err.to_string(), "Source vertex 9 does not exist in the graph");
    }

    #[test]
    fn test_helper_constructors() {
        assert!(matches!(
            PregelError::unknown_algorithm("astar"),
            PregelError::UnknownAlgorithm(tag) if tag == "astar"
        ));
        assert_eq!(
            PregelError::config_error("bad").to_string(),
            "Configuration error: bad"
        );
    }
}
