//! Topic model error types.

use thiserror::Error;

/// Errors that can occur during topic extraction.
#[derive(Debug, Error)]
pub enum TopicModelError {
    /// Input has the wrong shape (empty, inconsistent dimensions, mismatched
    /// lengths, or too few documents for the requested neighborhood size).
    #[error("Input shape error: {0}")]
    InputShape(String),

    /// A tunable parameter is outside its valid range.
    #[error("Invalid parameter: {0}")]
    Parameter(String),

    /// A cluster's concatenated text produced no terms after tokenization
    /// and stopword filtering, leaving its term scores undefined.
    #[error("Cluster {cluster} has no scorable terms after stopword filtering")]
    DegenerateCluster {
        /// The offending cluster label.
        cluster: i32,
    },

    /// Clustering failed in a way that could not be degraded to all-noise.
    #[error("Clustering error: {0}")]
    Clustering(String),
}
