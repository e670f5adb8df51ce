//! Core aliases and constants for the pipeline.

/// An embedding vector, one per input document.
pub type Embedding = Vec<f32>;

/// A cluster label assigned by the density clusterer.
pub type ClusterId = i32;

/// Reserved label for points the clusterer left unassigned.
pub const OUTLIER_CLUSTER: ClusterId = -1;

/// Fixed topic label for the outlier cluster.
pub const OUTLIER_LABEL: &str = "~OUTLIERS~";
