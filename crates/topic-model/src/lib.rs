//! # topic-model
//!
//! Embedding-driven topic extraction.
//!
//! Given documents and their pre-computed embeddings, this crate derives
//! human-readable topics in four stages:
//! - Dimensionality reduction: a neighborhood-preserving projection of the
//!   embeddings under cosine distance
//! - HDBSCAN density clustering of the reduced vectors, with an explicit
//!   outlier group
//! - Class-based TF-IDF term scoring over each cluster's concatenated text
//! - Packaging of ranked keyword labels, cluster sizes, and member
//!   documents into nested [`topic_types::TextRecord`]s
//!
//! The pipeline is a single blocking computation: no I/O, no persistence,
//! no async. Embedding generation and text cleaning happen upstream.
//!
//! ## Usage
//!
//! ```no_run
//! use topic_model::{TopicModel, TopicModelConfig};
//!
//! let model = TopicModel::new(TopicModelConfig::default())?;
//! # let documents: Vec<String> = vec![];
//! # let embeddings: Vec<Vec<f32>> = vec![];
//! let topics = model.extract_topics(&documents, &embeddings, "my-source")?;
//! # Ok::<(), topic_model::TopicModelError>(())
//! ```

pub mod cluster;
pub mod config;
pub mod ctfidf;
pub mod error;
pub mod package;
pub mod pipeline;
pub mod reduce;
pub mod similarity;
pub mod types;

pub use config::{
    ClusteringConfig, LabelingConfig, ReducerConfig, ScoringConfig, TopicModelConfig,
};
pub use error::TopicModelError;
pub use pipeline::TopicModel;
pub use similarity::{cosine_similarity, pairwise_cosine_distances};
pub use types::{ClusterId, Embedding, OUTLIER_CLUSTER, OUTLIER_LABEL};
