//! Topic model configuration.

use serde::{Deserialize, Serialize};

use crate::error::TopicModelError;

/// Master configuration for the topic extraction pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopicModelConfig {
    /// Dimensionality reduction settings
    #[serde(default)]
    pub reducer: ReducerConfig,

    /// Density clustering settings
    #[serde(default)]
    pub clustering: ClusteringConfig,

    /// Term scoring settings
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Label generation settings
    #[serde(default)]
    pub labeling: LabelingConfig,
}

impl TopicModelConfig {
    /// Validate all stage configurations.
    pub fn validate(&self) -> Result<(), TopicModelError> {
        self.reducer.validate()?;
        self.clustering.validate()?;
        self.scoring.validate()?;
        self.labeling.validate()?;
        Ok(())
    }
}

/// Dimensionality reducer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReducerConfig {
    /// Neighborhood size for the k-NN graph
    #[serde(default = "default_n_neighbors")]
    pub n_neighbors: usize,

    /// Output dimensionality
    #[serde(default = "default_n_components")]
    pub n_components: usize,

    /// Number of SGD optimization epochs
    #[serde(default = "default_n_epochs")]
    pub n_epochs: usize,

    /// Initial SGD learning rate, decayed linearly to zero
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,

    /// Seed for the stochastic layout; fixed seed means reproducible output
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            n_neighbors: default_n_neighbors(),
            n_components: default_n_components(),
            n_epochs: default_n_epochs(),
            learning_rate: default_learning_rate(),
            seed: default_seed(),
        }
    }
}

impl ReducerConfig {
    /// Validate reducer parameters.
    pub fn validate(&self) -> Result<(), TopicModelError> {
        if self.n_neighbors < 2 {
            return Err(TopicModelError::Parameter(format!(
                "n_neighbors must be at least 2, got {}",
                self.n_neighbors
            )));
        }
        if self.n_components == 0 {
            return Err(TopicModelError::Parameter(
                "n_components must be positive".to_string(),
            ));
        }
        if self.n_epochs == 0 {
            return Err(TopicModelError::Parameter(
                "n_epochs must be positive".to_string(),
            ));
        }
        if self.learning_rate <= 0.0 {
            return Err(TopicModelError::Parameter(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}

fn default_n_neighbors() -> usize {
    15
}
fn default_n_components() -> usize {
    5
}
fn default_n_epochs() -> usize {
    200
}
fn default_learning_rate() -> f32 {
    1.0
}
fn default_seed() -> u64 {
    42
}

/// Density clustering configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusteringConfig {
    /// Minimum number of points to form a cluster
    #[serde(default = "default_min_cluster_size")]
    pub min_cluster_size: usize,

    /// Minimum samples for a point to count as a core point
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: default_min_cluster_size(),
            min_samples: default_min_samples(),
        }
    }
}

impl ClusteringConfig {
    /// Validate clustering parameters.
    pub fn validate(&self) -> Result<(), TopicModelError> {
        if self.min_cluster_size == 0 {
            return Err(TopicModelError::Parameter(
                "min_cluster_size must be positive".to_string(),
            ));
        }
        if self.min_samples == 0 {
            return Err(TopicModelError::Parameter(
                "min_samples must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_min_cluster_size() -> usize {
    3
}
fn default_min_samples() -> usize {
    1
}

/// Term scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Inclusive n-gram range, e.g. `(1, 1)` for unigrams only
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// How many of the highest-scoring terms to keep per cluster
    #[serde(default = "default_top_n_terms")]
    pub top_n_terms: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            ngram_range: default_ngram_range(),
            top_n_terms: default_top_n_terms(),
        }
    }
}

impl ScoringConfig {
    /// Validate scoring parameters.
    pub fn validate(&self) -> Result<(), TopicModelError> {
        let (lo, hi) = self.ngram_range;
        if lo == 0 || lo > hi {
            return Err(TopicModelError::Parameter(format!(
                "ngram_range ({lo}, {hi}) is invalid: bounds must be positive and ordered"
            )));
        }
        if self.top_n_terms == 0 {
            return Err(TopicModelError::Parameter(
                "top_n_terms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}
fn default_top_n_terms() -> usize {
    20
}

/// Label generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelingConfig {
    /// Number of top terms joined into a topic label
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

impl LabelingConfig {
    /// Validate labeling parameters.
    pub fn validate(&self) -> Result<(), TopicModelError> {
        if self.top_k == 0 {
            return Err(TopicModelError::Parameter(
                "top_k must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_top_k() -> usize {
    5
}
