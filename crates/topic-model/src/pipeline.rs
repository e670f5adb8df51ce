//! End-to-end topic extraction pipeline.
//!
//! One synchronous pass: reduce embeddings, cluster the reduced vectors,
//! score terms per cluster, package topic records. No partial results: the
//! first failing stage aborts the call.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use topic_types::TextRecord;

use crate::cluster;
use crate::config::TopicModelConfig;
use crate::ctfidf;
use crate::error::TopicModelError;
use crate::package;
use crate::reduce;
use crate::types::{ClusterId, Embedding};

/// Embedding-driven topic extractor.
///
/// # Example
/// ```
/// use topic_model::{TopicModel, TopicModelConfig};
///
/// let model = TopicModel::new(TopicModelConfig::default()).unwrap();
/// ```
pub struct TopicModel {
    config: TopicModelConfig,
}

impl TopicModel {
    /// Create a topic model, validating the configuration up front.
    pub fn new(config: TopicModelConfig) -> Result<Self, TopicModelError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Access the active configuration.
    pub fn config(&self) -> &TopicModelConfig {
        &self.config
    }

    /// Extract topics from documents and their pre-computed embeddings.
    ///
    /// `documents` and `embeddings` are parallel: embedding `i` belongs to
    /// document `i`. Returns one record per discovered cluster; every input
    /// document appears in exactly one record's children.
    ///
    /// # Errors
    /// [`TopicModelError::InputShape`] if the slices differ in length or are
    /// empty; otherwise whatever the failing stage reports.
    #[instrument(skip(self, documents, embeddings))]
    pub fn extract_topics(
        &self,
        documents: &[String],
        embeddings: &[Embedding],
        source_name: &str,
    ) -> Result<Vec<TextRecord>, TopicModelError> {
        if documents.is_empty() {
            return Err(TopicModelError::InputShape(
                "no documents supplied".to_string(),
            ));
        }
        if documents.len() != embeddings.len() {
            return Err(TopicModelError::InputShape(format!(
                "{} documents but {} embeddings",
                documents.len(),
                embeddings.len()
            )));
        }

        let reduced = reduce::reduce(embeddings, &self.config.reducer)?;
        let labels = cluster::cluster(&reduced, &self.config.clustering)?;

        let texts_per_cluster = concatenate_by_cluster(documents, &labels);
        let term_table =
            ctfidf::score_terms(&texts_per_cluster, documents.len(), &self.config.scoring)?;

        let records = package::package(
            documents,
            &labels,
            &term_table,
            &self.config.labeling,
            source_name,
        )?;

        debug!(
            documents = documents.len(),
            topics = records.len(),
            source_name = %source_name,
            "Extracted topics"
        );

        Ok(records)
    }
}

/// Concatenate document texts per cluster label, space-joined, members in
/// order of appearance.
fn concatenate_by_cluster(
    documents: &[String],
    labels: &[ClusterId],
) -> BTreeMap<ClusterId, String> {
    let mut texts: BTreeMap<ClusterId, String> = BTreeMap::new();
    for (doc_id, &label) in labels.iter().enumerate() {
        let entry = texts.entry(label).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(&documents[doc_id]);
    }
    texts
}
