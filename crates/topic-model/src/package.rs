//! Topic record assembly.
//!
//! Turns the cluster assignment and the per-cluster term table into one
//! output record per cluster: an underscore-joined keyword label, the
//! cluster size, and the member documents as nested child records.

use std::collections::BTreeMap;

use serde_json::json;
use tracing::debug;

use topic_types::TextRecord;

use crate::config::LabelingConfig;
use crate::error::TopicModelError;
use crate::types::{ClusterId, OUTLIER_CLUSTER, OUTLIER_LABEL};

/// Package clustered documents into one record per cluster label.
///
/// Clusters are emitted in ascending label order (outliers first); member
/// documents keep their original order of appearance. The outlier cluster
/// is always labeled [`OUTLIER_LABEL`], whatever its term scores say.
///
/// # Errors
/// - [`TopicModelError::Parameter`] if `top_k` is zero.
/// - [`TopicModelError::InputShape`] if documents and labels differ in
///   length, or a non-outlier cluster is missing from the term table.
pub fn package(
    documents: &[String],
    labels: &[ClusterId],
    term_table: &BTreeMap<ClusterId, Vec<(String, f32)>>,
    config: &LabelingConfig,
    source_name: &str,
) -> Result<Vec<TextRecord>, TopicModelError> {
    config.validate()?;

    if documents.len() != labels.len() {
        return Err(TopicModelError::InputShape(format!(
            "{} documents but {} cluster labels",
            documents.len(),
            labels.len()
        )));
    }

    // Ascending label order, outlier cluster first. Members keep their
    // original order of appearance.
    let mut members: BTreeMap<ClusterId, Vec<usize>> = BTreeMap::new();
    for (doc_id, &label) in labels.iter().enumerate() {
        members.entry(label).or_default().push(doc_id);
    }

    let mut records = Vec::with_capacity(members.len());
    for (&cluster, doc_ids) in &members {
        let label = cluster_label(cluster, term_table, config.top_k)?;

        let children: Vec<TextRecord> = doc_ids
            .iter()
            .map(|&doc_id| {
                TextRecord::new(documents[doc_id].clone())
                    .with_meta("cluster_id", json!(cluster))
            })
            .collect();

        let record = TextRecord::new(label.clone())
            .with_meta("cluster_size", json!(doc_ids.len()))
            .with_meta("cluster_topics", json!(label))
            .with_children(children)
            .with_source_name(source_name);

        records.push(record);
    }

    debug!(
        clusters = records.len(),
        documents = documents.len(),
        "Packaged topic records"
    );

    Ok(records)
}

/// Build the label for a cluster: the `top_k` highest-scoring terms of its
/// ascending-sorted term list, in descending order, joined by underscores.
fn cluster_label(
    cluster: ClusterId,
    term_table: &BTreeMap<ClusterId, Vec<(String, f32)>>,
    top_k: usize,
) -> Result<String, TopicModelError> {
    if cluster == OUTLIER_CLUSTER {
        return Ok(OUTLIER_LABEL.to_string());
    }

    let scores = term_table.get(&cluster).ok_or_else(|| {
        TopicModelError::InputShape(format!("cluster {cluster} missing from term table"))
    })?;

    let start = scores.len().saturating_sub(top_k);
    let label = scores[start..]
        .iter()
        .rev()
        .map(|(term, _)| term.as_str())
        .collect::<Vec<_>>()
        .join("_");

    Ok(label)
}
