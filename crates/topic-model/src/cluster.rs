//! Density clustering of reduced vectors.
//!
//! Wraps HDBSCAN (Euclidean distance, stability-based cluster selection
//! over the density hierarchy). Points that fall in no dense region get
//! the [`OUTLIER_CLUSTER`] label rather than being forced into a cluster.

use hdbscan::{Hdbscan, HdbscanHyperParams};
use tracing::debug;

use crate::config::ClusteringConfig;
use crate::error::TopicModelError;
use crate::types::{ClusterId, OUTLIER_CLUSTER};

/// Cluster reduced vectors, returning one label per vector in input order.
///
/// Label `-1` marks noise points. Asking for clusters larger than the input
/// is not an error: every point is labeled an outlier. An internal
/// clustering failure on degenerate input degrades the same way.
///
/// # Errors
/// [`TopicModelError::Parameter`] if the clustering configuration is
/// invalid.
pub fn cluster(
    vectors: &[Vec<f32>],
    config: &ClusteringConfig,
) -> Result<Vec<ClusterId>, TopicModelError> {
    config.validate()?;

    if vectors.len() < config.min_cluster_size {
        debug!(
            points = vectors.len(),
            min_cluster_size = config.min_cluster_size,
            "Fewer points than min_cluster_size, labeling all as outliers"
        );
        return Ok(vec![OUTLIER_CLUSTER; vectors.len()]);
    }

    let data: Vec<Vec<f32>> = vectors.to_vec();
    let hyper_params = HdbscanHyperParams::builder()
        .min_cluster_size(config.min_cluster_size)
        .min_samples(config.min_samples)
        .build();

    let clusterer = Hdbscan::new(&data, hyper_params);
    let labels = match clusterer.cluster() {
        Ok(labels) => labels,
        Err(e) => {
            debug!(error = ?e, "Clustering failed, labeling all as outliers");
            return Ok(vec![OUTLIER_CLUSTER; vectors.len()]);
        }
    };

    let noise = labels.iter().filter(|&&l| l < 0).count();
    debug!(
        points = vectors.len(),
        clusters = distinct_clusters(&labels),
        noise = noise,
        "Clustered reduced vectors"
    );

    Ok(labels)
}

fn distinct_clusters(labels: &[i32]) -> usize {
    let mut seen: Vec<i32> = labels.iter().copied().filter(|&l| l >= 0).collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}
