//! Dimensionality reduction for document embeddings.
//!
//! Projects high-dimensional embeddings into a small number of components
//! while preserving local neighborhoods, so the density clusterer can work
//! in a space where distances are meaningful.
//!
//! The projection builds a fuzzy k-nearest-neighbor graph under cosine
//! distance (per-point bandwidths calibrated so each point's effective
//! neighbor count matches `n_neighbors`), then lays the graph out with
//! stochastic gradient descent: attraction along graph edges, repulsion
//! against negative samples. The layout is stochastic; reproducibility is
//! controlled by the caller through `ReducerConfig::seed`.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::ReducerConfig;
use crate::error::TopicModelError;
use crate::similarity::pairwise_cosine_distances;
use crate::types::Embedding;

/// Negative samples drawn per edge per epoch.
const NEGATIVE_SAMPLES: usize = 5;

/// Per-component gradient clip, keeps early epochs from exploding.
const GRADIENT_CLIP: f32 = 4.0;

/// Half-width of the uniform range used for initial positions.
const INIT_RANGE: f32 = 10.0;

/// Bandwidth binary search iterations.
const BANDWIDTH_ITERS: usize = 64;

/// Reduce embeddings to `n_components` dimensions.
///
/// Returns one reduced vector per input embedding, in input order.
///
/// # Errors
/// - [`TopicModelError::InputShape`] if the input is empty, embeddings have
///   inconsistent lengths, or there are not more documents than
///   `n_neighbors`.
/// - [`TopicModelError::Parameter`] if the reducer configuration is invalid.
pub fn reduce(
    embeddings: &[Embedding],
    config: &ReducerConfig,
) -> Result<Vec<Vec<f32>>, TopicModelError> {
    config.validate()?;
    validate_shape(embeddings, config.n_neighbors)?;

    let n = embeddings.len();
    let distances = pairwise_cosine_distances(embeddings);
    let edges = fuzzy_neighbor_graph(&distances, config.n_neighbors);

    debug!(
        points = n,
        edges = edges.len(),
        n_components = config.n_components,
        "Built fuzzy neighbor graph"
    );

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut positions = random_layout(n, config.n_components, &mut rng);

    optimize_layout(&mut positions, &edges, config, &mut rng);

    Ok(positions)
}

fn validate_shape(embeddings: &[Embedding], n_neighbors: usize) -> Result<(), TopicModelError> {
    if embeddings.is_empty() {
        return Err(TopicModelError::InputShape(
            "no embeddings supplied".to_string(),
        ));
    }

    let dim = embeddings[0].len();
    if dim == 0 {
        return Err(TopicModelError::InputShape(
            "embeddings have zero dimension".to_string(),
        ));
    }
    for (i, embedding) in embeddings.iter().enumerate() {
        if embedding.len() != dim {
            return Err(TopicModelError::InputShape(format!(
                "embedding {i} has dimension {}, expected {dim}",
                embedding.len()
            )));
        }
    }

    if embeddings.len() <= n_neighbors {
        return Err(TopicModelError::InputShape(format!(
            "need more than {n_neighbors} documents for n_neighbors={n_neighbors}, got {}",
            embeddings.len()
        )));
    }

    Ok(())
}

/// Build the symmetrized fuzzy k-NN graph as (i, j, weight) edges with i < j.
///
/// Directed membership strengths use the standard smoothed kernel
/// `exp(-(d - rho) / sigma)` with `rho` the nearest-neighbor distance and
/// `sigma` binary-searched so the strengths sum to `log2(k)`. Directed
/// strengths `a`, `b` combine via fuzzy union `a + b - a*b`.
fn fuzzy_neighbor_graph(distances: &[Vec<f32>], k: usize) -> Vec<(usize, usize, f32)> {
    let n = distances.len();
    let target = (k as f32).log2();

    // Directed strengths, keyed (min, max) so both directions merge.
    let mut combined: BTreeMap<(usize, usize), (f32, f32)> = BTreeMap::new();

    for i in 0..n {
        let mut neighbor_dists: Vec<(usize, f32)> = (0..n)
            .filter(|&j| j != i)
            .map(|j| (j, distances[i][j]))
            .collect();
        neighbor_dists
            .sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        neighbor_dists.truncate(k);

        let rho = neighbor_dists[0].1;
        let sigma = calibrate_bandwidth(&neighbor_dists, rho, target);

        for &(j, dist) in &neighbor_dists {
            let strength = (-(dist - rho).max(0.0) / sigma).exp();
            let key = (i.min(j), i.max(j));
            let entry = combined.entry(key).or_insert((0.0, 0.0));
            if i < j {
                entry.0 = entry.0.max(strength);
            } else {
                entry.1 = entry.1.max(strength);
            }
        }
    }

    combined
        .into_iter()
        .map(|((i, j), (a, b))| (i, j, a + b - a * b))
        .filter(|&(_, _, w)| w > 0.0)
        .collect()
}

/// Binary search the bandwidth so the smoothed strengths sum to `target`.
fn calibrate_bandwidth(neighbor_dists: &[(usize, f32)], rho: f32, target: f32) -> f32 {
    let mut lo = 0.0f32;
    let mut hi = f32::INFINITY;
    let mut sigma = 1.0f32;

    for _ in 0..BANDWIDTH_ITERS {
        let sum: f32 = neighbor_dists
            .iter()
            .map(|&(_, d)| (-(d - rho).max(0.0) / sigma).exp())
            .sum();

        if (sum - target).abs() < 1e-5 {
            break;
        }
        if sum > target {
            hi = sigma;
            sigma = (lo + hi) / 2.0;
        } else {
            lo = sigma;
            sigma = if hi.is_finite() {
                (lo + hi) / 2.0
            } else {
                sigma * 2.0
            };
        }
    }

    sigma.max(1e-6)
}

fn random_layout(n: usize, n_components: usize, rng: &mut StdRng) -> Vec<Vec<f32>> {
    (0..n)
        .map(|_| {
            (0..n_components)
                .map(|_| rng.random_range(-INIT_RANGE..INIT_RANGE))
                .collect()
        })
        .collect()
}

/// SGD layout optimization: attraction along edges, negative-sampled
/// repulsion, learning rate decayed linearly to zero.
fn optimize_layout(
    positions: &mut [Vec<f32>],
    edges: &[(usize, usize, f32)],
    config: &ReducerConfig,
    rng: &mut StdRng,
) {
    let n = positions.len();
    let dim = config.n_components;

    for epoch in 0..config.n_epochs {
        let alpha = config.learning_rate * (1.0 - epoch as f32 / config.n_epochs as f32);

        for &(i, j, weight) in edges {
            let d2 = squared_distance(&positions[i], &positions[j]);
            // Gradient of the 1/(1+d^2) attraction kernel.
            let attract = -2.0 * weight / (1.0 + d2);
            apply_force(positions, i, j, attract * alpha, dim);

            for _ in 0..NEGATIVE_SAMPLES {
                let k = rng.random_range(0..n);
                if k == i {
                    continue;
                }
                let d2 = squared_distance(&positions[i], &positions[k]);
                let repel = 2.0 / ((0.001 + d2) * (1.0 + d2));
                apply_force(positions, i, k, repel * alpha, dim);
            }
        }
    }
}

/// Move point `i` along (and `j` against) their difference vector, scaled by
/// `coeff`. Positive coefficients push apart, negative pull together.
fn apply_force(positions: &mut [Vec<f32>], i: usize, j: usize, coeff: f32, dim: usize) {
    for d in 0..dim {
        let grad = (coeff * (positions[i][d] - positions[j][d]))
            .clamp(-GRADIENT_CLIP, GRADIENT_CLIP);
        positions[i][d] += grad;
        positions[j][d] -= grad;
    }
}

fn squared_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}
