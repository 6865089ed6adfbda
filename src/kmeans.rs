//! K-means clustering of color lists.
//!
//! Clusters a color list into `k` groups under a caller-chosen distance
//! metric. Centroid initialization samples `k` distinct input colors from a
//! caller-supplied RNG, so seeded runs are fully reproducible.

use rand::Rng;
use tracing::{debug, trace};

use crate::distance::DistanceMetric;
use crate::error::PaletteError;
use crate::space::Color;

/// Default cap on clustering iterations before giving up.
pub const ITERATION_LIMIT: usize = 500;

/// Centroids closer than this per component count as unchanged.
const CONVERGENCE_EPSILON: f64 = 1e-9;

/// Output of a successful clustering run.
///
/// `clusters` and `centroids` are index-aligned: `centroids[i]` is the
/// per-dimension mean of `clusters[i]`, and no cluster is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    pub clusters: Vec<Vec<Color>>,
    pub centroids: Vec<Color>,
}

/// Index of the centroid nearest to `color`, ties broken by lowest index.
/// `None` only when `centroids` is empty.
pub fn nearest_centroid(color: Color, centroids: &[Color], metric: DistanceMetric) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, &centroid) in centroids.iter().enumerate() {
        let d = metric.measure(color, centroid);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((idx, d)),
        }
    }

    best.map(|(idx, _)| idx)
}

/// Cluster `colors` into `k` groups.
///
/// Iterates assign/update rounds until the centroid set stabilizes or
/// `iteration_limit` is exhausted. A centroid that ends a round with no
/// members is reseeded from the input color that is currently farthest from
/// its own centroid; reseed rounds count against the iteration cap, so a
/// palette size the data cannot sustain fails with
/// `ClusteringNonConvergence` instead of cycling forever.
pub fn k_means<R: Rng>(
    colors: &[Color],
    k: usize,
    metric: DistanceMetric,
    iteration_limit: usize,
    rng: &mut R,
) -> Result<Clustering, PaletteError> {
    if k == 0 || k > colors.len() {
        return Err(PaletteError::InvalidPaletteSize {
            k,
            len: colors.len(),
        });
    }

    // k distinct colors drawn without replacement seed the centroids
    let mut centroids: Vec<Color> = rand::seq::index::sample(rng, colors.len(), k)
        .iter()
        .map(|idx| colors[idx])
        .collect();

    for iteration in 0..iteration_limit {
        let assignments = assign(colors, &centroids, metric);

        if let Some(starved) = first_starved(&assignments, k) {
            let replacement = farthest_from_centroid(colors, &assignments, &centroids, metric);
            centroids[starved] = colors[replacement];
            trace!(iteration, centroid = starved, "reseeded starved centroid");
            continue;
        }

        let updated = mean_centroids(colors, &assignments, k);

        if converged(&centroids, &updated) {
            debug!(iterations = iteration + 1, k, "clustering converged");
            return Ok(build_clustering(colors, &assignments, updated));
        }

        centroids = updated;
    }

    Err(PaletteError::ClusteringNonConvergence {
        iterations: iteration_limit,
    })
}

/// Nearest-centroid index for every color, in input order.
fn assign(colors: &[Color], centroids: &[Color], metric: DistanceMetric) -> Vec<usize> {
    colors
        .iter()
        .map(|&color| {
            // centroids is non-empty for every caller in this module
            nearest_centroid(color, centroids, metric).unwrap_or(0)
        })
        .collect()
}

/// Lowest cluster index that received no members, if any.
fn first_starved(assignments: &[usize], k: usize) -> Option<usize> {
    let mut counts = vec![0usize; k];
    for &idx in assignments {
        counts[idx] += 1;
    }

    counts.iter().position(|&count| count == 0)
}

/// Index of the input color farthest from its assigned centroid, ties going
/// to the earliest color. This is the worst-represented point and becomes
/// the replacement seed for a starved centroid.
fn farthest_from_centroid(
    colors: &[Color],
    assignments: &[usize],
    centroids: &[Color],
    metric: DistanceMetric,
) -> usize {
    let mut farthest = 0;
    let mut max_distance = f64::MIN;

    for (idx, &color) in colors.iter().enumerate() {
        let d = metric.measure(color, centroids[assignments[idx]]);
        if d > max_distance {
            max_distance = d;
            farthest = idx;
        }
    }

    farthest
}

/// Per-dimension arithmetic mean of each cluster's members.
fn mean_centroids(colors: &[Color], assignments: &[usize], k: usize) -> Vec<Color> {
    let mut sums = vec![[0.0f64; 3]; k];
    let mut counts = vec![0usize; k];

    for (&color, &cluster) in colors.iter().zip(assignments) {
        for dim in 0..3 {
            sums[cluster][dim] += color[dim];
        }
        counts[cluster] += 1;
    }

    sums.iter()
        .zip(&counts)
        .map(|(sum, &count)| sum.map(|total| total / count as f64))
        .collect()
}

fn converged(previous: &[Color], updated: &[Color]) -> bool {
    previous.iter().zip(updated).all(|(a, b)| {
        a.iter()
            .zip(b)
            .all(|(x, y)| (x - y).abs() <= CONVERGENCE_EPSILON)
    })
}

fn build_clustering(colors: &[Color], assignments: &[usize], centroids: Vec<Color>) -> Clustering {
    let mut clusters = vec![Vec::new(); centroids.len()];
    for (&color, &cluster) in colors.iter().zip(assignments) {
        clusters[cluster].push(color);
    }

    Clustering {
        clusters,
        centroids,
    }
}
