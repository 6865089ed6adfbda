//! Frequency ordering and flattening of clustered palettes.

use std::cmp::Reverse;

use crate::error::PaletteError;
use crate::space::Color;

/// Reorder clusters by descending member count.
///
/// The sort is stable, so clusters of equal size keep their relative order.
/// When `centroids` are supplied they must be index-aligned with `clusters`
/// and come back permuted identically; when absent the returned centroid
/// list is empty.
pub fn sort_by_frequency(
    clusters: &[Vec<Color>],
    centroids: Option<&[Color]>,
) -> Result<(Vec<Vec<Color>>, Vec<Color>), PaletteError> {
    if let Some(ct) = centroids {
        if ct.len() != clusters.len() {
            return Err(PaletteError::MappingMismatch {
                expected: clusters.len(),
                found: ct.len(),
            });
        }
    }

    let mut order: Vec<usize> = (0..clusters.len()).collect();
    order.sort_by_key(|&idx| Reverse(clusters[idx].len()));

    let sorted_clusters = order.iter().map(|&idx| clusters[idx].clone()).collect();
    let sorted_centroids = match centroids {
        Some(ct) => order.iter().map(|&idx| ct[idx]).collect(),
        None => Vec::new(),
    };

    Ok((sorted_clusters, sorted_centroids))
}

/// Concatenate clusters into one color list, preserving cluster order.
pub fn flatten_colors(clusters: &[Vec<Color>]) -> Vec<Color> {
    clusters
        .iter()
        .flat_map(|cluster| cluster.iter().copied())
        .collect()
}
