//! Cross-palette color remapping.
//!
//! Two palettes clustered to the same size and sorted the same way (index
//! `i` in one corresponds to index `i` in the other) are joined into a
//! `PaletteMapping`. Mapping entries are resolved by centroid position, not
//! by color value, so floating-point equality never decides a lookup.

use crate::distance::DistanceMetric;
use crate::error::PaletteError;
use crate::kmeans::nearest_centroid;
use crate::space::Color;

/// One source centroid's substitution target: the corresponding target
/// centroid, the target cluster's members, and the round-robin cursor into
/// them.
#[derive(Debug, Clone)]
struct MappingEntry {
    centroid: Color,
    cluster: Vec<Color>,
    cursor: usize,
}

/// Correspondence from a source palette onto a target palette.
///
/// Cursor state lives for one mapping session; build a fresh mapping to
/// start the round-robin over.
#[derive(Debug, Clone)]
pub struct PaletteMapping {
    entries: Vec<MappingEntry>,
}

impl PaletteMapping {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pair up two equal-length sorted palettes.
///
/// Entry `i` maps `centroids_a[i]` onto `centroids_b[i]` and its cluster.
/// Length disagreements and empty target clusters fail with
/// `MappingMismatch`; a target cluster must be able to supply at least one
/// substitute color.
pub fn map_centroids(
    centroids_a: &[Color],
    centroids_b: &[Color],
    clusters_b: &[Vec<Color>],
) -> Result<PaletteMapping, PaletteError> {
    if centroids_a.len() != centroids_b.len() {
        return Err(PaletteError::MappingMismatch {
            expected: centroids_a.len(),
            found: centroids_b.len(),
        });
    }
    if clusters_b.len() != centroids_b.len() {
        return Err(PaletteError::MappingMismatch {
            expected: centroids_b.len(),
            found: clusters_b.len(),
        });
    }
    if clusters_b.iter().any(|cluster| cluster.is_empty()) {
        return Err(PaletteError::MappingMismatch {
            expected: 1,
            found: 0,
        });
    }

    let entries = centroids_b
        .iter()
        .zip(clusters_b)
        .map(|(&centroid, cluster)| MappingEntry {
            centroid,
            cluster: cluster.clone(),
            cursor: 0,
        })
        .collect();

    Ok(PaletteMapping { entries })
}

/// Substitute every color in `colors_a` with a color drawn from the mapped
/// target palette.
///
/// Each input color resolves to its nearest centroid in `centroids_a` and
/// through that index to a mapping entry. With `use_original_colors` the
/// entry's cluster members are emitted round-robin, spreading repeated
/// substitutions across the whole target cluster; otherwise the target
/// centroid is emitted, which flattens the output to the reduced palette.
///
/// The output always has exactly one color per input color. A mapping built
/// from a different palette than `centroids_a` cannot resolve and fails
/// with `MappingMismatch` rather than skipping entries.
pub fn map_colors(
    colors_a: &[Color],
    centroids_a: &[Color],
    mapping: &mut PaletteMapping,
    metric: DistanceMetric,
    use_original_colors: bool,
) -> Result<Vec<Color>, PaletteError> {
    if centroids_a.len() != mapping.entries.len() {
        return Err(PaletteError::MappingMismatch {
            expected: mapping.entries.len(),
            found: centroids_a.len(),
        });
    }

    let mut mapped = Vec::with_capacity(colors_a.len());

    for &color in colors_a {
        let idx = nearest_centroid(color, centroids_a, metric).ok_or(
            PaletteError::MappingMismatch {
                expected: 1,
                found: 0,
            },
        )?;

        let entry = &mut mapping.entries[idx];
        if use_original_colors {
            mapped.push(entry.cluster[entry.cursor]);
            entry.cursor = (entry.cursor + 1) % entry.cluster.len();
        } else {
            mapped.push(entry.centroid);
        }
    }

    Ok(mapped)
}
