#![forbid(unsafe_code)]

//! Color quantization and cross-palette color transfer.
//!
//! `chromamap` reduces a color list to a fixed-size representative palette
//! by k-means clustering in LAB space under a perceptual distance metric,
//! and can remap one clustered palette onto another so a generated pattern
//! takes on the colors of a source image.
//!
//! The crate does no image decoding or rendering; callers hand in plain
//! color lists (see [`colors_from_rgb8`] for decoded pixel buffers) and get
//! color lists back.

pub mod distance;
pub mod error;
pub mod kmeans;
pub mod remap;
pub mod sort;
pub mod space;

pub use distance::DistanceMetric;
pub use error::PaletteError;
pub use kmeans::{Clustering, ITERATION_LIMIT};
pub use remap::PaletteMapping;
pub use space::Color;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Color space a caller's color list is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Channels in [0, 255].
    Rgb,
    /// Hue [0, 360), saturation and brightness [0, 100].
    Hsb,
}

/// Configuration for palette extraction.
#[derive(Debug, Clone)]
pub struct PaletteConfig {
    /// Number of palette colors to produce.
    pub palette_size: usize,
    /// Color space of the input list; results come back in the same space.
    pub color_mode: ColorMode,
    /// Distance function used during clustering.
    pub metric: DistanceMetric,
    /// RNG seed for centroid initialization. Seeded runs are reproducible;
    /// unseeded runs draw a fresh generator per call.
    pub seed: Option<u64>,
    /// Cap on clustering iterations.
    pub iteration_limit: usize,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            palette_size: 8,
            color_mode: ColorMode::Rgb,
            metric: DistanceMetric::DeltaE2000,
            seed: None,
            iteration_limit: ITERATION_LIMIT,
        }
    }
}

impl PaletteConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palette_size(mut self, k: usize) -> Self {
        self.palette_size = k;
        self
    }

    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    pub fn metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = limit;
        self
    }
}

/// A frequency-sorted palette in the caller's color mode.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteResult {
    color_palette: Vec<Color>,
    color_clusters: Vec<Vec<Color>>,
}

impl PaletteResult {
    /// Palette colors, most frequent cluster first.
    pub fn palette(&self) -> &[Color] {
        &self.color_palette
    }

    /// Cluster members behind each palette color, same order as the palette.
    pub fn clusters(&self) -> &[Vec<Color>] {
        &self.color_clusters
    }

    /// Number of palette colors.
    pub fn len(&self) -> usize {
        self.color_palette.len()
    }

    pub fn is_empty(&self) -> bool {
        self.color_palette.is_empty()
    }
}

fn conversions_for(mode: ColorMode) -> (fn(Color) -> Color, fn(Color) -> Color) {
    match mode {
        ColorMode::Rgb => (space::rgb_to_lab, space::lab_to_rgb),
        ColorMode::Hsb => (space::hsb_to_lab, space::lab_to_hsb),
    }
}

/// Cluster a color list into a representative palette.
///
/// Colors are converted to LAB for clustering and converted back to the
/// input mode afterwards, so the perceptual metric sees the space it is
/// defined over. The returned palette and clusters are sorted by descending
/// cluster size.
pub fn extract_palette(
    colors: &[Color],
    config: &PaletteConfig,
) -> Result<PaletteResult, PaletteError> {
    let (to_lab, from_lab) = conversions_for(config.color_mode);

    let lab_colors: Vec<Color> = colors.iter().map(|&c| to_lab(c)).collect();

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let clustering = kmeans::k_means(
        &lab_colors,
        config.palette_size,
        config.metric,
        config.iteration_limit,
        &mut rng,
    )?;

    debug!(
        colors = colors.len(),
        groups = config.palette_size,
        "clustering complete"
    );

    let (sorted_clusters, sorted_centroids) =
        sort::sort_by_frequency(&clustering.clusters, Some(&clustering.centroids))?;

    Ok(PaletteResult {
        color_palette: sorted_centroids.iter().map(|&c| from_lab(c)).collect(),
        color_clusters: sorted_clusters
            .iter()
            .map(|cluster| cluster.iter().map(|&c| from_lab(c)).collect())
            .collect(),
    })
}

/// Recolor a pattern's color list with a source image's palette.
///
/// Both palettes must have the same size and be frequency-sorted (as
/// [`extract_palette`] returns them): the most prominent pattern color maps
/// onto the most prominent image color, and so on down the rank order. With
/// `use_original_colors` every substitution draws round-robin from the
/// matched image cluster's members; without it the image's palette color is
/// used directly, which gives a flatter, reduced-color result.
///
/// The output has exactly one color per entry of `pattern_colors`.
pub fn transfer_palette(
    pattern_colors: &[Color],
    pattern_palette: &PaletteResult,
    image_palette: &PaletteResult,
    metric: DistanceMetric,
    use_original_colors: bool,
) -> Result<Vec<Color>, PaletteError> {
    let mut mapping = remap::map_centroids(
        pattern_palette.palette(),
        image_palette.palette(),
        image_palette.clusters(),
    )?;

    remap::map_colors(
        pattern_colors,
        pattern_palette.palette(),
        &mut mapping,
        metric,
        use_original_colors,
    )
}

/// Substitute every color with its nearest centroid.
///
/// The color-reduction half of palette extraction on its own: useful for
/// previewing how a palette flattens a color list.
pub fn reduce_colors(
    colors: &[Color],
    centroids: &[Color],
    metric: DistanceMetric,
) -> Result<Vec<Color>, PaletteError> {
    colors
        .iter()
        .map(|&color| {
            kmeans::nearest_centroid(color, centroids, metric)
                .map(|idx| centroids[idx])
                .ok_or(PaletteError::MappingMismatch {
                    expected: 1,
                    found: 0,
                })
        })
        .collect()
}

/// Build a color list from decoded RGB pixel data.
pub fn colors_from_rgb8(pixels: &[rgb::RGB<u8>]) -> Vec<Color> {
    pixels
        .iter()
        .map(|p| [p.r as f64, p.g as f64, p.b as f64])
        .collect()
}

/// Build a color list from decoded RGBA pixel data. Alpha is dropped.
pub fn colors_from_rgba8(pixels: &[rgb::RGBA<u8>]) -> Vec<Color> {
    pixels
        .iter()
        .map(|p| [p.r as f64, p.g as f64, p.b as f64])
        .collect()
}
