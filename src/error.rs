use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("cannot divide {len} colors into {k} groups; palette size must be between 1 and the color count")]
    InvalidPaletteSize { k: usize, len: usize },

    #[error(
        "unable to cluster colors within {iterations} iterations; \
         the colors may be too similar for the requested palette size"
    )]
    ClusteringNonConvergence { iterations: usize },

    #[error("palette mapping mismatch (expected {expected} entries, found {found})")]
    MappingMismatch { expected: usize, found: usize },
}
