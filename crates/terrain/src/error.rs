use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("terrain must be at least 2x2 vertices, got {width}x{depth}")]
    InvalidDimensions { width: usize, depth: usize },
    #[error("noise scale must be greater than zero, got {0}")]
    InvalidScale(f64),
    #[error("at least one noise octave is required")]
    InvalidOctaves,
    #[error("{width}x{depth} vertices do not fit in 32-bit indices")]
    TooManyVertices { width: usize, depth: usize },
    #[error("failed to read terrain config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse terrain config ron: {0}")]
    ConfigParse(#[from] ron::error::SpannedError),
}
