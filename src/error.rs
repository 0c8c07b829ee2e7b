//! Error types
//!
//! Construction failures are fatal; query-time failures are recoverable.

use thiserror::Error;

/// Errors raised while building or querying a tile grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height was zero or negative
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// The raw layout holds fewer cells than the declared grid
    #[error("layout has {found} cells, expected at least {expected}")]
    LayoutSizeMismatch { expected: usize, found: usize },

    /// A coordinate fell outside the grid
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    /// The classifier was asked about a cell the grid does not own
    #[error("no neighbour context for cell ({x}, {y})")]
    MissingNeighborContext { x: i32, y: i32 },
}

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}
