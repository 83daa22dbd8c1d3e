//! Crate-level error type for configuration and ingestion failures.
//!
//! Draw-path misses (unknown gid, unrealized texture, absent sheet key) are
//! deliberately not errors: the renderer contract degrades them to skipped
//! cells instead of tearing down the frame loop.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("map dimensions must be nonzero (tile size {tile_size}, grid {width}x{height})")]
    InvalidMapSize {
        tile_size: u32,
        width: u32,
        height: u32,
    },

    #[error("layer data holds {got} cells, expected {expected}")]
    LayerSizeMismatch { expected: usize, got: usize },

    #[error("sprite sheet grid is degenerate (tile {tile_width}x{tile_height}, {columns} columns)")]
    InvalidSheetGrid {
        tile_width: u32,
        tile_height: u32,
        columns: u32,
    },

    #[error("failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("failed to parse description: {0}")]
    Parse(#[from] serde_json::Error),
}
