//! Error types
//!
//! The rasterizers themselves never fail: bad geometry is clipped or
//! skipped. Only resource acquisition and file handling report errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Frame buffer errors
#[derive(Error, Debug)]
pub enum RasterError {
    /// The off-screen buffer could not be allocated
    #[error("could not allocate {bytes}-byte off-screen buffer")]
    BufferUnavailable { bytes: usize },

    #[error("failed to write {}: {source}", .path.display())]
    Png {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Generic matrix shape errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("cannot multiply {}x{} by {}x{}", .left.0, .left.1, .right.0, .right.1)]
    DimensionMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("{len} values do not fill a {rows}x{columns} matrix")]
    DataLength { rows: usize, columns: usize, len: usize },

    #[error("expected a 3x3 matrix, got {rows}x{columns}")]
    NotSquare3 { rows: usize, columns: usize },
}

/// Scene file errors
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

/// Configuration file errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Parse error in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid option: {0}")]
    Usage(String),
}
