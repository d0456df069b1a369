//! Error types for report output.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Output adapter error type
#[derive(Debug, Error)]
pub enum ReportError {
    /// Parent directory could not be created
    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// Destination file could not be written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// Destination file
        path: PathBuf,
        /// Underlying IO error
        source: io::Error,
    },

    /// Chart could not be rasterised
    #[error("Chart rendering failed: {0}")]
    Render(String),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ReportError {
    /// Create a write error for `path`
    pub fn write(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a directory creation error for `path`
    pub fn create_dir(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result alias for report output.
pub type Result<T> = std::result::Result<T, ReportError>;
