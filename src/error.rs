//! Error types for rollstore
//!
//! Provides a unified error type for all store operations. Missing keys and
//! an empty store are ordinary outcomes, not errors: see [`crate::store::Outcome`].

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for rollstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    /// The backing (or temporary) file could not be opened, read, written,
    /// flushed or renamed.
    #[error("storage unavailable at {}: {source}", .path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("roll number {0} already exists")]
    DuplicateKey(i32),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}

impl StoreError {
    /// Wrap an I/O error with the path it happened on.
    pub fn unavailable(path: &Path, source: io::Error) -> Self {
        StoreError::StorageUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Attach a path to an `io::Result`, turning it into a store result.
pub(crate) trait IoResultExt<T> {
    fn at(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T> {
        self.map_err(|e| StoreError::unavailable(path, e))
    }
}
