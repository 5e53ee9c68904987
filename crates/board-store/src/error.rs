//! Error types for board-store

use std::path::PathBuf;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key is empty or contains characters that cannot name a file
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// I/O error reading an entry
    #[error("Failed to read {path}")]
    Read {
        /// Path of the entry
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// I/O error writing an entry
    #[error("Failed to write {path}")]
    Write {
        /// Path of the entry
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Rename of the temp file failed; the temp file is left behind
    #[error("Failed to write {path} atomically - Safety copy at: {temp_path}")]
    WriteAtomic {
        /// Path of the entry
        path: PathBuf,
        /// Path to the temporary safety copy
        temp_path: PathBuf,
    },
}

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;
