use std::time::Duration;

use board_remote::ApiError;
use board_store::StoreError;
use thiserror::Error;

/// Local storage failures.
///
/// `Read` and `Decode` are recovered by falling back to a default value;
/// `Write` and `Encode` are reported to the caller, whose in-memory state
/// stays authoritative.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("failed to read {key}")]
    Read {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("stored value for {key} does not decode")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {key}")]
    Write {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to encode {key}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistError {
    /// Whether this failure happened while storing rather than loading.
    pub fn is_write(&self) -> bool {
        matches!(self, PersistError::Write { .. } | PersistError::Encode { .. })
    }
}

/// Why a remote sync did not complete. Kept in `SyncStatus`, so it is `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("remote upsert failed: {0}")]
    Remote(#[from] ApiError),

    #[error("remote upsert timed out after {0:?}")]
    Timeout(Duration),

    #[error("failed to encode snapshot: {0}")]
    Encode(String),

    #[error("sync task failed: {0}")]
    Join(String),
}
