//! # board-store
//!
//! String-keyed, string-valued storage for widget-board dashboards.
//!
//! Two backends implement [`KeyValueStore`]:
//!
//! - [`FileStore`]: one file per key inside a directory. Writes are atomic
//!   (temp file, fsync, rename) so a crash never leaves a half-written entry.
//! - [`MemoryStore`]: an in-process map, used by tests and ephemeral sessions.
//!
//! Values are opaque strings. Callers decide the encoding (JSON in practice).
//!
//! ## Example
//!
//! ```
//! use board_store::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.write("dashboard-last-synced", "1700000000000").unwrap();
//! assert_eq!(
//!     store.read("dashboard-last-synced").unwrap().as_deref(),
//!     Some("1700000000000")
//! );
//! ```

pub mod error;
mod file;
mod memory;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Durable key/value storage.
///
/// Implementations take `&self` so one store can be shared between the
/// foreground event loop and background sync tasks.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// List stored keys in ascending order.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Validate a storage key.
///
/// Keys become file names, so they must be non-empty and limited to ASCII
/// alphanumerics, `-`, `_` and `.` (without a leading dot).
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
