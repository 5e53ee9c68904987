//! In-memory store

use crate::error::Result;
use crate::{validate_key, KeyValueStore};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Process-local map implementing [`KeyValueStore`].
///
/// Counts successful writes so callers can assert how many times state was
/// persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `write` calls since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Whether `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map still holds consistent strings; keep serving it.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        self.lock().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.lock().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_count_tracks_writes_only() {
        let store = MemoryStore::new();
        assert_eq!(store.write_count(), 0);
        store.write("a", "1").expect("write");
        store.write("a", "2").expect("write");
        store.read("a").expect("read");
        store.remove("a").expect("remove");
        assert_eq!(store.write_count(), 2);
        assert!(!store.contains("a"));
    }

    #[test]
    fn test_invalid_key_not_counted() {
        let store = MemoryStore::new();
        assert!(store.write("bad key", "1").is_err());
        assert_eq!(store.write_count(), 0);
    }
}
