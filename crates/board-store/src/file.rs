//! File-backed store
//!
//! Each key lives in `<dir>/<key>.json`. Writes follow the temp-file-then-rename
//! pattern: the new content goes to a timestamped sibling, is fsynced, then
//! renamed over the original. On failure before the rename the temp file is
//! kept as a safety copy.

use crate::error::{Result, StoreError};
use crate::{validate_key, KeyValueStore};
use chrono::Local;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Directory of one-file-per-key entries with atomic writes.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Write {
            path: dir.clone(),
            source,
        })?;
        log::debug!("opened file store at {}", dir.display());
        Ok(Self { dir })
    }

    /// Directory holding the entries.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let timestamp = Local::now().format("%Y%m%d-%H%M%S%.f").to_string();
        let temp_path = path.with_file_name(format!("{key}.{EXTENSION}.tmp.{timestamp}"));

        fs::write(&temp_path, value).map_err(|source| StoreError::Write {
            path: temp_path.clone(),
            source,
        })?;

        let file = fs::File::open(&temp_path).map_err(|source| StoreError::Write {
            path: temp_path.clone(),
            source,
        })?;
        file.sync_all().map_err(|source| StoreError::Write {
            path: temp_path.clone(),
            source,
        })?;

        fs::rename(&temp_path, &path).map_err(|e| {
            log::warn!("rename of {} failed: {}", temp_path.display(), e);
            StoreError::WriteAtomic {
                path: path.clone(),
                temp_path: temp_path.clone(),
            }
        })?;

        log::trace!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::Read {
            path: self.dir.clone(),
            source,
        })?;
        let mut keys: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                name.strip_suffix(".json").map(str::to_string)
            })
            .filter(|key| validate_key(key).is_ok())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_missing_key_returns_none() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        assert!(store.read("dashboard-widgets").expect("read").is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        store.write("custom-theme", r#"{"primaryColor":"blue"}"#).expect("write");
        assert_eq!(
            store.read("custom-theme").expect("read").as_deref(),
            Some(r#"{"primaryColor":"blue"}"#)
        );
        assert!(dir.path().join("custom-theme.json").exists());
    }

    #[test]
    fn test_write_leaves_no_temp_files() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        store.write("dashboard-layouts", "{}").expect("write");
        store.write("dashboard-layouts", "{\"lg\":[]}").expect("overwrite");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .expect("read_dir")
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty(), "temp files should be renamed away");
    }

    #[test]
    fn test_open_creates_nested_directory() {
        let dir = tempdir().expect("tempdir");
        let nested = dir.path().join("a").join("b");
        let store = FileStore::open(&nested).expect("open");
        assert!(nested.is_dir());
        assert_eq!(store.dir(), nested.as_path());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        store.write("habits-1", "[]").expect("write");
        store.remove("habits-1").expect("remove");
        store.remove("habits-1").expect("second remove");
        assert!(store.read("habits-1").expect("read").is_none());
    }

    #[test]
    fn test_keys_sorted_and_filtered() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        store.write("dashboard-widgets", "[]").expect("write");
        store.write("custom-theme", "{}").expect("write");
        fs::write(dir.path().join("notes.txt"), "ignored").expect("write stray");
        assert_eq!(
            store.keys().expect("keys"),
            vec!["custom-theme".to_string(), "dashboard-widgets".to_string()]
        );
    }

    #[test]
    fn test_invalid_key_rejected_before_io() {
        let dir = tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).expect("open");
        assert!(matches!(
            store.write("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
    }
}
