//! Atomic write safety tests
//!
//! Validates that entries survive overwrite cycles intact, that stray temp
//! files never shadow real entries, and that a store reopened on the same
//! directory sees everything written before.

use board_store::{FileStore, KeyValueStore};
use std::fs;
use tempfile::tempdir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_reopen_sees_previous_writes() {
    init_logging();
    let dir = tempdir().expect("Failed to create temp directory");
    {
        let store = FileStore::open(dir.path()).expect("open");
        store
            .write("dashboard-widgets", r#"[{"id":"notes-1"}]"#)
            .expect("write");
    }
    let reopened = FileStore::open(dir.path()).expect("reopen");
    assert_eq!(
        reopened.read("dashboard-widgets").expect("read").as_deref(),
        Some(r#"[{"id":"notes-1"}]"#)
    );
}

#[test]
fn test_repeated_overwrites_keep_last_value() {
    init_logging();
    let dir = tempdir().expect("Failed to create temp directory");
    let store = FileStore::open(dir.path()).expect("open");
    for i in 0..50 {
        store
            .write("dashboard-last-synced", &i.to_string())
            .expect("write");
    }
    assert_eq!(
        store.read("dashboard-last-synced").expect("read").as_deref(),
        Some("49")
    );
    assert_eq!(
        store.keys().expect("keys"),
        vec!["dashboard-last-synced".to_string()]
    );
}

#[test]
fn test_stray_temp_file_is_not_a_key() {
    init_logging();
    let dir = tempdir().expect("Failed to create temp directory");
    let store = FileStore::open(dir.path()).expect("open");
    store.write("custom-theme", "{}").expect("write");
    fs::write(
        dir.path().join("custom-theme.json.tmp.20240101-000000"),
        "{\"partial\":",
    )
    .expect("write stray temp");

    assert_eq!(store.keys().expect("keys"), vec!["custom-theme".to_string()]);
    assert_eq!(store.read("custom-theme").expect("read").as_deref(), Some("{}"));
}

#[test]
fn test_large_value_roundtrip() {
    init_logging();
    let dir = tempdir().expect("Failed to create temp directory");
    let store = FileStore::open(dir.path()).expect("open");
    let big = "x".repeat(1 << 20);
    store.write("notes-content-notes-1", &big).expect("write");
    let read = store
        .read("notes-content-notes-1")
        .expect("read")
        .expect("present");
    assert_eq!(read.len(), big.len());
}
