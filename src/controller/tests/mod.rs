//! Tests for the DashboardController.
//!
//! - `transitions`: mode, focus and precondition handling
//! - `scenarios`: end-to-end flows on the default dashboard
//! - `persistence`: load, repair, write suppression and write failures
//! - `invariants`: generated operation sequences checked after every step


use std::path::PathBuf;
use std::sync::Arc;

use board_store::{KeyValueStore, MemoryStore, StoreError};

use super::DashboardController;
use crate::persistence::PersistenceGateway;
use crate::widgets::WidgetRegistry;

/// Controller over a fresh in-memory store, plus the store for inspection.
pub(super) fn fresh() -> (DashboardController, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let controller = reload(&store);
    (controller, store)
}

/// Controller over an existing store, as after a restart.
pub(super) fn reload(store: &Arc<MemoryStore>) -> DashboardController {
    let store: Arc<dyn KeyValueStore> = store.clone();
    DashboardController::load(PersistenceGateway::new(store), WidgetRegistry::default())
}

/// Store that reads nothing and refuses every write.
pub(super) struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn read(&self, _key: &str) -> board_store::Result<Option<String>> {
        Ok(None)
    }

    fn write(&self, key: &str, _value: &str) -> board_store::Result<()> {
        Err(StoreError::Write {
            path: PathBuf::from(format!("/read-only/{key}.json")),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }

    fn remove(&self, _key: &str) -> board_store::Result<()> {
        Ok(())
    }

    fn keys(&self) -> board_store::Result<Vec<String>> {
        Ok(Vec::new())
    }
}

pub(super) fn assert_consistent(controller: &DashboardController) {
    let problems = controller.invariant_violations();
    assert!(problems.is_empty(), "invariants violated: {problems:#?}");
}
