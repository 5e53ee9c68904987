//! Owner of the local key-value store.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use board_store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::persistence::sync::{SyncChannel, SyncStatus};
use crate::persistence::{keys, DashboardSnapshot, PersistError, RemoteStore};
use crate::widgets::Widget;

/// Local persistence plus the hand-off point for remote sync.
///
/// Writes are synchronous: when [`commit`](Self::commit) returns, the store
/// holds the new snapshot (or the error says why not). Every committed
/// snapshot is also published to the `watch` channel that sync reads from.
pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
    committed: watch::Sender<DashboardSnapshot>,
    inflight: Arc<AtomicBool>,
    status: Arc<watch::Sender<SyncStatus>>,
    commits: AtomicUsize,
}

impl PersistenceGateway {
    /// Wrap `store`. The sync status starts from the stored last-synced time.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (committed, _) = watch::channel(DashboardSnapshot::default());
        let gateway = Self {
            store,
            committed,
            inflight: Arc::new(AtomicBool::new(false)),
            status: Arc::new(watch::channel(SyncStatus::default()).0),
            commits: AtomicUsize::new(0),
        };
        let last_synced = gateway.load_or::<Option<i64>>(keys::LAST_SYNCED, None);
        gateway.status.send_modify(|s| s.last_synced = last_synced);
        gateway
    }

    /// Read and decode `key`. `Ok(None)` when the key is absent.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistError> {
        let raw = self.store.read(key).map_err(|source| PersistError::Read {
            key: key.to_string(),
            source,
        })?;
        raw.map(|text| {
            serde_json::from_str(&text).map_err(|source| PersistError::Decode {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
    }

    /// Read `key`, falling back to `default` when it is absent or unreadable.
    pub fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                warn!(key, error = %e, "stored value unusable, using default");
                default
            }
        }
    }

    /// Encode and write one key.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), PersistError> {
        let text = encode(key, value)?;
        self.write_raw(key, &text)
    }

    /// Persist `snapshot` and publish it for sync.
    ///
    /// The snapshot is published even when the write fails: in-memory state
    /// is authoritative for the session and remote sync should mirror it.
    pub fn commit(&self, snapshot: DashboardSnapshot) -> Result<(), PersistError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        let result = self.write_snapshot(&snapshot);
        self.publish(snapshot);
        result
    }

    fn write_snapshot(&self, snapshot: &DashboardSnapshot) -> Result<(), PersistError> {
        // Encode both halves before touching the store.
        let widgets = encode(keys::WIDGETS, &snapshot.widgets)?;
        let layouts = encode(keys::LAYOUTS, &snapshot.layouts)?;
        self.write_raw(keys::WIDGETS, &widgets)?;
        self.write_raw(keys::LAYOUTS, &layouts)
    }

    /// Make `snapshot` the state sync mirrors, without writing it.
    pub fn publish(&self, snapshot: DashboardSnapshot) {
        self.committed.send_replace(snapshot);
    }

    /// Drop the private state a removed widget left behind.
    pub fn discard_private_state(&self, widget: &Widget) {
        let Some(key) = widget.private_key() else {
            return;
        };
        match self.store.remove(&key) {
            Ok(()) => debug!(%key, "discarded widget state"),
            Err(e) => warn!(%key, error = %e, "failed to discard widget state"),
        }
    }

    /// Number of [`commit`](Self::commit) calls so far.
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::SeqCst)
    }

    /// Most recently committed or published snapshot.
    pub fn latest(&self) -> DashboardSnapshot {
        self.committed.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.committed.subscribe()
    }

    pub fn sync_status(&self) -> SyncStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe_sync(&self) -> watch::Receiver<SyncStatus> {
        self.status.subscribe()
    }

    /// A sync channel mirroring this gateway's snapshots to `remote`.
    ///
    /// All channels made by one gateway share one inflight flag.
    pub fn sync_channel(&self, remote: Arc<dyn RemoteStore>, timeout: Duration) -> SyncChannel {
        SyncChannel::new(
            remote,
            self.committed.subscribe(),
            self.last_synced_writer(),
            Arc::clone(&self.inflight),
            Arc::clone(&self.status),
            timeout,
        )
    }

    /// The only write access to the store that sync is given.
    pub(crate) fn last_synced_writer(&self) -> LastSyncedWriter {
        LastSyncedWriter {
            store: Arc::clone(&self.store),
        }
    }

    fn write_raw(&self, key: &str, text: &str) -> Result<(), PersistError> {
        write_key(self.store.as_ref(), key, text)
    }
}

/// Records successful sync times under [`keys::LAST_SYNCED`].
#[derive(Clone)]
pub(crate) struct LastSyncedWriter {
    store: Arc<dyn KeyValueStore>,
}

impl LastSyncedWriter {
    pub(crate) fn record(&self, at: i64) -> Result<(), PersistError> {
        let text = encode(keys::LAST_SYNCED, &at)?;
        write_key(self.store.as_ref(), keys::LAST_SYNCED, &text)
    }
}

fn write_key(store: &dyn KeyValueStore, key: &str, text: &str) -> Result<(), PersistError> {
    store.write(key, text).map_err(|source| PersistError::Write {
        key: key.to_string(),
        source,
    })
}

fn encode<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<String, PersistError> {
    serde_json::to_string(value).map_err(|source| PersistError::Encode {
        key: key.to_string(),
        source,
    })
}
