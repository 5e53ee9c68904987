//! Guarded remote sync.
//!
//! At most one upsert runs at a time per gateway. A request made while one is
//! outstanding is dropped, not queued, and reported as
//! [`SyncOutcome::AlreadyInFlight`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::persistence::gateway::LastSyncedWriter;
use crate::persistence::{DashboardSnapshot, RemoteStore, SyncError};

/// Observable sync state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStatus {
    pub is_syncing: bool,
    /// Epoch milliseconds of the last successful sync.
    pub last_synced: Option<i64>,
    /// Failure of the most recent attempt; cleared when a new one starts.
    pub error: Option<SyncError>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The remote accepted the snapshot at this epoch-millisecond time.
    Synced { at: i64 },
    /// Another sync was outstanding; this one did not start.
    AlreadyInFlight,
}

/// Mirrors the latest committed snapshot to a [`RemoteStore`].
///
/// Cheap to clone; clones share the inflight flag.
#[derive(Clone)]
pub struct SyncChannel {
    remote: Arc<dyn RemoteStore>,
    snapshots: watch::Receiver<DashboardSnapshot>,
    last_synced: LastSyncedWriter,
    inflight: Arc<AtomicBool>,
    status: Arc<watch::Sender<SyncStatus>>,
    timeout: Duration,
}

impl SyncChannel {
    pub(crate) fn new(
        remote: Arc<dyn RemoteStore>,
        snapshots: watch::Receiver<DashboardSnapshot>,
        last_synced: LastSyncedWriter,
        inflight: Arc<AtomicBool>,
        status: Arc<watch::Sender<SyncStatus>>,
        timeout: Duration,
    ) -> Self {
        Self {
            remote,
            snapshots,
            last_synced,
            inflight,
            status,
            timeout,
        }
    }

    /// Upsert the snapshot committed most recently at the time of the call.
    ///
    /// A timeout is reported immediately, but the inflight flag stays set
    /// until the abandoned upsert actually returns.
    pub async fn sync_now(&self) -> Result<SyncOutcome, SyncError> {
        let Some(guard) = InflightGuard::acquire(&self.inflight, &self.status) else {
            debug!("sync already in flight, dropping request");
            return Ok(SyncOutcome::AlreadyInFlight);
        };

        let snapshot = self.snapshots.borrow().clone();
        let remote = Arc::clone(&self.remote);
        let task = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            remote.upsert(&snapshot)
        });

        let result = match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => Err(SyncError::Join(e.to_string())),
            Err(_) => Err(SyncError::Timeout(self.timeout)),
        };

        match result {
            Ok(()) => {
                let at = chrono::Utc::now().timestamp_millis();
                if let Err(e) = self.last_synced.record(at) {
                    warn!(error = %e, "failed to record last sync time");
                }
                self.status.send_modify(|s| {
                    s.last_synced = Some(at);
                    s.error = None;
                });
                info!(at, "dashboard synced");
                Ok(SyncOutcome::Synced { at })
            }
            Err(e) => {
                warn!(error = %e, "dashboard sync failed");
                self.status.send_modify(|s| s.error = Some(e.clone()));
                Err(e)
            }
        }
    }

    /// Receiver for new committed snapshots.
    pub fn changes(&self) -> watch::Receiver<DashboardSnapshot> {
        self.snapshots.clone()
    }

    pub fn is_inflight(&self) -> bool {
        self.inflight.load(Ordering::SeqCst)
    }

    pub fn status(&self) -> SyncStatus {
        self.status.borrow().clone()
    }
}

/// Holds the inflight flag. Clears it and `is_syncing` on drop.
struct InflightGuard {
    flag: Arc<AtomicBool>,
    status: Arc<watch::Sender<SyncStatus>>,
}

impl InflightGuard {
    fn acquire(flag: &Arc<AtomicBool>, status: &Arc<watch::Sender<SyncStatus>>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()?;
        status.send_modify(|s| {
            s.is_syncing = true;
            s.error = None;
        });
        Some(Self {
            flag: Arc::clone(flag),
            status: Arc::clone(status),
        })
    }
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.status.send_modify(|s| s.is_syncing = false);
        self.flag.store(false, Ordering::SeqCst);
    }
}
