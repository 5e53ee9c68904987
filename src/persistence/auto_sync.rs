//! Background sync task.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::error::ConfigError;
use crate::config::schema::SyncConfig;
use crate::persistence::{
    DashboardSnapshot, HttpRemote, PersistenceGateway, SyncChannel, SyncOutcome,
};

/// Periodic and change-driven sync running on the tokio runtime.
///
/// Syncs every `interval`, and once more `debounce` after the last committed
/// change in a burst. Stops on [`shutdown`](Self::shutdown); dropping the
/// handle aborts the task.
pub struct AutoSync {
    shutdown_tx: broadcast::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl AutoSync {
    /// Spawn the loop. Must be called from inside a tokio runtime.
    pub fn spawn(channel: SyncChannel, interval: Duration, debounce: Duration) -> Self {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        // Subscribe before spawning so commits made right after this call
        // still count as changes.
        let mut changes = channel.changes();
        changes.borrow_and_update();
        let handle = tokio::spawn(run(channel, changes, interval, debounce, shutdown_rx));
        info!(?interval, ?debounce, "auto-sync started");
        Self {
            shutdown_tx,
            handle: Some(handle),
        }
    }

    /// Start auto-sync to the HTTP remote described by `[sync]`.
    ///
    /// `Ok(None)` when auto-sync is disabled or no endpoint is set. Must be
    /// called from inside a tokio runtime when it returns `Some`.
    pub fn from_config(
        gateway: &PersistenceGateway,
        sync: &SyncConfig,
    ) -> Result<Option<Self>, ConfigError> {
        if !sync.enabled {
            debug!("auto-sync disabled");
            return Ok(None);
        }
        let timeout = sync.timeout()?;
        let interval = sync.interval()?;
        let debounce = sync.debounce()?;
        let Some(remote) = HttpRemote::from_config(sync, timeout) else {
            return Ok(None);
        };
        let channel = gateway.sync_channel(Arc::new(remote), timeout);
        Ok(Some(Self::spawn(channel, interval, debounce)))
    }

    /// Stop the loop and wait for it to exit. An upsert already running on
    /// the blocking pool finishes on its own.
    pub async fn shutdown(mut self) {
        let _ = self.shutdown_tx.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for AutoSync {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

async fn run(
    channel: SyncChannel,
    mut changes: watch::Receiver<DashboardSnapshot>,
    interval: Duration,
    debounce: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately; startup is not a reason to sync.
    ticker.tick().await;

    let mut deadline: Option<Instant> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                deadline = None;
                fire(&channel, "interval").await;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    info!("snapshot source closed, auto-sync stopping");
                    break;
                }
                deadline = Some(Instant::now() + debounce);
            }
            _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                fire(&channel, "debounce").await;
            }
            _ = shutdown_rx.recv() => {
                info!("auto-sync shutting down");
                break;
            }
        }
    }
}

async fn fire(channel: &SyncChannel, reason: &'static str) {
    match channel.sync_now().await {
        Ok(SyncOutcome::Synced { at }) => debug!(reason, at, "auto-sync completed"),
        Ok(SyncOutcome::AlreadyInFlight) => debug!(reason, "auto-sync skipped, sync in flight"),
        // Already logged and recorded in the status; the next trigger retries.
        Err(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_store::MemoryStore;

    fn gateway() -> PersistenceGateway {
        PersistenceGateway::new(Arc::new(MemoryStore::new()))
    }

    fn enabled(endpoint: &str) -> SyncConfig {
        SyncConfig {
            enabled: true,
            endpoint: endpoint.to_string(),
            token_env: String::new(),
            ..SyncConfig::default()
        }
    }

    #[test]
    fn disabled_config_starts_nothing() {
        let sync = SyncConfig {
            endpoint: "http://127.0.0.1:9/dashboard".to_string(),
            ..SyncConfig::default()
        };
        let auto = AutoSync::from_config(&gateway(), &sync).expect("valid config");
        assert!(auto.is_none());
    }

    #[test]
    fn missing_endpoint_starts_nothing() {
        let auto = AutoSync::from_config(&gateway(), &enabled("")).expect("valid config");
        assert!(auto.is_none());
    }

    #[test]
    fn bad_duration_is_a_config_error() {
        let sync = SyncConfig {
            debounce: "later".to_string(),
            ..enabled("http://127.0.0.1:9/dashboard")
        };
        let err = AutoSync::from_config(&gateway(), &sync)
            .err()
            .expect("debounce does not parse");
        assert!(matches!(
            err,
            ConfigError::InvalidDuration {
                field: "sync.debounce",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn enabled_config_spawns_a_running_task() {
        let gateway = gateway();
        let auto = AutoSync::from_config(&gateway, &enabled("http://127.0.0.1:9/dashboard"))
            .expect("valid config")
            .expect("auto-sync enabled");
        assert!(!auto.is_finished());
        auto.shutdown().await;
    }
}
