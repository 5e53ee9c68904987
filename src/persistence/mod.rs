//! Local persistence and remote mirroring of the dashboard.
//!
//! [`PersistenceGateway`] is the only writer of the persisted snapshot. It
//! also publishes every committed snapshot on a `watch` channel, which is
//! where [`SyncChannel`] reads the state it mirrors.

mod auto_sync;
mod error;
mod gateway;
mod remote;
mod sync;

use serde::{Deserialize, Serialize};

use crate::layout::LayoutState;
use crate::widgets::Widget;

pub use auto_sync::AutoSync;
pub use error::{PersistError, SyncError};
pub use gateway::PersistenceGateway;
pub use remote::{HttpRemote, RemoteStore};
pub use sync::{SyncChannel, SyncOutcome, SyncStatus};

/// Storage keys owned by the core.
pub mod keys {
    pub const WIDGETS: &str = "dashboard-widgets";
    pub const LAYOUTS: &str = "dashboard-layouts";
    pub const THEME: &str = "custom-theme";
    /// Epoch milliseconds of the last successful remote sync.
    pub const LAST_SYNCED: &str = "dashboard-last-synced";
}

/// The compound state that is persisted and mirrored as one unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub widgets: Vec<Widget>,
    pub layouts: LayoutState,
}
