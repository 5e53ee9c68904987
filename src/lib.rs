//! Widget Board library
//!
//! State and layout engine for a personal widget dashboard: a set of widgets
//! placed on a responsive grid, persisted locally and mirrored to a remote
//! store.
//!
//! # Structure
//!
//! - [`widgets`]: widget types, the registry of defaults and the ordered
//!   collection on the dashboard.
//! - [`layout`]: per-breakpoint grid placement and vertical compaction.
//! - [`controller`]: the UI mode machine, and the only path through which
//!   widgets and layouts change.
//! - [`persistence`]: key/value persistence of the dashboard snapshot and
//!   guarded remote sync.
//! - [`config`] and [`logging`]: the TOML configuration file and the tracing
//!   subscriber.
//!
//! [`theme`] and [`countdown`] are the two pieces of widget-side state that
//! interact with the core: the persisted theme, and a timer that pauses in
//! edit mode.

pub mod config;
pub mod controller;
pub mod countdown;
pub mod defaults;
pub mod layout;
pub mod logging;
pub mod persistence;
pub mod theme;
pub mod widgets;

pub use controller::{DashboardController, TransitionError, UiMode};
pub use layout::{Breakpoint, LayoutItem, LayoutState, LayoutStore};
pub use persistence::{DashboardSnapshot, PersistenceGateway, SyncStatus};
pub use widgets::{Widget, WidgetCollection, WidgetRegistry, WidgetType};
