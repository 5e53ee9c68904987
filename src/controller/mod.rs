//! Dashboard controller: the only path through which widgets and layouts
//! change.
//!
//! Every intent runs to completion against [`WidgetCollection`] and
//! [`LayoutStore`] together, then the combined snapshot is compared with the
//! last one written and committed through the [`PersistenceGateway`] only if
//! it differs.
//!
//! With strict transitions on (the default) an intent whose mode
//! precondition does not hold is rejected with a [`TransitionError`]. With
//! them off the controller trusts its caller on modes; the widget/layout
//! invariants are upheld either way.

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::defaults::{default_layouts, default_widgets};
use crate::layout::{Breakpoint, LayoutStore};
use crate::persistence::{keys, DashboardSnapshot, PersistError, PersistenceGateway};
use crate::theme::{ThemeApplier, ThemeConfig};
use crate::widgets::{WidgetCollection, WidgetRegistry};

mod error;
mod inspect;
mod transitions;

#[cfg(test)]
mod tests;

pub use error::TransitionError;

/// Interaction mode. Focus is tracked separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UiMode {
    #[default]
    Browse,
    Edit,
}

pub struct DashboardController {
    registry: WidgetRegistry,
    widgets: WidgetCollection,
    layouts: LayoutStore,
    theme: ThemeConfig,
    mode: watch::Sender<UiMode>,
    focus: Option<String>,
    active: Breakpoint,
    strict: bool,
    gateway: PersistenceGateway,
    /// Serialized form of the last snapshot written successfully.
    persisted: String,
    last_write_error: Option<PersistError>,
}

impl DashboardController {
    /// Restore the dashboard from `gateway`, falling back to the default
    /// dashboard for anything missing or unreadable.
    ///
    /// Stored state that breaks the widget/layout invariants (repeated ids,
    /// orphaned or missing placements, overlaps) is repaired and written back.
    pub fn load(gateway: PersistenceGateway, registry: WidgetRegistry) -> Self {
        let stored_widgets = gateway.load_or(keys::WIDGETS, default_widgets());
        let stored_layouts = gateway.load_or(keys::LAYOUTS, default_layouts());
        let theme = gateway.load_or(keys::THEME, ThemeConfig::default());

        let (widgets, dropped) = WidgetCollection::from_widgets(stored_widgets);
        if !dropped.is_empty() {
            warn!(?dropped, "dropped widgets with repeated ids");
        }
        let mut layouts = LayoutStore::from_state(stored_layouts);
        let reconciled = layouts.reconcile(&widgets, &registry);
        let compacted = layouts.compact_all();
        let repaired = !dropped.is_empty() || reconciled || compacted;

        let mut controller = Self {
            registry,
            widgets,
            layouts,
            theme,
            mode: watch::channel(UiMode::Browse).0,
            focus: None,
            active: Breakpoint::Lg,
            strict: true,
            gateway,
            persisted: String::new(),
            last_write_error: None,
        };

        if repaired {
            info!("stored dashboard repaired on load");
            controller.persist_if_changed("repair");
        } else {
            let snapshot = controller.snapshot();
            controller.persisted = serde_json::to_string(&snapshot).unwrap_or_default();
            controller.gateway.publish(snapshot);
        }
        info!(widgets = controller.widgets.len(), "dashboard loaded");
        controller
    }

    pub fn set_strict_transitions(&mut self, strict: bool) {
        self.strict = strict;
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn mode(&self) -> UiMode {
        *self.mode.borrow()
    }

    /// Mode changes, for timers that pause in edit mode.
    pub fn subscribe_mode(&self) -> watch::Receiver<UiMode> {
        self.mode.subscribe()
    }

    pub fn focus(&self) -> Option<&str> {
        self.focus.as_deref()
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.active
    }

    pub fn widgets(&self) -> &WidgetCollection {
        &self.widgets
    }

    pub fn layouts(&self) -> &LayoutStore {
        &self.layouts
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn gateway(&self) -> &PersistenceGateway {
        &self.gateway
    }

    /// The most recent failed write, cleared by the next successful one.
    pub fn last_write_error(&self) -> Option<&PersistError> {
        self.last_write_error.as_ref()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            widgets: self.widgets.list().to_vec(),
            layouts: self.layouts.state().clone(),
        }
    }

    /// Replace and persist the theme.
    pub fn set_theme(&mut self, theme: ThemeConfig) {
        if theme == self.theme {
            debug!("theme unchanged");
            return;
        }
        self.theme = theme;
        match self.gateway.save(keys::THEME, &self.theme) {
            Ok(()) => {
                self.last_write_error = None;
                info!("theme saved");
            }
            Err(e) => {
                warn!(error = %e, "failed to save theme; keeping it for this session");
                self.last_write_error = Some(e);
            }
        }
    }

    pub fn apply_theme(&self, applier: &dyn ThemeApplier) {
        applier.apply(&self.theme);
    }

    /// Commit the current snapshot if it differs from the last one written.
    ///
    /// Returns whether a write was attempted. A failed write is logged and
    /// kept in [`last_write_error`](Self::last_write_error); the next change
    /// retries it.
    fn persist_if_changed(&mut self, reason: &'static str) -> bool {
        let snapshot = self.snapshot();
        let encoded = match serde_json::to_string(&snapshot) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(reason, error = %e, "failed to encode dashboard");
                return false;
            }
        };
        if encoded == self.persisted {
            debug!(reason, "dashboard unchanged, skipping write");
            return false;
        }
        match self.gateway.commit(snapshot) {
            Ok(()) => {
                self.persisted = encoded;
                self.last_write_error = None;
                info!(reason, "dashboard saved");
            }
            Err(e) => {
                warn!(reason, error = %e, "failed to save dashboard; keeping in-memory state");
                self.last_write_error = Some(e);
            }
        }
        true
    }
}
