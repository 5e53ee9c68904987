//! Intents: mode changes, focus, and the compound widget/layout mutations.

use tracing::{debug, info};

use super::{DashboardController, TransitionError, UiMode};
use crate::layout::{Breakpoint, LayoutItem};
use crate::widgets::{Widget, WidgetIntent, WidgetType};

impl DashboardController {
    // -----------------------------------------------------------------------
    // Mode
    // -----------------------------------------------------------------------

    /// Browse → Edit. Rejected while a widget is expanded.
    ///
    /// Without strict transitions an expanded widget is collapsed instead.
    pub fn enter_edit(&mut self) -> Result<(), TransitionError> {
        if self.mode() == UiMode::Edit {
            return Ok(());
        }
        if self.focus.is_some() {
            if self.strict {
                return Err(TransitionError::FocusActive);
            }
            debug!("collapsing expanded widget to enter edit mode");
            self.focus = None;
        }
        self.set_mode(UiMode::Edit);
        Ok(())
    }

    /// Edit → Browse. A no-op while browsing.
    pub fn exit_edit(&mut self) {
        self.set_mode(UiMode::Browse);
    }

    /// Flip between browse and edit. Returns the new mode.
    pub fn toggle_edit(&mut self) -> Result<UiMode, TransitionError> {
        match self.mode() {
            UiMode::Browse => self.enter_edit()?,
            UiMode::Edit => self.exit_edit(),
        }
        Ok(self.mode())
    }

    fn set_mode(&mut self, mode: UiMode) {
        let changed = self.mode.send_if_modified(|current| {
            let changed = *current != mode;
            *current = mode;
            changed
        });
        if changed {
            info!(?mode, "mode changed");
        }
    }

    fn require(&self, mode: UiMode) -> Result<(), TransitionError> {
        if !self.strict || self.mode() == mode {
            return Ok(());
        }
        Err(match mode {
            UiMode::Browse => TransitionError::NotInBrowse,
            UiMode::Edit => TransitionError::NotInEdit,
        })
    }

    // -----------------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------------

    /// Show one widget on its own. Browse only.
    pub fn expand(&mut self, id: &str) -> Result<(), TransitionError> {
        self.require(UiMode::Browse)?;
        if !self.widgets.contains(id) {
            return Err(TransitionError::UnknownWidget(id.to_string()));
        }
        self.focus = Some(id.to_string());
        debug!(id, "widget expanded");
        Ok(())
    }

    pub fn collapse(&mut self) {
        if self.focus.take().is_some() {
            debug!("widget collapsed");
        }
    }

    /// Collapse `id` if it is the expanded widget, otherwise expand it.
    pub fn toggle_expansion(&mut self, id: &str) -> Result<(), TransitionError> {
        if self.focus.as_deref() == Some(id) {
            self.collapse();
            Ok(())
        } else {
            self.expand(id)
        }
    }

    // -----------------------------------------------------------------------
    // Widgets
    // -----------------------------------------------------------------------

    /// Create a widget and place it at every breakpoint, then persist.
    /// Browse only.
    pub fn add_widget(&mut self, kind: WidgetType) -> Result<Widget, TransitionError> {
        self.require(UiMode::Browse)?;
        let descriptor = self.registry.describe(&kind);
        let widget = self.widgets.add(kind, &self.registry);
        self.layouts.place_new(&widget.id, &descriptor);
        info!(id = %widget.id, kind = %widget.kind, "widget added");
        self.persist_if_changed("add widget");
        Ok(widget)
    }

    /// Delete a widget and its placements, then persist. Edit only.
    ///
    /// Clears focus first if the widget was expanded. The widget's private
    /// state key is discarded after the dashboard is saved.
    pub fn remove_widget(&mut self, id: &str) -> Result<(), TransitionError> {
        self.require(UiMode::Edit)?;
        let Some(widget) = self.widgets.get(id).cloned() else {
            return Err(TransitionError::UnknownWidget(id.to_string()));
        };
        if self.focus.as_deref() == Some(id) {
            self.focus = None;
        }
        self.widgets.remove(id);
        self.layouts.remove(id);
        info!(id, "widget removed");
        self.persist_if_changed("remove widget");
        self.gateway.discard_private_state(&widget);
        Ok(())
    }

    /// Route a callback raised by a widget.
    pub fn dispatch(&mut self, intent: WidgetIntent) -> Result<(), TransitionError> {
        match intent {
            WidgetIntent::Expand(id) => self.toggle_expansion(&id),
            WidgetIntent::Remove(id) => self.remove_widget(&id),
        }
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Take a drag/resize result for `bp`, compact it, and persist if the
    /// stored placements changed. Edit only. Returns whether they changed.
    pub fn on_external_layout_change(
        &mut self,
        bp: Breakpoint,
        items: &[LayoutItem],
    ) -> Result<bool, TransitionError> {
        self.require(UiMode::Edit)?;
        let applied = self.layouts.apply_external_change(bp, items);
        let compacted = self.layouts.compact(bp);
        if !(applied || compacted) {
            debug!(%bp, "layout change is a no-op");
            return Ok(false);
        }
        self.persist_if_changed("layout change");
        Ok(true)
    }

    /// Switch to the breakpoint for `width` and compact it. Persists only if
    /// compaction moved something.
    pub fn on_viewport_resize(&mut self, width: u32) -> Breakpoint {
        let bp = Breakpoint::for_width(width);
        if bp != self.active {
            debug!(from = %self.active, to = %bp, width, "breakpoint switched");
            self.active = bp;
        }
        if self.layouts.compact(bp) {
            self.persist_if_changed("breakpoint switch");
        }
        bp
    }
}
