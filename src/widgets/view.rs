//! What a widget implementation sees of the core, and what it may send back.

use crate::layout::LayoutItem;
use crate::widgets::WidgetType;

/// Render-time projection of one widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetView {
    pub id: String,
    pub kind: WidgetType,
    pub title: String,
    pub subtitle: String,
    pub is_expanded: bool,
    pub is_edit_mode: bool,
    /// Placement at the active breakpoint.
    pub placement: Option<LayoutItem>,
}

impl WidgetView {
    pub fn on_expand(&self) -> WidgetIntent {
        WidgetIntent::Expand(self.id.clone())
    }

    pub fn on_remove(&self) -> WidgetIntent {
        WidgetIntent::Remove(self.id.clone())
    }
}

/// Callbacks a widget may raise. Dispatched through the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetIntent {
    /// Toggle single-widget expansion.
    Expand(String),
    Remove(String),
}
