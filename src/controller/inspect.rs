//! Read-side views of the controller.

use std::collections::HashSet;

use tracing::error;

use super::{DashboardController, UiMode};
use crate::layout::Breakpoint;
use crate::widgets::WidgetView;

impl DashboardController {
    /// What to render, in collection order. While a widget is expanded only
    /// that widget is listed.
    pub fn views(&self) -> Vec<WidgetView> {
        let is_edit_mode = self.mode() == UiMode::Edit;
        self.widgets
            .list()
            .iter()
            .filter(|w| self.focus.as_deref().map_or(true, |id| id == w.id))
            .map(|w| WidgetView {
                id: w.id.clone(),
                kind: w.kind.clone(),
                title: w.title.clone(),
                subtitle: w.subtitle.clone(),
                is_expanded: self.focus.as_deref() == Some(w.id.as_str()),
                is_edit_mode,
                placement: self.layouts.item(self.active, &w.id).cloned(),
            })
            .collect()
    }

    /// Describe every broken widget/layout invariant. Empty when consistent.
    ///
    /// Violations are logged at error level; nothing here panics.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut ids = HashSet::new();
        for id in self.widgets.ids() {
            if !ids.insert(id) {
                problems.push(format!("widget id {id} is repeated"));
            }
        }

        for bp in Breakpoint::ALL {
            let items = self.layouts.items(bp);
            for id in &ids {
                let count = items.iter().filter(|item| item.id == *id).count();
                if count != 1 {
                    problems.push(format!("{bp}: widget {id} has {count} placements"));
                }
            }
            for (n, item) in items.iter().enumerate() {
                if !ids.contains(item.id.as_str()) {
                    problems.push(format!("{bp}: placement {} has no widget", item.id));
                }
                if item.right() > bp.cols() {
                    problems.push(format!(
                        "{bp}: {} ends at column {} of {}",
                        item.id,
                        item.right(),
                        bp.cols()
                    ));
                }
                if item.w < item.min_w || item.h < item.min_h {
                    problems.push(format!("{bp}: {} is below its minimum size", item.id));
                }
                for other in &items[n + 1..] {
                    if item.overlaps(other) {
                        problems.push(format!("{bp}: {} overlaps {}", item.id, other.id));
                    }
                }
            }
        }

        if let Some(focus) = &self.focus {
            if !ids.contains(focus.as_str()) {
                problems.push(format!("focus {focus} is not a widget"));
            }
        }

        for problem in &problems {
            error!(%problem, "dashboard invariant violated");
        }
        problems
    }
}
