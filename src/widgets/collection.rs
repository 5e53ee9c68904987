//! Ordered set of widget instances.

use std::collections::HashSet;

use crate::widgets::{Widget, WidgetRegistry, WidgetType};

fn wall_clock_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Widgets in insertion order, with ids unique within the collection.
///
/// New ids are `<type>-<stamp>` where the stamp is the wall clock in
/// milliseconds, forced to increase strictly across calls so two adds in the
/// same millisecond never collide.
#[derive(Debug, Clone)]
pub struct WidgetCollection {
    widgets: Vec<Widget>,
    last_stamp: i64,
    clock: fn() -> i64,
}

impl Default for WidgetCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for WidgetCollection {
    fn eq(&self, other: &Self) -> bool {
        self.widgets == other.widgets
    }
}

impl WidgetCollection {
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
            last_stamp: 0,
            clock: wall_clock_ms,
        }
    }

    /// Replace the id clock. Tests use a frozen clock to exercise the
    /// monotonic bump.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    /// Build from stored widgets, keeping the first occurrence of each id.
    ///
    /// Returns the collection and the ids of the dropped duplicates.
    pub fn from_widgets(widgets: Vec<Widget>) -> (Self, Vec<String>) {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(widgets.len());
        let mut dropped = Vec::new();
        for widget in widgets {
            if seen.insert(widget.id.clone()) {
                kept.push(widget);
            } else {
                dropped.push(widget.id);
            }
        }
        let mut collection = Self::new();
        collection.widgets = kept;
        (collection, dropped)
    }

    /// Create a widget of `kind` with registry defaults and append it.
    pub fn add(&mut self, kind: WidgetType, registry: &WidgetRegistry) -> Widget {
        let descriptor = registry.describe(&kind);
        let id = self.next_id(&kind);
        let widget = Widget {
            id,
            kind,
            title: descriptor.title,
            subtitle: descriptor.subtitle,
        };
        self.widgets.push(widget.clone());
        widget
    }

    fn next_id(&mut self, kind: &WidgetType) -> String {
        let mut stamp = (self.clock)().max(self.last_stamp + 1);
        loop {
            let id = format!("{kind}-{stamp}");
            if !self.contains(&id) {
                self.last_stamp = stamp;
                return id;
            }
            stamp += 1;
        }
    }

    /// Remove the widget with `id`. Returns whether it existed.
    pub fn remove(&mut self, id: &str) -> bool {
        match self.widgets.iter().position(|w| w.id == id) {
            Some(index) => {
                self.widgets.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn list(&self) -> &[Widget] {
        &self.widgets
    }

    pub fn get(&self, id: &str) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.widgets.iter().any(|w| w.id == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.widgets.iter().map(|w| w.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
