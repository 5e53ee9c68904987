//! Catalog of widget defaults.

use std::collections::HashMap;

use crate::widgets::WidgetType;

/// Defaults applied when a widget of some type is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetDescriptor {
    pub title: String,
    pub subtitle: String,
    pub default_width: u32,
    pub default_height: u32,
}

impl WidgetDescriptor {
    pub fn new(title: &str, subtitle: &str, default_width: u32, default_height: u32) -> Self {
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            default_width: default_width.max(1),
            default_height: default_height.max(1),
        }
    }

    /// Descriptor used for any type the registry does not know.
    pub fn fallback() -> Self {
        Self::new("Widget", "", 1, 1)
    }
}

/// Lookup table from widget type to its defaults.
///
/// Lookups never fail: an unregistered type gets [`WidgetDescriptor::fallback`].
#[derive(Debug, Clone)]
pub struct WidgetRegistry {
    entries: HashMap<WidgetType, WidgetDescriptor>,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        for (kind, title, subtitle) in [
            (WidgetType::Music, "Ocean", "Nature Sounds"),
            (WidgetType::Notes, "Journal", "Today's thoughts"),
            (WidgetType::Meditation, "Meditation songs", "you can listen"),
            (WidgetType::Sleep, "Sleep", "Last night"),
            (WidgetType::MeditationTimer, "MEDITATION", ""),
            (WidgetType::Health, "Health", "Today's activity"),
            (WidgetType::Todo, "To-do", "Today's tasks"),
            (WidgetType::Habits, "Habits", "This week"),
            (WidgetType::Calendar, "Calendar", "Upcoming"),
        ] {
            registry.register(kind, WidgetDescriptor::new(title, subtitle, 1, 2));
        }
        registry
    }
}

impl WidgetRegistry {
    /// A registry with no entries; every lookup yields the fallback.
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace the descriptor for `kind`.
    pub fn register(&mut self, kind: WidgetType, descriptor: WidgetDescriptor) {
        self.entries.insert(kind, descriptor);
    }

    pub fn describe(&self, kind: &WidgetType) -> WidgetDescriptor {
        self.entries
            .get(kind)
            .cloned()
            .unwrap_or_else(WidgetDescriptor::fallback)
    }

    pub fn contains(&self, kind: &WidgetType) -> bool {
        self.entries.contains_key(kind)
    }

    /// Registered types in catalog order, followed by any custom ones sorted by name.
    pub fn available(&self) -> Vec<WidgetType> {
        let mut known: Vec<WidgetType> = WidgetType::KNOWN
            .into_iter()
            .filter(|k| self.entries.contains_key(k))
            .collect();
        let mut custom: Vec<WidgetType> = self
            .entries
            .keys()
            .filter(|k| !k.is_known())
            .cloned()
            .collect();
        custom.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        known.extend(custom);
        known
    }
}
