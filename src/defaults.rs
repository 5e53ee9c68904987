//! The dashboard a first run starts with.

use crate::layout::{Breakpoint, LayoutItem, LayoutState};
use crate::widgets::{Widget, WidgetType};

/// Six starter widgets, in display order.
pub fn default_widgets() -> Vec<Widget> {
    vec![
        Widget::new("music-1", WidgetType::Music, "Ocean", "Nature Sounds"),
        Widget::new("notes-1", WidgetType::Notes, "Journal", "Today's thoughts"),
        Widget::new(
            "meditation-1",
            WidgetType::Meditation,
            "Meditation songs",
            "you can listen",
        ),
        Widget::new("sleep-1", WidgetType::Sleep, "Sleep", "Last night"),
        Widget::new("meditation-timer-1", WidgetType::MeditationTimer, "MEDITATION", ""),
        Widget::new("health-1", WidgetType::Health, "Health", "Today's activity"),
    ]
}

const IDS: [&str; 6] = [
    "music-1",
    "notes-1",
    "meditation-1",
    "sleep-1",
    "meditation-timer-1",
    "health-1",
];

/// Placements for [`default_widgets`]: row-major fill of each breakpoint's
/// columns, every item 1×2.
pub fn default_layouts() -> LayoutState {
    Breakpoint::ALL
        .into_iter()
        .map(|bp| {
            let cols = bp.cols();
            let items = IDS
                .iter()
                .zip(0u32..)
                .map(|(id, n)| {
                    let min_h = if *id == "music-1" { 2 } else { 1 };
                    LayoutItem::new(*id, n % cols, (n / cols) * 2, 1, 2).with_min(1, min_h)
                })
                .collect();
            (bp, items)
        })
        .collect()
}
