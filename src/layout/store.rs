//! Layout store: one placement array per breakpoint, mutated only through
//! entry points that keep every breakpoint in step.

use std::collections::HashSet;

use crate::layout::{compact, Breakpoint, LayoutItem, LayoutState, MAX_ITEM_HEIGHT};
use crate::widgets::{WidgetCollection, WidgetDescriptor, WidgetRegistry};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStore {
    layouts: LayoutState,
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::from_state(LayoutState::new())
    }
}

impl LayoutStore {
    /// Wrap stored placements. Missing breakpoints start empty.
    pub fn from_state(mut layouts: LayoutState) -> Self {
        for bp in Breakpoint::ALL {
            layouts.entry(bp).or_default();
        }
        Self { layouts }
    }

    pub fn state(&self) -> &LayoutState {
        &self.layouts
    }

    pub fn items(&self, bp: Breakpoint) -> &[LayoutItem] {
        self.layouts.get(&bp).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn item(&self, bp: Breakpoint, id: &str) -> Option<&LayoutItem> {
        self.items(bp).iter().find(|item| item.id == id)
    }

    /// Lowest occupied row + 1 at `bp`, or 0 when empty.
    pub fn bottom(&self, bp: Breakpoint) -> u32 {
        self.items(bp).iter().map(LayoutItem::bottom).max().unwrap_or(0)
    }

    /// Place `id` below everything else at every breakpoint, using the
    /// descriptor's footprint narrowed to the column count.
    ///
    /// Breakpoints that already hold `id` are left alone.
    pub fn place_new(&mut self, id: &str, descriptor: &WidgetDescriptor) {
        for bp in Breakpoint::ALL {
            if self.item(bp, id).is_some() {
                continue;
            }
            let y = self.bottom(bp);
            let w = descriptor.default_width.min(bp.cols());
            let item = LayoutItem::new(id, 0, y, w, descriptor.default_height);
            self.layouts.entry(bp).or_default().push(item);
        }
    }

    /// Delete `id` from every breakpoint. Other items keep their positions.
    pub fn remove(&mut self, id: &str) -> bool {
        let mut removed = false;
        for items in self.layouts.values_mut() {
            let before = items.len();
            items.retain(|item| item.id != id);
            removed |= items.len() != before;
        }
        removed
    }

    /// Take a drag/resize result for one breakpoint.
    ///
    /// Ids this store does not already hold at `bp` are ignored, as are
    /// repeats of an id. Minimum sizes stay as stored and are enforced, and
    /// heights are capped at [`MAX_ITEM_HEIGHT`].
    /// Items the input leaves out keep their current placement. The result is
    /// ordered like the current array, so a reordering alone changes nothing.
    ///
    /// Returns whether the stored array changed.
    pub fn apply_external_change(&mut self, bp: Breakpoint, incoming: &[LayoutItem]) -> bool {
        let current = self.items(bp);
        let mut seen = HashSet::new();
        let mut next: Vec<LayoutItem> = Vec::with_capacity(current.len());

        for existing in current {
            let update = incoming
                .iter()
                .find(|item| item.id == existing.id && seen.insert(item.id.as_str()));
            let item = match update {
                Some(update) => LayoutItem {
                    id: existing.id.clone(),
                    x: update.x,
                    y: update.y,
                    w: update.w.max(existing.min_w),
                    h: update.h.max(existing.min_h).min(MAX_ITEM_HEIGHT),
                    min_w: existing.min_w,
                    min_h: existing.min_h,
                },
                None => existing.clone(),
            };
            next.push(item);
        }

        if next.as_slice() == current {
            return false;
        }
        self.layouts.insert(bp, next);
        true
    }

    /// Compact one breakpoint. Returns whether anything moved.
    pub fn compact(&mut self, bp: Breakpoint) -> bool {
        let current = self.items(bp);
        let compacted = compact(current, bp.cols());
        if compacted.as_slice() == current {
            return false;
        }
        self.layouts.insert(bp, compacted);
        true
    }

    pub fn compact_all(&mut self) -> bool {
        Breakpoint::ALL
            .into_iter()
            .fold(false, |changed, bp| self.compact(bp) | changed)
    }

    /// Make the placements mirror `widgets` exactly: drop entries for ids
    /// that are not widgets, drop repeated ids, and place widgets that have
    /// no entry. Returns whether anything changed.
    pub fn reconcile(&mut self, widgets: &WidgetCollection, registry: &WidgetRegistry) -> bool {
        let mut changed = false;
        for bp in Breakpoint::ALL {
            let items = self.layouts.entry(bp).or_default();
            let before = items.len();
            let mut seen = HashSet::new();
            items.retain(|item| widgets.contains(&item.id) && seen.insert(item.id.clone()));
            changed |= items.len() != before;
        }
        for widget in widgets.list() {
            let missing = Breakpoint::ALL
                .into_iter()
                .any(|bp| self.item(bp, &widget.id).is_none());
            if missing {
                self.place_new(&widget.id, &registry.describe(&widget.kind));
                changed = true;
            }
        }
        changed
    }
}
