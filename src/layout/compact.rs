//! Vertical compaction.
//!
//! Items are visited in `(y, x)` order (stable, so ties keep array order) and
//! each one is dropped to the lowest row where it overlaps nothing already
//! placed. Sizes are clamped to the column count, the minimums and
//! [`MAX_ITEM_HEIGHT`] first, so the result never extends past the right edge.
//!
//! Compacting a compacted layout returns it unchanged: every item in the
//! output rests either on row 0 or on the bottom edge of an item above it in
//! its column span, and those supporting items sort before it.

use crate::layout::{LayoutItem, MAX_ITEM_HEIGHT};

/// Compact `items` into a grid `cols` wide. Output keeps the input order.
pub fn compact(items: &[LayoutItem], cols: u32) -> Vec<LayoutItem> {
    let cols = cols.max(1);
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by_key(|&i| (items[i].y, items[i].x));

    let mut placed: Vec<LayoutItem> = Vec::with_capacity(items.len());
    let mut out: Vec<Option<LayoutItem>> = vec![None; items.len()];

    for index in order {
        let mut item = clamp(&items[index], cols);
        item.y = lowest_free_row(&item, &placed);
        placed.push(item.clone());
        out[index] = Some(item);
    }

    out.into_iter().flatten().collect()
}

fn clamp(item: &LayoutItem, cols: u32) -> LayoutItem {
    let mut item = item.clone();
    item.min_w = item.min_w.clamp(1, cols);
    item.min_h = item.min_h.clamp(1, MAX_ITEM_HEIGHT);
    item.w = item.w.max(item.min_w).min(cols);
    item.h = item.h.max(item.min_h).min(MAX_ITEM_HEIGHT);
    item.x = item.x.min(cols - item.w);
    item
}

/// The minimum feasible row is 0 or the bottom of some placed item sharing
/// columns with `item`.
fn lowest_free_row(item: &LayoutItem, placed: &[LayoutItem]) -> u32 {
    let mut candidates: Vec<u32> = placed
        .iter()
        .filter(|p| p.shares_columns(item))
        .map(LayoutItem::bottom)
        .collect();
    candidates.push(0);
    candidates.sort_unstable();
    candidates.dedup();

    let mut probe = item.clone();
    for y in candidates {
        probe.y = y;
        if !placed.iter().any(|p| p.overlaps(&probe)) {
            return y;
        }
    }
    // The largest bottom among column-sharing items is always free.
    placed
        .iter()
        .filter(|p| p.shares_columns(item))
        .map(LayoutItem::bottom)
        .max()
        .unwrap_or(0)
}
