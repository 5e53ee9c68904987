use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::layout::Breakpoint;

/// Tallest an item may be, in rows. Taller requests are cut down.
pub const MAX_ITEM_HEIGHT: u32 = 1_000;

fn one() -> u32 {
    1
}

/// Placement of one widget at one breakpoint, in grid cells.
///
/// Serialized in the grid library's shape: the widget id is `i` and the
/// minimum sizes are `minW`/`minH`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    #[serde(rename = "i", alias = "id")]
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[serde(rename = "minW", default = "one")]
    pub min_w: u32,
    #[serde(rename = "minH", default = "one")]
    pub min_h: u32,
}

impl LayoutItem {
    pub fn new(id: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            w,
            h,
            min_w: 1,
            min_h: 1,
        }
    }

    pub fn with_min(mut self, min_w: u32, min_h: u32) -> Self {
        self.min_w = min_w;
        self.min_h = min_h;
        self
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Whether the column ranges of the two items intersect.
    pub fn shares_columns(&self, other: &LayoutItem) -> bool {
        self.x < other.right() && other.x < self.right()
    }

    /// Whether the two items cover at least one common cell.
    pub fn overlaps(&self, other: &LayoutItem) -> bool {
        self.shares_columns(other) && self.y < other.bottom() && other.y < self.bottom()
    }
}

/// Placements keyed by breakpoint. Iterates widest breakpoint first.
pub type LayoutState = BTreeMap<Breakpoint, Vec<LayoutItem>>;
