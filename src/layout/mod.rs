//! Per-breakpoint grid placement.

mod breakpoint;
mod compact;
mod item;
mod store;

pub use breakpoint::{Breakpoint, UnknownBreakpoint};
pub use compact::compact;
pub use item::{LayoutItem, LayoutState, MAX_ITEM_HEIGHT};
pub use store::LayoutStore;
