//! # board-remote
//!
//! Client for the remote mirror of a widget-board dashboard.
//!
//! The remote contract is a single idempotent `upsert`: the whole
//! `{widgets, layouts}` snapshot is sent with `PUT`, so re-sending the same
//! snapshot is always safe.
//!
//! ## Example
//!
//! ```rust,ignore
//! use board_remote::upsert_snapshot;
//! use std::time::Duration;
//!
//! upsert_snapshot(
//!     "https://example.com/api/dashboard",
//!     Some("token"),
//!     r#"{"widgets":[],"layouts":{}}"#,
//!     Duration::from_secs(10),
//! )?;
//! ```

pub mod client;
pub mod error;

#[cfg(feature = "blocking")]
pub use client::upsert_snapshot;
pub use error::ApiError;
