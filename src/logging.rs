//! Logging initialization for widget-board.
//!
//! Configures the `tracing` subscriber with level filtering via the `WBOARD_LOG`
//! environment variable. Falls back to the configured level when the variable
//! is unset or invalid.
//!
//! ```bash
//! # Debug level
//! WBOARD_LOG=debug wboard show
//!
//! # Module-specific filtering
//! WBOARD_LOG=widget_board::persistence=trace,warn wboard sync
//! ```

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LogLevel;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "WBOARD_LOG";

/// Build the filter: `WBOARD_LOG` if it parses, otherwise `fallback`.
pub fn filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_directive()))
}

/// Initialize the tracing subscriber, writing to stderr.
///
/// A second call is a no-op; the first subscriber stays installed.
pub fn init(fallback: LogLevel) {
    let _ = fmt()
        .with_env_filter(filter(fallback))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
