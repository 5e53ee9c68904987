//! Error types for the board-remote crate.

use thiserror::Error;

/// Errors returned by the remote mirror.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The remote rejected the credentials.
    #[error("Unauthorized. Check the sync token.")]
    Unauthorized,

    /// The remote asked us to slow down.
    #[error("Rate limited{}", retry_after.as_ref().map(|r| format!(", retry after {r}")).unwrap_or_default())]
    RateLimited {
        /// Raw `Retry-After` header value, if sent.
        retry_after: Option<String>,
    },

    /// The remote failed with a 5xx status.
    #[error("Server error: HTTP {0}")]
    Server(u16),

    /// Any other non-success status.
    #[error("Unexpected response: HTTP {0}")]
    Unexpected(u16),

    /// The endpoint is not a valid URL.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}
