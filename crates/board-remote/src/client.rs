//! HTTP client for the remote mirror.
//!
//! Handles authentication, headers and status-code mapping.

use crate::error::ApiError;
#[cfg(feature = "blocking")]
use std::time::Duration;

/// Content type sent with every snapshot.
pub const CONTENT_TYPE: &str = "application/json";

/// Upsert a serialized dashboard snapshot (blocking).
///
/// Sends `body` with `PUT` to `endpoint`. A bearer token is attached when
/// `token` is `Some`.
///
/// # Errors
///
/// Returns [`ApiError`] if:
/// - The endpoint is not a valid URL
/// - The request fails or exceeds `timeout`
/// - The server returns 401, 429, 5xx or any other non-2xx status
#[cfg(feature = "blocking")]
pub fn upsert_snapshot(
    endpoint: &str,
    token: Option<&str>,
    body: &str,
    timeout: Duration,
) -> Result<(), ApiError> {
    let url =
        reqwest::Url::parse(endpoint).map_err(|e| ApiError::InvalidEndpoint(e.to_string()))?;

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let mut request = client
        .put(url)
        .header("Content-Type", CONTENT_TYPE)
        .body(body.to_string());
    if let Some(token) = token {
        request = request.header("Authorization", format!("Bearer {}", token));
    }

    let response = request
        .send()
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    map_status(response.status().as_u16(), retry_after)
}

/// Map an HTTP status to the upsert result.
pub fn map_status(status: u16, retry_after: Option<String>) -> Result<(), ApiError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(ApiError::Unauthorized),
        429 => Err(ApiError::RateLimited { retry_after }),
        500..=599 => Err(ApiError::Server(status)),
        _ => Err(ApiError::Unexpected(status)),
    }
}
