use std::time::Duration;

use tracing::debug;

use crate::config::schema::SyncConfig;
use crate::persistence::{DashboardSnapshot, SyncError};

/// Destination of the remote mirror.
///
/// `upsert` is blocking and may be slow; the sync channel runs it off the
/// async executor. Re-sending the same snapshot must be harmless.
pub trait RemoteStore: Send + Sync + 'static {
    fn upsert(&self, snapshot: &DashboardSnapshot) -> Result<(), SyncError>;
}

/// HTTP `PUT` of the JSON snapshot to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpRemote {
    endpoint: String,
    token: Option<String>,
    timeout: Duration,
}

impl HttpRemote {
    pub fn new(endpoint: impl Into<String>, token: Option<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            token,
            timeout,
        }
    }

    /// Build from the `[sync]` section. `None` when no endpoint is set.
    ///
    /// The bearer token is read from the environment variable named by
    /// `token_env`; an unset or empty variable means no token.
    pub fn from_config(sync: &SyncConfig, timeout: Duration) -> Option<Self> {
        let endpoint = sync.endpoint.trim();
        if endpoint.is_empty() {
            debug!("no sync endpoint configured");
            return None;
        }
        let token = if sync.token_env.is_empty() {
            None
        } else {
            std::env::var(&sync.token_env).ok().filter(|t| !t.is_empty())
        };
        Some(Self::new(endpoint, token, timeout))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

impl RemoteStore for HttpRemote {
    fn upsert(&self, snapshot: &DashboardSnapshot) -> Result<(), SyncError> {
        let body = serde_json::to_string(snapshot).map_err(|e| SyncError::Encode(e.to_string()))?;
        board_remote::upsert_snapshot(&self.endpoint, self.token.as_deref(), &body, self.timeout)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::xdg::tests::with_env;
    use board_remote::ApiError;
    use serial_test::serial;

    #[test]
    fn empty_endpoint_disables_remote() {
        let sync = SyncConfig::default();
        assert!(HttpRemote::from_config(&sync, Duration::from_secs(1)).is_none());
    }

    #[test]
    #[serial]
    fn token_comes_from_named_variable() {
        let sync = SyncConfig {
            endpoint: "http://127.0.0.1:9/board".into(),
            token_env: "WBOARD_TEST_TOKEN".into(),
            ..SyncConfig::default()
        };
        with_env(&[("WBOARD_TEST_TOKEN", Some("secret"))], || {
            let remote = HttpRemote::from_config(&sync, Duration::from_secs(1)).expect("configured");
            assert!(remote.has_token());
            assert_eq!(remote.endpoint(), "http://127.0.0.1:9/board");
        });
        with_env(&[("WBOARD_TEST_TOKEN", None)], || {
            let remote = HttpRemote::from_config(&sync, Duration::from_secs(1)).expect("configured");
            assert!(!remote.has_token());
        });
    }

    #[test]
    fn invalid_endpoint_surfaces_as_remote_error() {
        let remote = HttpRemote::new("not a url", None, Duration::from_secs(1));
        let err = remote
            .upsert(&DashboardSnapshot::default())
            .expect_err("should fail");
        assert!(matches!(err, SyncError::Remote(ApiError::InvalidEndpoint(_))));
    }
}
