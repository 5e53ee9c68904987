//! TOML configuration schema types for widget-board.
//!
//! All structs derive `Deserialize` and `Serialize` with sensible defaults via
//! `#[serde(default)]`, so a partial or empty file is always valid.
//!
//! Duration fields use human-readable strings (e.g. `"60s"`, `"2s"`) and are
//! parsed by the `humantime` crate through the typed accessors below.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [dashboard]
/// [storage]
/// [sync]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Controller behavior.
    pub dashboard: DashboardConfig,
    /// Local persistence location.
    pub storage: StorageConfig,
    /// Remote mirroring.
    pub sync: SyncConfig,
    /// Log output.
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Controller settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Reject operations whose mode precondition does not hold.
    /// When false the controller trusts its caller to sequence operations.
    pub strict_transitions: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            strict_transitions: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Where the key-value files live.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for persisted keys. Empty means `$XDG_DATA_HOME/widget-board`.
    /// A leading `~/` is expanded.
    pub data_dir: String,
}

impl StorageConfig {
    /// Resolve the effective data directory.
    pub fn resolved_dir(&self) -> PathBuf {
        if self.data_dir.trim().is_empty() {
            xdg::data_dir()
        } else {
            xdg::expand_tilde(self.data_dir.trim())
        }
    }
}

// ---------------------------------------------------------------------------
// Sync
// ---------------------------------------------------------------------------

/// Remote mirroring settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// Run periodic background sync.
    pub enabled: bool,
    /// HTTP endpoint receiving the snapshot. Empty disables remote sync.
    pub endpoint: String,
    /// Name of the environment variable holding the bearer token.
    pub token_env: String,
    /// Period between automatic syncs (e.g. `"60s"`).
    pub interval: String,
    /// Quiet time after the last committed change before a sync fires.
    pub debounce: String,
    /// Upper bound for a single remote upsert.
    pub timeout: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::new(),
            token_env: "WBOARD_SYNC_TOKEN".to_string(),
            interval: "60s".to_string(),
            debounce: "2s".to_string(),
            timeout: "10s".to_string(),
        }
    }
}

impl SyncConfig {
    /// Parsed `interval`.
    pub fn interval(&self) -> Result<Duration, ConfigError> {
        parse_duration("sync.interval", &self.interval)
    }

    /// Parsed `debounce`.
    pub fn debounce(&self) -> Result<Duration, ConfigError> {
        parse_duration("sync.debounce", &self.debounce)
    }

    /// Parsed `timeout`.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        parse_duration("sync.timeout", &self.timeout)
    }
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value).map_err(|e| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        message: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log output settings. `WBOARD_LOG` overrides `level` when set.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default verbosity.
    pub level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    #[default]
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
