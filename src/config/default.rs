//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# widget-board configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/widget-board/config.toml

# ==============================================================================
# Dashboard
# ==============================================================================

[dashboard]

# Reject operations issued in the wrong mode (for example removing a widget
# outside edit mode). Set to false to let the caller sequence operations.
strict_transitions = true

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Directory holding the persisted dashboard keys.
# Empty means $XDG_DATA_HOME/widget-board. Tilde (~) is expanded.
data_dir = ""

# ==============================================================================
# Remote sync
# ==============================================================================

[sync]

# Mirror the dashboard to a remote endpoint in the background.
enabled = false

# HTTP endpoint that receives the snapshot via PUT. Empty disables sync.
endpoint = ""

# Environment variable holding the bearer token for the endpoint.
token_env = "WBOARD_SYNC_TOKEN"

# Period between automatic syncs. Examples: "30s", "5m"
interval = "60s"

# Quiet time after the last change before an extra sync fires.
debounce = "2s"

# Upper bound for a single remote upsert.
timeout = "10s"

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Options: "error", "warn", "info", "debug", "trace"
# The WBOARD_LOG environment variable overrides this value.
level = "info"
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file at the XDG path.
///
/// See [`create_default_config_at`].
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// Creates (or force-overwrites) the default config file at `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    tracing::info!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Writes the template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_err = |e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };

    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(write_err)?;
    }
    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
