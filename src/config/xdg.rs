//! Platform-aware path resolution for widget-board.
//!
//! XDG environment variables win on every platform; otherwise the `dirs`
//! crate supplies the platform default:
//! - Config: `$XDG_CONFIG_HOME/widget-board` or the platform config dir
//! - Data: `$XDG_DATA_HOME/widget-board` or the platform data dir
//!
//! When no home directory can be determined the current directory is used.

use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "widget-board";

/// Returns the configuration directory.
pub fn config_dir() -> PathBuf {
    if let Some(xdg) = env_dir("XDG_CONFIG_HOME") {
        return xdg.join(APP_NAME);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the path to the main configuration file.
///
/// Resolves to `config_dir()/config.toml`.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Returns the directory holding persisted dashboard keys.
pub fn data_dir() -> PathBuf {
    if let Some(xdg) = env_dir("XDG_DATA_HOME") {
        return xdg.join(APP_NAME);
    }
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Expands a leading `~` in a path string to the user's home directory.
///
/// If the path does not start with `~`, or no home directory is known, it is
/// returned as-is.
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        (None, Some(home)) if path == "~" => home,
        _ => PathBuf::from(path),
    }
}

/// Creates a directory and all parent directories with mode 0700.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    fs::create_dir_all(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}
