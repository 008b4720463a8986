//! XDG Base Directory support for termfold.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "termfold";

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "TERMFOLD_CONFIG_DIR";

/// Get the configuration directory.
///
/// Returns `$TERMFOLD_CONFIG_DIR` when set, otherwise
/// `$XDG_CONFIG_HOME/termfold` or `~/.config/termfold`.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine config directory")
}

/// Get the default log file path.
///
/// Returns `$XDG_STATE_HOME/termfold/termfold.log`, falling back to the
/// data directory on platforms without a state directory.
pub fn get_default_log_path() -> Result<PathBuf> {
    dirs::state_dir()
        .or_else(dirs::data_dir)
        .map(|p| p.join(APP_NAME).join(format!("{}.log", APP_NAME)))
        .context("Failed to determine log directory")
}
