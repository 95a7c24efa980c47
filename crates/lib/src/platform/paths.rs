//! Per-user locations for the config file and the default log directory.
//!
//! Every lookup is driven by environment variables and returns `None` when
//! they are unset, so callers decide what a missing home directory means.

use std::env;
use std::path::PathBuf;

use crate::consts::{APP_NAME, CONFIG_FILENAME, LOG_DIR_NAME};

/// Non-empty value of `var` as a path.
fn env_dir(var: &str) -> Option<PathBuf> {
  env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}

/// Absolute value of an XDG base directory variable; relative values are ignored.
#[cfg(not(windows))]
fn xdg_dir(var: &str) -> Option<PathBuf> {
  env_dir(var).filter(|dir| dir.is_absolute())
}

/// The user's home directory.
#[cfg(windows)]
pub fn home_dir() -> Option<PathBuf> {
  env_dir("USERPROFILE")
}

/// The user's home directory.
#[cfg(not(windows))]
pub fn home_dir() -> Option<PathBuf> {
  env_dir("HOME")
}

#[cfg(windows)]
pub fn config_dir() -> Option<PathBuf> {
  env_dir("APPDATA").map(|appdata| appdata.join(APP_NAME))
}

/// `$XDG_CONFIG_HOME/hslog`, falling back to `~/.config/hslog`.
#[cfg(not(windows))]
pub fn config_dir() -> Option<PathBuf> {
  xdg_dir("XDG_CONFIG_HOME")
    .or_else(|| home_dir().map(|home| home.join(".config")))
    .map(|dir| dir.join(APP_NAME))
}

#[cfg(windows)]
pub fn data_dir() -> Option<PathBuf> {
  env_dir("APPDATA").map(|appdata| appdata.join(APP_NAME))
}

/// `$XDG_DATA_HOME/hslog`, falling back to `~/.local/share/hslog`.
#[cfg(not(windows))]
pub fn data_dir() -> Option<PathBuf> {
  xdg_dir("XDG_DATA_HOME")
    .or_else(|| home_dir().map(|home| home.join(".local").join("share")))
    .map(|dir| dir.join(APP_NAME))
}

/// Default highstate log directory when none is configured.
pub fn default_log_dir() -> Option<PathBuf> {
  data_dir().map(|dir| dir.join(LOG_DIR_NAME))
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
  config_dir().map(|dir| dir.join(CONFIG_FILENAME))
}
