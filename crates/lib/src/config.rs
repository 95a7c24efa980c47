//! Log directory configuration.
//!
//! The log directory is resolved once and handed to [`LogStore::open`]; nothing
//! in the store reads ambient configuration. Precedence, highest first:
//!
//! 1. an explicit override (the `--log-dir` flag)
//! 2. the `HSLOG_LOG_DIR` environment variable
//! 3. `highstate_log_dir` in the config file
//! 4. `<data_dir>/highstate`
//!
//! ```toml
//! # ~/.config/hslog/config.toml
//! highstate_log_dir = "/var/log/salt/highstate"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::{CONFIG_ENV, LOG_DIR_ENV};
use crate::log::{LogError, LogStore};
use crate::platform::paths::{default_config_path, default_log_dir};

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Failed to read config file {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to parse config file {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  #[error("No log directory configured and no home directory found; pass --log-dir or set HSLOG_LOG_DIR")]
  NoLogDir,
}

/// Contents of the config file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
  pub highstate_log_dir: Option<PathBuf>,
}

impl TomlConfig {
  /// Parse config file contents; `path` is only used for error messages.
  pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }
}

/// Where the resolved log directory came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDirSource {
  Override,
  Env,
  ConfigFile(PathBuf),
  Default,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
  pub log_dir: Option<PathBuf>,
  pub config_path: Option<PathBuf>,
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
  pub highstate_log_dir: PathBuf,
  pub source: LogDirSource,
}

impl Config {
  /// Resolve the configuration from overrides, environment, and config file.
  ///
  /// An explicitly named config file (override or `HSLOG_CONFIG`) must exist;
  /// the default one is optional. A file that exists but does not parse is
  /// always an error.
  pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
    let explicit_path = overrides.config_path.clone().or_else(|| env_path(CONFIG_ENV));
    let file = match explicit_path {
      Some(path) => Some((read_config(&path)?, path)),
      None => match default_config_path() {
        Some(path) if path.is_file() => Some((read_config(&path)?, path)),
        _ => None,
      },
    };

    Self::resolve(overrides.log_dir.clone(), env_path(LOG_DIR_ENV), file)
  }

  fn resolve(
    log_dir: Option<PathBuf>,
    env_dir: Option<PathBuf>,
    file: Option<(TomlConfig, PathBuf)>,
  ) -> Result<Self, ConfigError> {
    if let Some(dir) = log_dir {
      return Ok(Self {
        highstate_log_dir: dir,
        source: LogDirSource::Override,
      });
    }

    if let Some(dir) = env_dir {
      return Ok(Self {
        highstate_log_dir: dir,
        source: LogDirSource::Env,
      });
    }

    if let Some((contents, path)) = file
      && let Some(dir) = contents.highstate_log_dir
    {
      // Relative directories are relative to the file that names them.
      let dir = match path.parent() {
        Some(parent) if dir.is_relative() => parent.join(dir),
        _ => dir,
      };
      return Ok(Self {
        highstate_log_dir: dir,
        source: LogDirSource::ConfigFile(path),
      });
    }

    let dir = default_log_dir().ok_or(ConfigError::NoLogDir)?;
    Ok(Self {
      highstate_log_dir: dir,
      source: LogDirSource::Default,
    })
  }

  /// Open the store at the configured directory.
  pub fn open_store(&self) -> Result<LogStore, LogError> {
    debug!(path = %self.highstate_log_dir.display(), source = ?self.source, "opening highstate log");
    LogStore::open(&self.highstate_log_dir)
  }
}

fn env_path(var: &str) -> Option<PathBuf> {
  std::env::var_os(var).filter(|v| !v.is_empty()).map(PathBuf::from)
}

fn read_config(path: &Path) -> Result<TomlConfig, ConfigError> {
  let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
    path: path.to_path_buf(),
    source,
  })?;
  TomlConfig::parse(&content, path)
}
