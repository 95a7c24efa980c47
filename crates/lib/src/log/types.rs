use std::fmt;
use std::io;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::consts::{HIGHSTATE_SUFFIX, RESULT_SUFFIX, TIMESTAMP_FORMAT};

/// The two artifact slots of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
  /// State data the run was given.
  Highstate,
  /// Per-task outcome of the run.
  Result,
}

impl Artifact {
  /// Filename suffix appended to the entry timestamp.
  pub fn suffix(self) -> &'static str {
    match self {
      Artifact::Highstate => HIGHSTATE_SUFFIX,
      Artifact::Result => RESULT_SUFFIX,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Artifact::Highstate => "highstate",
      Artifact::Result => "result",
    }
  }
}

impl fmt::Display for Artifact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Coarse classification of a [`LogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// No entry exists for the requested timestamp.
  NotFound,
  /// The artifact slot has already been written.
  AlreadyExists,
  /// The filesystem refused an operation.
  Io,
  /// Stored bytes could not be decompressed or parsed.
  Decode,
}

#[derive(Debug, Error)]
pub enum LogError {
  #[error("No log entry available for timestamp {0}")]
  NotFound(String),

  #[error("Invalid timestamp {0:?} (expected YYYY-MM-DDTHH:MM:SS)")]
  InvalidTimestamp(String),

  #[error("Log file for {artifact} already exists: {}", path.display())]
  AlreadyExists { artifact: Artifact, path: PathBuf },

  #[error("Failed to create log directory {}: {source}", path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to read log directory: {0}")]
  ReadDir(#[source] io::Error),

  #[error("Failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to write {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to serialize {artifact}: {source}")]
  Serialize {
    artifact: Artifact,
    #[source]
    source: serde_json::Error,
  },

  #[error("Refusing to write {artifact}: stored JSON would not parse back: {source}")]
  Unreadable {
    artifact: Artifact,
    #[source]
    source: serde_json::Error,
  },

  #[error("Failed to decompress {}: {source}", path.display())]
  Decompress {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Failed to parse {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

impl LogError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      LogError::NotFound(_) | LogError::InvalidTimestamp(_) => ErrorKind::NotFound,
      LogError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
      LogError::CreateDir { .. }
      | LogError::ReadDir(_)
      | LogError::Read { .. }
      | LogError::Write { .. }
      | LogError::Serialize { .. }
      | LogError::Unreadable { .. } => ErrorKind::Io,
      LogError::Decompress { .. } | LogError::Parse { .. } => ErrorKind::Decode,
    }
  }

  pub fn is_not_found(&self) -> bool {
    self.kind() == ErrorKind::NotFound
  }

  pub fn is_already_exists(&self) -> bool {
    self.kind() == ErrorKind::AlreadyExists
  }

  pub fn is_decode(&self) -> bool {
    self.kind() == ErrorKind::Decode
  }
}

/// Current local time formatted as an entry timestamp.
pub fn now_timestamp() -> String {
  chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Whether `ts` is a well-formed entry timestamp.
///
/// Only the exact fixed-width form is accepted, so every valid timestamp is
/// also a safe filename stem and string order matches chronological order.
pub fn is_valid_timestamp(ts: &str) -> bool {
  ts.len() == 19
    && NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT)
      .map(|parsed| parsed.format(TIMESTAMP_FORMAT).to_string() == ts)
      .unwrap_or(false)
}
