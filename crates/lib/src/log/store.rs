//! Directory-level index of highstate runs.
//!
//! # Storage Layout
//!
//! ```text
//! {log_dir}/
//! ├── 2013-08-20T14:03:23_highstate.log.bz2   # state data
//! ├── 2013-08-20T14:03:23_result.log.bz2      # result
//! └── ...
//! ```
//!
//! The listing is the index. A run is present when its highstate file exists;
//! nothing is cached between calls.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::entry::LogEntry;
use super::types::{Artifact, LogError, is_valid_timestamp, now_timestamp};
use crate::consts::HIGHSTATE_SUFFIX;

/// Directory of highstate run logs.
#[derive(Debug, Clone)]
pub struct LogStore {
  directory: PathBuf,
}

impl LogStore {
  /// Open the store at `directory`, creating it and its parents if missing.
  pub fn open(directory: impl Into<PathBuf>) -> Result<Self, LogError> {
    let directory = directory.into();

    if !directory.is_dir() {
      fs::create_dir_all(&directory).map_err(|source| LogError::CreateDir {
        path: directory.clone(),
        source,
      })?;
      debug!(path = %directory.display(), "created log directory");
    }

    Ok(Self { directory })
  }

  pub fn directory(&self) -> &Path {
    &self.directory
  }

  pub(crate) fn artifact_path(&self, timestamp: &str, artifact: Artifact) -> PathBuf {
    self.directory.join(format!("{}{}", timestamp, artifact.suffix()))
  }

  /// Entry for a run starting now.
  ///
  /// No file is created. Two entries minted within the same second share a
  /// timestamp; whichever writes a slot first keeps it.
  pub fn new_entry(&self) -> LogEntry<'_> {
    LogEntry::new(self, now_timestamp())
  }

  /// Entry for an explicit timestamp, whether or not it has been written.
  pub fn entry_at(&self, timestamp: &str) -> Result<LogEntry<'_>, LogError> {
    if !is_valid_timestamp(timestamp) {
      return Err(LogError::InvalidTimestamp(timestamp.to_string()));
    }
    Ok(LogEntry::new(self, timestamp.to_string()))
  }

  /// Whether state data has been logged for `timestamp`.
  pub fn contains(&self, timestamp: &str) -> bool {
    is_valid_timestamp(timestamp) && self.artifact_path(timestamp, Artifact::Highstate).is_file()
  }

  /// Entry for a logged run.
  pub fn get_entry(&self, timestamp: &str) -> Result<LogEntry<'_>, LogError> {
    if !self.contains(timestamp) {
      return Err(LogError::NotFound(timestamp.to_string()));
    }
    Ok(LogEntry::new(self, timestamp.to_string()))
  }

  /// Lazily scan the directory for logged timestamps, in no particular order.
  ///
  /// Each call starts a fresh scan.
  pub fn timestamps(&self) -> Result<Timestamps, LogError> {
    let entries = fs::read_dir(&self.directory).map_err(LogError::ReadDir)?;
    Ok(Timestamps {
      entries,
      seen: HashSet::new(),
    })
  }

  /// All logged timestamps, oldest first.
  pub fn sorted_timestamps(&self) -> Result<Vec<String>, LogError> {
    let mut timestamps = self.timestamps()?.collect::<Result<Vec<_>, _>>()?;
    timestamps.sort_unstable();
    Ok(timestamps)
  }

  /// Number of logged runs.
  pub fn count(&self) -> Result<usize, LogError> {
    self.timestamps()?.try_fold(0, |count, ts| ts.map(|_| count + 1))
  }
}

/// Iterator over the timestamps in a [`LogStore`], see [`LogStore::timestamps`].
#[derive(Debug)]
pub struct Timestamps {
  entries: fs::ReadDir,
  seen: HashSet<String>,
}

impl Iterator for Timestamps {
  type Item = Result<String, LogError>;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let entry = match self.entries.next()? {
        Ok(entry) => entry,
        Err(e) => return Some(Err(LogError::ReadDir(e))),
      };

      let file_name = entry.file_name();
      let Some(timestamp) = file_name.to_str().and_then(|name| name.strip_suffix(HIGHSTATE_SUFFIX)) else {
        continue;
      };

      if !is_valid_timestamp(timestamp) {
        debug!(name = ?file_name, "skipping log file with malformed timestamp");
        continue;
      }
      if !entry.path().is_file() {
        continue;
      }

      if self.seen.insert(timestamp.to_string()) {
        return Some(Ok(timestamp.to_string()));
      }
    }
  }
}
