//! Newest-first lookups over a [`LogStore`].
//!
//! These back the `hslog ls|get|last` commands. The `last*` functions return
//! only the newest run when `n` is `None`, or a map of the newest `n` runs
//! keyed by timestamp otherwise.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::log::{LogEntry, LogError, LogStore};

/// Both artifacts of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
  pub highstate: Option<Value>,
  pub result: Option<Value>,
}

impl Run {
  fn read(entry: &LogEntry<'_>) -> Result<Self, LogError> {
    Ok(Self {
      highstate: entry.read_highstate()?,
      result: entry.read_result()?,
    })
  }
}

/// Answer of a `last*` query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Last<T> {
  /// Newest run only; `None` when nothing has been logged.
  Single(Option<T>),
  /// Newest runs keyed by timestamp.
  Many(BTreeMap<String, T>),
}

impl<T> Last<T> {
  /// Number of runs in the answer.
  pub fn len(&self) -> usize {
    match self {
      Last::Single(value) => usize::from(value.is_some()),
      Last::Many(map) => map.len(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// Logged timestamps, oldest first.
pub fn ls(store: &LogStore) -> Result<Vec<String>, LogError> {
  store.sorted_timestamps()
}

/// State data of the run at `ts`.
pub fn get_highstate(store: &LogStore, ts: &str) -> Result<Option<Value>, LogError> {
  store.get_entry(ts)?.read_highstate()
}

/// Result of the run at `ts`; `None` if the run has not finished writing it.
pub fn get_result(store: &LogStore, ts: &str) -> Result<Option<Value>, LogError> {
  store.get_entry(ts)?.read_result()
}

/// State data and result of the run at `ts`.
pub fn get(store: &LogStore, ts: &str) -> Result<Run, LogError> {
  Run::read(&store.get_entry(ts)?)
}

pub fn last_highstate(store: &LogStore, n: Option<usize>) -> Result<Last<Option<Value>>, LogError> {
  last_with(store, n, |entry| entry.read_highstate())
}

pub fn last_result(store: &LogStore, n: Option<usize>) -> Result<Last<Option<Value>>, LogError> {
  last_with(store, n, |entry| entry.read_result())
}

pub fn last(store: &LogStore, n: Option<usize>) -> Result<Last<Run>, LogError> {
  last_with(store, n, Run::read)
}

/// Timestamps of the newest `n` runs, newest first.
pub fn newest(store: &LogStore, n: usize) -> Result<Vec<String>, LogError> {
  let mut timestamps = store.sorted_timestamps()?;
  timestamps.reverse();
  timestamps.truncate(n);
  Ok(timestamps)
}

fn last_with<T, F>(store: &LogStore, n: Option<usize>, read: F) -> Result<Last<T>, LogError>
where
  F: Fn(&LogEntry<'_>) -> Result<T, LogError>,
{
  match n {
    None => {
      let value = match newest(store, 1)?.first() {
        Some(ts) => Some(read(&store.get_entry(ts)?)?),
        None => None,
      };
      Ok(Last::Single(value))
    }
    Some(n) => {
      let mut runs = BTreeMap::new();
      for ts in newest(store, n)? {
        let value = read(&store.get_entry(&ts)?)?;
        runs.insert(ts, value);
      }
      Ok(Last::Many(runs))
    }
  }
}
