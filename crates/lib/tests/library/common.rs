//! Shared helpers for library integration tests.

use hslog_lib::LogStore;
use tempfile::TempDir;

/// A store in a fresh temporary directory.
///
/// The directory is removed when the returned `TempDir` is dropped, so keep
/// it alive for as long as the store is used.
pub fn temp_store() -> (TempDir, LogStore) {
  let temp = TempDir::new().unwrap();
  let store = LogStore::open(temp.path().join("highstate")).unwrap();
  (temp, store)
}

/// Distinct, increasing timestamps for tests that need many entries.
pub fn timestamp(i: usize) -> String {
  format!("2013-08-20T{:02}:{:02}:{:02}", (i / 3600) % 24, (i / 60) % 60, i % 60)
}
