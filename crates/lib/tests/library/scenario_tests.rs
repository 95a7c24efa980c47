//! End-to-end behavior of a store and its entries.

use std::fs;

use hslog_lib::{Artifact, ErrorKind, LogError, LogStore};
use serde_json::{Value, json};

use super::common::{temp_store, timestamp};

#[test]
fn record_and_read_back_a_run() {
  let (_temp, store) = temp_store();
  assert_eq!(store.count().unwrap(), 0);

  let entry = store.new_entry();
  entry.write_highstate(&json!({"pkg": "installed"})).unwrap();
  entry.write_result(&json!({"task1": {"result": true}})).unwrap();

  assert_eq!(store.count().unwrap(), 1);
  let entry = store.get_entry(entry.timestamp()).unwrap();
  assert_eq!(
    entry.read_highstate::<Value>().unwrap(),
    Some(json!({"pkg": "installed"}))
  );
  assert_eq!(
    entry.read_result::<Value>().unwrap(),
    Some(json!({"task1": {"result": true}}))
  );
}

#[test]
fn double_write_keeps_first_content() {
  let (_temp, store) = temp_store();
  let entry = store.new_entry();

  entry.write_highstate(&json!({"pkg": "installed"})).unwrap();
  let err = entry.write_highstate(&json!({"pkg": "removed"})).unwrap_err();

  assert_eq!(err.kind(), ErrorKind::AlreadyExists);
  assert_eq!(
    entry.read_highstate::<Value>().unwrap(),
    Some(json!({"pkg": "installed"}))
  );
}

#[test]
fn corrupted_file_is_not_absent() {
  let (_temp, store) = temp_store();
  let entry = store.new_entry();
  entry.write_highstate(&json!({"pkg": "installed"})).unwrap();

  let path = entry.path(Artifact::Highstate);
  let mut bytes = fs::read(&path).unwrap();
  let middle = bytes.len() / 2;
  for byte in &mut bytes[middle..] {
    *byte = !*byte;
  }
  fs::write(&path, bytes).unwrap();

  let err = entry.read_highstate::<Value>().unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Decode);
  assert!(store.contains(entry.timestamp()));
}

#[test]
fn unwritten_slot_reads_as_none() {
  let (_temp, store) = temp_store();
  let entry = store.new_entry();
  entry.write_highstate(&json!([])).unwrap();

  assert_eq!(entry.read_result::<Value>().unwrap(), None);
}

#[test]
fn result_only_run_is_not_listed() {
  let (_temp, store) = temp_store();
  let entry = store.entry_at("2013-08-20T14:03:23").unwrap();
  entry.write_result(&json!({"task1": {"result": false}})).unwrap();

  assert!(!store.contains("2013-08-20T14:03:23"));
  assert_eq!(store.count().unwrap(), 0);
  assert!(matches!(
    store.get_entry("2013-08-20T14:03:23"),
    Err(LogError::NotFound(_))
  ));
}

#[test]
fn listing_matches_written_entries() {
  let (_temp, store) = temp_store();
  let n = 25;
  for i in 0..n {
    store
      .entry_at(&timestamp(i))
      .unwrap()
      .write_highstate(&json!({ "i": i }))
      .unwrap();
  }

  let listed = store.sorted_timestamps().unwrap();
  assert_eq!(listed.len(), n);
  assert_eq!(store.count().unwrap(), n);
  for (i, ts) in listed.iter().enumerate() {
    assert_eq!(ts, &timestamp(i));
    assert!(store.contains(ts));
    let value: Value = store.get_entry(ts).unwrap().read_highstate().unwrap().unwrap();
    assert_eq!(value, json!({ "i": i }));
  }
}

#[test]
fn unknown_timestamps_are_not_found() {
  let (_temp, store) = temp_store();
  store
    .entry_at(&timestamp(1))
    .unwrap()
    .write_highstate(&json!({}))
    .unwrap();

  for ts in [timestamp(2), "not-a-timestamp".to_string(), String::new()] {
    let err = store.get_entry(&ts).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound, "{:?}", ts);
  }
}

#[test]
fn reopened_store_sees_existing_runs() {
  let (temp, store) = temp_store();
  store
    .entry_at(&timestamp(7))
    .unwrap()
    .write_highstate(&json!({"kept": true}))
    .unwrap();
  drop(store);

  let store = LogStore::open(temp.path().join("highstate")).unwrap();
  assert_eq!(store.sorted_timestamps().unwrap(), vec![timestamp(7)]);
}

#[test]
fn reads_files_written_by_python() {
  // The text json.dump writes for {"pkg": "installed", "name": "café"}.
  let (_temp, store) = temp_store();
  let entry = store.entry_at("2013-08-20T14:03:23").unwrap();
  let bytes = hslog_lib::log::codec::compress(Vec::new(), br#"{"pkg": "installed", "name": "caf\u00e9"}"#).unwrap();
  fs::write(entry.path(Artifact::Highstate), bytes).unwrap();

  let value: Value = store
    .get_entry("2013-08-20T14:03:23")
    .unwrap()
    .read_highstate()
    .unwrap()
    .unwrap();
  assert_eq!(value, json!({"pkg": "installed", "name": "café"}));
}
