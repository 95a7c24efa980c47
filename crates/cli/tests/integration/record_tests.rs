use predicates::prelude::*;
use serde_json::json;

use super::common::{TestEnv, stdout_json};

#[test]
fn test_record_with_explicit_timestamp() {
  let env = TestEnv::new();
  let highstate = env.write_file("hs.json", r#"{"pkg": "installed"}"#);
  let result = env.write_file("result.json", r#"{"task1": {"result": true}}"#);

  env
    .hslog_cmd()
    .args(["record", "--timestamp", "2013-08-20T14:03:23", "--highstate"])
    .arg(&highstate)
    .arg("--result")
    .arg(&result)
    .assert()
    .success()
    .stdout(predicate::str::contains("2013-08-20T14:03:23"));

  assert!(env.log_path().join("2013-08-20T14:03:23_highstate.log.bz2").is_file());
  assert!(env.log_path().join("2013-08-20T14:03:23_result.log.bz2").is_file());
}

#[test]
fn test_record_mints_timestamp() {
  let env = TestEnv::new();
  let highstate = env.write_file("hs.json", r#"{"pkg": "installed"}"#);

  let output = env
    .hslog_cmd()
    .args(["record", "-o", "json", "--highstate"])
    .arg(&highstate)
    .output()
    .unwrap();
  assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

  let json = stdout_json(&output);
  let ts = json["timestamp"].as_str().unwrap();
  assert_eq!(ts.len(), 19);
  assert_eq!(json["highstate"], json!(true));
  assert_eq!(json["result"], json!(false));
  assert!(env.log_path().join(format!("{}_highstate.log.bz2", ts)).is_file());
}

#[test]
fn test_record_from_stdin() {
  let env = TestEnv::new();

  env
    .hslog_cmd()
    .args(["record", "--timestamp", "2013-08-20T14:03:23", "--highstate", "-"])
    .write_stdin(r#"{"from": "stdin"}"#)
    .assert()
    .success();

  let output = env
    .hslog_cmd()
    .args(["get", "2013-08-20T14:03:23", "-p", "highstate", "-o", "json"])
    .output()
    .unwrap();
  assert_eq!(stdout_json(&output), json!({"from": "stdin"}));
}

#[test]
fn test_record_twice_fails() {
  let env = TestEnv::new();
  env.record("2013-08-20T14:03:23", r#"{"run": 1}"#, None);

  let highstate = env.write_file("second.json", r#"{"run": 2}"#);
  env
    .hslog_cmd()
    .args(["record", "--timestamp", "2013-08-20T14:03:23", "--highstate"])
    .arg(&highstate)
    .assert()
    .failure()
    .stderr(predicate::str::contains("already exists"));

  let output = env
    .hslog_cmd()
    .args(["get", "2013-08-20T14:03:23", "-p", "highstate", "-o", "json"])
    .output()
    .unwrap();
  assert_eq!(stdout_json(&output), json!({"run": 1}));
}

#[test]
fn test_record_rejects_invalid_json() {
  let env = TestEnv::new();
  let highstate = env.write_file("hs.json", "{not json");

  env
    .hslog_cmd()
    .args(["record", "--highstate"])
    .arg(&highstate)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid JSON"));

  assert_eq!(std::fs::read_dir(env.log_path()).unwrap().count(), 0);
}

#[test]
fn test_record_rejects_invalid_timestamp() {
  let env = TestEnv::new();
  let highstate = env.write_file("hs.json", "{}");

  env
    .hslog_cmd()
    .args(["record", "--timestamp", "yesterday", "--highstate"])
    .arg(&highstate)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Invalid timestamp"));
}

#[test]
fn test_record_rejects_two_stdin_documents() {
  let env = TestEnv::new();

  env
    .hslog_cmd()
    .args(["record", "--highstate", "-", "--result", "-"])
    .write_stdin("{}")
    .assert()
    .failure()
    .stderr(predicate::str::contains("stdin"));
}
