//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the log directory,
/// config directory, and input documents.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Write a file relative to the temp directory and return its path.
  pub fn write_file(&self, relative_path: &str, content: &str) -> PathBuf {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
  }

  /// Highstate log directory used by `hslog_cmd`.
  pub fn log_path(&self) -> PathBuf {
    let p = self.temp.path().join("highstate");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Config home, empty unless a test writes a config file into it.
  pub fn config_home(&self) -> PathBuf {
    let p = self.temp.path().join("config");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// The binary with only the config home isolated; no log directory is chosen.
  pub fn bare_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("hslog");
    cmd.env_remove("HSLOG_LOG_DIR");
    cmd.env_remove("HSLOG_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd.env("XDG_CONFIG_HOME", self.config_home());
    cmd.env("XDG_DATA_HOME", self.temp.path().join("data"));
    cmd.env("APPDATA", self.temp.path().join("data")); // For Windows
    cmd
  }

  /// Get a pre-configured Command for the hslog binary.
  ///
  /// Sets `HSLOG_LOG_DIR` to the isolated log directory.
  pub fn hslog_cmd(&self) -> Command {
    let mut cmd = self.bare_cmd();
    cmd.env("HSLOG_LOG_DIR", self.log_path());
    cmd
  }

  /// Record a run through the binary, asserting success.
  pub fn record(&self, timestamp: &str, highstate: &str, result: Option<&str>) {
    let highstate_path = self.write_file(&format!("input/{}-highstate.json", timestamp.replace(':', "")), highstate);
    let mut cmd = self.hslog_cmd();
    cmd.args(["record", "--timestamp", timestamp, "--highstate"]);
    cmd.arg(&highstate_path);
    if let Some(result) = result {
      let result_path = self.write_file(&format!("input/{}-result.json", timestamp.replace(':', "")), result);
      cmd.arg("--result").arg(&result_path);
    }
    cmd.assert().success();
  }
}

/// Parse stdout of a finished command as JSON.
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
  serde_json::from_slice(&output.stdout)
    .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, String::from_utf8_lossy(&output.stdout)))
}
