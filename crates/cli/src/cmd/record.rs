use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::{Value, json};
use tracing::debug;

use hslog_lib::LogStore;

use crate::output::{OutputFormat, print_json, print_success};

/// Record an already-executed run.
///
/// `highstate` and `result` name JSON files; `-` reads from stdin (at most one
/// of them may do so). Without `timestamp` the run is stamped with the
/// current local time.
pub fn cmd_record(
  store: &LogStore,
  highstate: &Path,
  result: Option<&Path>,
  timestamp: Option<&str>,
  output: OutputFormat,
) -> Result<()> {
  if result.is_some_and(is_stdin) && is_stdin(highstate) {
    bail!("Only one of --highstate and --result can be read from stdin");
  }

  let highstate_data = read_document(highstate)?;
  let result_data = result.map(read_document).transpose()?;

  let entry = match timestamp {
    Some(ts) => store.entry_at(ts)?,
    None => store.new_entry(),
  };
  debug!(timestamp = entry.timestamp(), "recording highstate run");

  entry
    .write_highstate(&highstate_data)
    .with_context(|| format!("Failed to record highstate for {}", entry.timestamp()))?;
  if let Some(data) = &result_data {
    entry
      .write_result(data)
      .with_context(|| format!("Failed to record result for {}", entry.timestamp()))?;
  }

  if output.is_json() {
    print_json(&json!({
      "timestamp": entry.timestamp(),
      "highstate": true,
      "result": result_data.is_some(),
    }))?;
  } else {
    print_success(&format!("Recorded highstate run {}", entry.timestamp()));
  }

  Ok(())
}

fn is_stdin(path: &Path) -> bool {
  path == Path::new("-")
}

fn read_document(path: &Path) -> Result<Value> {
  let content = if is_stdin(path) {
    let mut content = String::new();
    io::stdin()
      .read_to_string(&mut content)
      .context("Failed to read JSON from stdin")?;
    content
  } else {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
  };

  serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}
