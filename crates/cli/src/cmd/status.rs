//! Status command implementation.
//!
//! Shows where the highstate log lives and how many runs it holds.

use anyhow::Result;
use serde_json::json;

use hslog_lib::config::{Config, LogDirSource};
use hslog_lib::{LogStore, query};

use crate::output::{OutputFormat, print_json, print_stat, print_success};

pub fn cmd_status(config: &Config, store: &LogStore, output: OutputFormat) -> Result<()> {
  let count = store.count()?;
  let newest = query::newest(store, 1)?.into_iter().next();
  let source = match &config.source {
    LogDirSource::Override => "--log-dir".to_string(),
    LogDirSource::Env => "HSLOG_LOG_DIR".to_string(),
    LogDirSource::ConfigFile(path) => path.display().to_string(),
    LogDirSource::Default => "default".to_string(),
  };

  if output.is_json() {
    print_json(&json!({
      "log_dir": store.directory().display().to_string(),
      "source": source,
      "runs": count,
      "newest": newest,
    }))?;
  } else {
    print_success(&format!("Highstate log: {}", store.directory().display()));
    print_stat("Configured by", &source);
    print_stat("Runs", &count.to_string());
    print_stat("Newest", newest.as_deref().unwrap_or("-"));
  }

  Ok(())
}
