use anyhow::Result;

use hslog_lib::LogStore;
use hslog_lib::query;

use crate::output::{OutputFormat, print_info, print_json};

pub fn cmd_ls(store: &LogStore, reverse: bool, output: OutputFormat) -> Result<()> {
  let mut timestamps = query::ls(store)?;
  if reverse {
    timestamps.reverse();
  }

  if output.is_json() {
    print_json(&timestamps)?;
  } else if timestamps.is_empty() {
    print_info(&format!("No highstate runs logged in {}", store.directory().display()));
  } else {
    for ts in &timestamps {
      println!("{}", ts);
    }
  }

  Ok(())
}
