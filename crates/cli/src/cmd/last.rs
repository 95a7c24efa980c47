use anyhow::Result;

use hslog_lib::LogStore;
use hslog_lib::query;

use super::Part;
use super::get::print_run;
use crate::output::{OutputFormat, print_info, print_json};

pub fn cmd_last(store: &LogStore, n: Option<usize>, part: Part, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    match part {
      Part::All => print_json(&query::last(store, n)?)?,
      Part::Highstate => print_json(&query::last_highstate(store, n)?)?,
      Part::Result => print_json(&query::last_result(store, n)?)?,
    }
    return Ok(());
  }

  let timestamps = query::newest(store, n.unwrap_or(1))?;
  if timestamps.is_empty() {
    print_info(&format!("No highstate runs logged in {}", store.directory().display()));
    return Ok(());
  }

  for (i, ts) in timestamps.iter().enumerate() {
    if i > 0 {
      println!();
    }
    let run = query::get(store, ts)?;
    print_run(ts, &run, part)?;
  }

  Ok(())
}
