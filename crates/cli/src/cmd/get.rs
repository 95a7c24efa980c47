use anyhow::Result;

use hslog_lib::LogStore;
use hslog_lib::query::{self, Run};

use super::Part;
use crate::output::{OutputFormat, print_artifact, print_info, print_json};

pub fn cmd_get(store: &LogStore, timestamp: &str, part: Part, output: OutputFormat) -> Result<()> {
  let run = query::get(store, timestamp)?;

  if output.is_json() {
    print_json(&select(run, part)?)?;
  } else {
    print_run(timestamp, &run, part)?;
  }

  Ok(())
}

/// Text rendering of one run, shared with `last`.
pub(super) fn print_run(timestamp: &str, run: &Run, part: Part) -> Result<()> {
  print_info(&format!("Highstate run {}", timestamp));
  if part != Part::Result {
    print_artifact("highstate", run.highstate.as_ref())?;
  }
  if part != Part::Highstate {
    print_artifact("result", run.result.as_ref())?;
  }
  Ok(())
}

/// JSON view of `run` restricted to `part`.
fn select(run: Run, part: Part) -> Result<serde_json::Value> {
  Ok(match part {
    Part::All => serde_json::to_value(run)?,
    Part::Highstate => run.highstate.unwrap_or_default(),
    Part::Result => run.result.unwrap_or_default(),
  })
}
