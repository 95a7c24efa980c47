//! CLI output formatting utilities.
//!
//! Colored status messages go to the terminal; JSON documents go to stdout
//! untouched so they can be piped.

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const INFO: &str = "•";
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

/// Print one artifact of a run under a heading, or a placeholder if it is missing.
pub fn print_artifact(label: &str, value: Option<&Value>) -> anyhow::Result<()> {
  println!("{}:", label.if_supports_color(Stream::Stdout, |s| s.bold()));
  match value {
    Some(value) => {
      let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
      for line in json.lines() {
        println!("  {}", line);
      }
    }
    None => println!("  {}", "(not recorded)".if_supports_color(Stream::Stdout, |s| s.dimmed())),
  }
  Ok(())
}
