//! Highstate run log.
//!
//! A [`LogStore`] owns a directory and indexes it by listing; a [`LogEntry`]
//! reads and writes the two artifacts of one run.

pub mod codec;
mod entry;
mod store;
mod types;

pub use entry::LogEntry;
pub use store::{LogStore, Timestamps};
pub use types::{Artifact, ErrorKind, LogError, is_valid_timestamp, now_timestamp};
