//! hslog-lib: persistent log of highstate runs
//!
//! Every highstate run leaves two artifacts behind, the state data it was
//! given and the result it produced. This crate stores them:
//! - `LogStore`: a directory of runs, indexed by scanning its listing
//! - `LogEntry`: one run, keyed by its start timestamp, with write-once slots
//! - `query`: newest-first lookups used by the `hslog` command
//! - `config`: resolution of the log directory

pub mod config;
pub mod consts;
pub mod log;
pub mod platform;
pub mod query;

pub use log::{Artifact, ErrorKind, LogEntry, LogError, LogStore};
