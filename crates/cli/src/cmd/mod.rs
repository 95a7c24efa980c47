mod get;
mod last;
mod ls;
mod record;
mod status;

pub use get::cmd_get;
pub use last::cmd_last;
pub use ls::cmd_ls;
pub use record::cmd_record;
pub use status::cmd_status;

use clap::ValueEnum;

/// Which artifacts of a run to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Part {
  #[default]
  All,
  Highstate,
  Result,
}
