mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hslog_lib::config::{Config, ConfigOverrides};

use crate::cmd::{Part, cmd_get, cmd_last, cmd_ls, cmd_record, cmd_status};
use crate::output::{OutputFormat, print_error};

/// hslog - browse and record highstate run logs
#[derive(Parser)]
#[command(name = "hslog")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Highstate log directory (overrides HSLOG_LOG_DIR and the config file)
  #[arg(long, global = true, value_name = "DIR")]
  log_dir: Option<PathBuf>,

  /// Config file (default: <config dir>/hslog/config.toml)
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Increase log verbosity (-v for debug, -vv for trace)
  #[arg(short, long, action = ArgAction::Count, global = true)]
  verbose: u8,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// List the timestamps of logged runs, oldest first
  Ls {
    /// Newest first
    #[arg(short, long)]
    reverse: bool,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show the state data and result of one run
  Get {
    /// Run timestamp (e.g. 2013-08-20T14:03:23)
    timestamp: String,

    /// Which artifacts to show
    #[arg(short, long, value_enum, default_value = "all")]
    part: Part,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show the newest run, or the newest N runs
  Last {
    /// Number of runs; without it only the newest run is shown
    #[arg(short)]
    n: Option<usize>,

    /// Which artifacts to show
    #[arg(short, long, value_enum, default_value = "all")]
    part: Part,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Record a run from JSON documents
  Record {
    /// State data file ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    highstate: PathBuf,

    /// Result file ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    result: Option<PathBuf>,

    /// Run timestamp (default: now)
    #[arg(long)]
    timestamp: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// Show the log directory and number of runs
  Status {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

fn init_tracing(verbose: u8) {
  let default_level = match verbose {
    0 => "warn",
    1 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  let config = Config::load(&ConfigOverrides {
    log_dir: cli.log_dir,
    config_path: cli.config,
  })?;
  let store = config.open_store()?;

  match cli.command {
    Commands::Ls { reverse, output } => cmd_ls(&store, reverse, output),
    Commands::Get {
      timestamp,
      part,
      output,
    } => cmd_get(&store, &timestamp, part, output),
    Commands::Last { n, part, output } => cmd_last(&store, n, part, output),
    Commands::Record {
      highstate,
      result,
      timestamp,
      output,
    } => cmd_record(&store, &highstate, result.as_deref(), timestamp.as_deref(), output),
    Commands::Status { output } => cmd_status(&config, &store, output),
  }
}
