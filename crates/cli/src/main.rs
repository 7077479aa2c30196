//! extforge - compose browser extension build configurations

mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::{OutputFormat, print_error};

#[derive(Parser)]
#[command(name = "extforge")]
#[command(author, version, about = "Compose browser extension build configurations", long_about = None)]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compose the build configuration and print it
  Compose {
    /// Project directory
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// Validate the project without printing the configuration
  Check {
    /// Project directory
    #[arg(default_value = ".")]
    dir: PathBuf,
  },

  /// Scaffold a new extension project
  Init {
    /// Directory to create the project in
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Extension name (defaults to the directory name)
    #[arg(long)]
    name: Option<String>,
  },
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "info" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Compose { dir, format } => cmd::cmd_compose(&dir, format),
    Commands::Check { dir } => cmd::cmd_check(&dir),
    Commands::Init { dir, name } => cmd::cmd_init(&dir, name),
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(cli) {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
