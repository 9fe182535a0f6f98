mod commands;
mod error;
mod interaction;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use relsync_operations::ConfigOverrides;
use tracing_subscriber::EnvFilter;

use crate::commands::Commands;
use crate::error::CliError;

const LOG_ENV: &str = "RELSYNC_LOG";

#[derive(Parser)]
#[command(name = "relsync", version)]
#[command(
    about = "Release a workspace whose version tracks a pinned upstream crate",
    long_about = None
)]
struct Cli {
    /// Workspace root (default: current directory)
    #[arg(long = "root", short = 'C', global = true)]
    root: Option<PathBuf>,

    /// Name of the pinned upstream dependency
    #[arg(long, global = true)]
    upstream: Option<String>,

    /// Cargo manifest declaring the pin, relative to the workspace root
    #[arg(long, global = true)]
    pin_manifest: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = match resolve_root(cli.root) {
        Ok(path) => path,
        Err(e) => {
            print_error(&e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(root = %root.display(), "resolved workspace root");

    let overrides = ConfigOverrides {
        upstream: cli.upstream,
        pin_manifest: cli.pin_manifest,
        no_git: false,
    };

    if let Err(e) = cli.command.execute(&root, overrides) {
        print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn resolve_root(path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match path {
        Some(p) => Ok(p),
        None => std::env::current_dir().map_err(CliError::CurrentDir),
    }
}

fn print_error(error: &CliError) {
    eprintln!("error: {error}");

    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        eprintln!("caused by: {cause}");
        source = std::error::Error::source(cause);
    }
}
