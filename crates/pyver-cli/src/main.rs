//! pyver CLI
//!
//! Stamps the version of a Python project from CI environment variables.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use pyver_core::{ProcessEnvironment, Project};

use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose)
        .map_err(|e| CliError::user(format!("Failed to set up logging: {e}")))?;
    tracing::debug!(?cli, "parsed arguments");

    let project = match &cli.manifest {
        Some(path) => Project::load(path)?,
        None => Project::discover(&std::env::current_dir()?)?,
    };

    let mut stdout = std::io::stdout().lock();
    commands::run_version(&project, cli.mode(), &ProcessEnvironment, &mut stdout)
}
