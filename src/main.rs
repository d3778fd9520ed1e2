// Entrypoint for the walkthrough binary.
// - Keeps `main` small: parse flags, set up logging, build the client and
//   hand it to the walkthrough.
// - Any failure aborts the run and is reported by `anyhow` with a non-zero
//   exit code.

use anyhow::Context;
use clap::{error::ErrorKind, CommandFactory, Parser};
use crs_manage::config::Cli;
use crs_manage::demo::run_management;
use crs_manage::ManagementClient;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.filename.is_file() {
        Cli::command()
            .error(
                ErrorKind::ValueValidation,
                format!("reference image not found: {}", cli.filename.display()),
            )
            .exit();
    }

    // Logs go to stderr so stdout only carries the walkthrough output.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let api = ManagementClient::new(cli.client_config())
        .context("Failed to build management client")?;
    tracing::info!(base_url = api.base_url(), "starting walkthrough");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_management(&api, &cli.walkthrough(), &mut out)?;
    Ok(())
}
