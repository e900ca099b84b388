//! Sonargate - SonarQube severity gate for changed files
//!
//! A CI pipeline step: fetch open issues from a SonarQube server, keep
//! only those on files changed in the current review, and fail the build
//! when anything at or above the severity threshold remains.

mod cli;
mod client;
mod error;
mod filter;
mod models;
mod paths;
mod pipeline;
mod reporters;
mod severity;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    // Initialize logging (stderr, so stdout stays clean for scripting)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();
    match pipeline::run(&cli.into_config()) {
        Ok(outcome) => std::process::exit(outcome.exit_code()),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
