//! Binary crate for the `forecast` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Table output and CSV persistence
//!
//! The pipeline itself never terminates the process; this is the single
//! boundary that turns a [`ForecastError`] into an exit code (1 for
//! transport failures, 2 when geocoding matches nothing, 3 when the
//! geocoding response has an unexpected shape).

use clap::Parser;
use forecast_core::ForecastError;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cmd = cli::Cli::parse();
    if let Err(err) = cmd.run().await {
        eprintln!("Error: {err:#}");
        let code = err.downcast_ref::<ForecastError>().map_or(1, ForecastError::exit_code);
        std::process::exit(code);
    }
}
