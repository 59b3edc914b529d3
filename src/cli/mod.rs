//! Command-line front end for the payroll engine.
//!
//! The `paie` binary reads compensation records as JSON, selects the legal
//! parameters effective on the pay date from a configuration directory, and
//! prints the payroll results as JSON.

mod request;
mod response;
mod runner;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub use request::PayrollRequest;
pub use response::{BatchEntry, CliError, PayrollOutput};
pub use runner::{run, run_document};

/// Computes Moroccan monthly payroll from JSON compensation records.
#[derive(Debug, Clone, Parser)]
#[command(name = "paie", version, about)]
pub struct Cli {
    /// Configuration directory holding jurisdiction.yaml and parameters/
    #[arg(short, long, default_value = "./config/morocco")]
    pub config: PathBuf,

    /// Pay date (YYYY-MM-DD) used to select the legal parameters; defaults to today
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// JSON file with one compensation object or an array of them; reads stdin if omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Initialises logging to standard error, keeping standard output for JSON.
///
/// `RUST_LOG` takes precedence over the `verbose` flag.
pub fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("paie_engine=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paie_engine=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
