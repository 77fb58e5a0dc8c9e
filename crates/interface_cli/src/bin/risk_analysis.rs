//! Claim Risk Analysis - Command-Line Binary
//!
//! # Usage
//!
//! ```bash
//! # Browse high-severity motor rules
//! risk-analysis rules --category motor --severity high
//!
//! # Analyze the first sample claim as of a fixed date
//! risk-analysis analyze --sample 1 --as-of 2025-08-01
//!
//! # Analyze a claim file with a reduced rule set
//! risk-analysis analyze --claim claim.json --only HLT-001 --only HLT-002
//! ```
//!
//! # Environment Variables
//!
//! * `RISK_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: warn)
//! * `RISK_CATALOG_PATH` - Alternate rule catalog JSON
//! * `RISK_AS_OF` - Fixed evaluation date (YYYY-MM-DD)
//! * `RISK_SCORING__HIGH_WEIGHT`, `RISK_SCORING__MEDIUM_WEIGHT`, ... - Scoring policy
//! * `RUST_LOG` - Takes precedence over the configured log level

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use interface_cli::{cli::Cli, config::AnalysisConfig, error::CliError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            let code = err
                .downcast_ref::<CliError>()
                .map(CliError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AnalysisConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_level));
    tracing::debug!(?config, "Loaded configuration");

    let output = interface_cli::run(&cli.command, &config)?;
    println!("{}", output);
    Ok(())
}

/// Initializes the tracing subscriber, logging to standard error so reports
/// on standard output stay clean.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

