//! Command-Line Front End
//!
//! This crate exposes the claim risk analysis engine as the `risk-analysis`
//! command.
//!
//! # Commands
//!
//! - **rules**: Browse and filter the rule catalog
//! - **samples**: List the built-in sample claims
//! - **analyze**: Run a claim file or sample through the four-step analysis
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_cli::{run, cli::Command, config::AnalysisConfig};
//!
//! let config = AnalysisConfig::from_env()?;
//! let output = run(&Command::Samples, &config)?;
//! println!("{output}");
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use domain_risk::RuleCatalog;

use crate::cli::Command;
use crate::config::AnalysisConfig;
use crate::error::CliError;

/// Runs one command and returns its textual output
pub fn run(command: &Command, config: &AnalysisConfig) -> Result<String, CliError> {
    let custom = config.load_catalog()?;
    let catalog: &RuleCatalog = match &custom {
        Some(catalog) => catalog,
        None => RuleCatalog::builtin()?,
    };

    match command {
        Command::Rules(args) => Ok(commands::run_rules(catalog, args)),
        Command::Samples => commands::run_samples(),
        Command::Analyze(args) => commands::run_analyze(catalog, config, args),
    }
}
