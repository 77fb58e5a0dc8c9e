//! CLI error handling

use std::path::PathBuf;
use thiserror::Error;

use domain_risk::RiskError;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Risk(#[from] RiskError),

    #[error("Cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid claim file {}: {source}", .path.display())]
    ClaimFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Process exit status, following the BSD `sysexits` conventions
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidArgument(_) => 64,
            CliError::ClaimFile { .. } => 65,
            CliError::Risk(RiskError::Catalog(_)) => 78,
            CliError::Risk(_) => 65,
            CliError::Io { .. } => 74,
            CliError::Config(_) | CliError::InvalidConfig(_) => 78,
        }
    }
}
