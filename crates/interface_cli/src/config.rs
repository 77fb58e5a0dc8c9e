//! CLI configuration
//!
//! Settings come from, in increasing precedence: built-in defaults, an
//! optional configuration file, and `RISK_`-prefixed environment variables.
//! Nested keys use a double underscore, e.g. `RISK_SCORING__HIGH_WEIGHT=40`.

use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use core_kernel::FixedClock;
use domain_risk::{RiskAnalysisService, RuleCatalog, ScoringPolicy};

use crate::error::CliError;

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Alternate rule catalog; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Fixed evaluation date; wall-clock time is used when unset
    pub as_of: Option<NaiveDate>,
    /// Scoring weights, cap and thresholds
    pub scoring: ScoringPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            catalog_path: None,
            as_of: None,
            scoring: ScoringPolicy::default(),
        }
    }
}

impl AnalysisConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, CliError> {
        Self::load(None)
    }

    /// Loads configuration from an optional file overlaid with environment
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config: Self = builder
            .add_source(
                config::Environment::with_prefix("RISK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks the scoring policy
    pub fn validate(&self) -> Result<(), CliError> {
        self.scoring
            .validate()
            .map_err(|e| CliError::InvalidConfig(e.to_string()))
    }

    /// Loads the configured alternate catalog, if any
    pub fn load_catalog(&self) -> Result<Option<RuleCatalog>, CliError> {
        self.catalog_path
            .as_deref()
            .map(RuleCatalog::from_file)
            .transpose()
            .map_err(CliError::from)
    }

    /// Builds a service over `catalog` with this configuration's policy and clock
    ///
    /// `as_of` overrides the configured evaluation date.
    pub fn service<'c>(
        &self,
        catalog: &'c RuleCatalog,
        as_of: Option<NaiveDate>,
    ) -> RiskAnalysisService<'c> {
        let service = RiskAnalysisService::new(catalog).with_scoring_policy(self.scoring.clone());
        match as_of.or(self.as_of) {
            Some(date) => service.with_clock(FixedClock::on(date)),
            None => service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_risk::Recommendation;
    use std::io::Write;

    #[test]
    fn test_defaults_match_standard_policy() {
        let config = AnalysisConfig::default();
        assert_eq!(config.scoring, ScoringPolicy::default());
        assert!(config.catalog_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_overrides_scoring() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "as_of = \"2025-08-01\"\n\n[scoring]\nmedium_recommendation = \"review\"\nhigh_weight = 40"
        )
        .unwrap();

        let config = AnalysisConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.as_of, NaiveDate::from_ymd_opt(2025, 8, 1));
        assert_eq!(config.scoring.high_weight, 40);
        assert_eq!(config.scoring.medium_weight, 20);
        assert_eq!(config.scoring.medium_recommendation, Recommendation::Review);
    }

    #[test]
    fn test_inconsistent_thresholds_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[scoring]\nmedium_threshold = 80\nhigh_threshold = 60").unwrap();

        let err = AnalysisConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, CliError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = AnalysisConfig::load(Some(Path::new("/nonexistent/risk.toml"))).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
