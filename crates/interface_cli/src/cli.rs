//! Command-line arguments

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use domain_risk::{ClaimCategory, Severity};

#[derive(Parser, Debug)]
#[command(
    name = "risk-analysis",
    about = "Score insurance claims against underwriting rules and produce risk reports",
    version
)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Override the configured log level
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Browse the rule catalog
    Rules(RulesArgs),
    /// List the built-in sample claims
    Samples,
    /// Run a claim through the full analysis and print the report
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RulesArgs {
    /// Only rules of this category (health, motor, life)
    #[arg(long)]
    pub category: Option<ClaimCategory>,
    /// Only rules of this severity (low, medium, high)
    #[arg(long)]
    pub severity: Option<Severity>,
    /// Case-insensitive text to find in id, topic or description
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AnalyzeArgs {
    /// Claim file in JSON
    #[arg(long, conflicts_with = "sample", required_unless_present = "sample")]
    pub claim: Option<PathBuf>,
    /// Built-in sample claim number, starting at 1
    #[arg(long)]
    pub sample: Option<usize>,
    /// Deselect a rule (repeatable)
    #[arg(long = "exclude", value_name = "RULE_ID")]
    pub exclude: Vec<String>,
    /// Select only these rules (repeatable)
    #[arg(long = "only", value_name = "RULE_ID")]
    pub only: Vec<String>,
    /// Evaluate as of this date (YYYY-MM-DD) instead of now
    #[arg(long, value_parser = parse_date)]
    pub as_of: Option<NaiveDate>,
    /// Write the report to a file, or into a directory under its default name
    #[arg(long)]
    pub output: Option<PathBuf>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    core_kernel::parse_date(raw).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "risk-analysis",
            "analyze",
            "--sample",
            "2",
            "--exclude",
            "MOT-007",
            "--exclude",
            "MOT-006",
            "--as-of",
            "2025-08-01",
        ])
        .unwrap();

        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.sample, Some(2));
        assert_eq!(args.exclude, vec!["MOT-007", "MOT-006"]);
        assert_eq!(args.as_of, NaiveDate::from_ymd_opt(2025, 8, 1));
    }

    #[test]
    fn test_analyze_requires_a_claim_source() {
        assert!(Cli::try_parse_from(["risk-analysis", "analyze"]).is_err());
        assert!(Cli::try_parse_from([
            "risk-analysis",
            "analyze",
            "--sample",
            "1",
            "--claim",
            "claim.json"
        ])
        .is_err());
    }

    #[test]
    fn test_rules_filters_parse() {
        let cli = Cli::try_parse_from(["risk-analysis", "rules", "--category", "Life", "--severity", "high"])
            .unwrap();
        let Command::Rules(args) = cli.command else {
            panic!("expected rules");
        };
        assert_eq!(args.category, Some(ClaimCategory::Life));
        assert_eq!(args.severity, Some(Severity::High));
    }

    #[test]
    fn test_bad_date_rejected() {
        assert!(Cli::try_parse_from(["risk-analysis", "analyze", "--sample", "1", "--as-of", "01/08/2025"]).is_err());
    }
}
