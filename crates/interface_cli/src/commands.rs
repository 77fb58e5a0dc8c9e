//! Command implementations
//!
//! Each command renders its output to a `String`; the binary decides where
//! it goes.

use std::fmt::Write as _;
use std::path::Path;

use core_kernel::{Currency, Money};
use domain_risk::{
    sample_claims, AnalysisStep, CatalogSummary, ClaimSubmission, RiskAnalysisService, RiskError,
    RuleCatalog, RuleQuery, Session,
};

use crate::cli::{AnalyzeArgs, RulesArgs};
use crate::config::AnalysisConfig;
use crate::error::CliError;

/// Lists catalog rules matching the filters, followed by catalog totals
pub fn run_rules(catalog: &RuleCatalog, args: &RulesArgs) -> String {
    let mut query = RuleQuery::new();
    if let Some(category) = args.category {
        query = query.category(category);
    }
    if let Some(severity) = args.severity {
        query = query.severity(severity);
    }
    if let Some(text) = &args.search {
        query = query.text(text.as_str());
    }

    let rules = query.apply(catalog);
    let summary = CatalogSummary::of(catalog);

    let mut out = String::new();
    for rule in &rules {
        let _ = writeln!(
            out,
            "{:<8} {:<6} weight {:>3}  {} [{}]",
            rule.id,
            rule.severity.label(),
            rule.weight,
            rule.topic,
            rule.category
        );
        let _ = writeln!(out, "         {}", rule.description);
        let _ = writeln!(out, "         fails when {}", rule.condition);
    }
    if rules.is_empty() {
        out.push_str("No rules match the given filters\n");
    }

    let per_category = summary
        .per_category
        .iter()
        .map(|(category, count)| format!("{} {}", category, count))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(
        out,
        "\nShowing {} of {} rules | High severity: {} | Categories: {} ({})",
        rules.len(),
        summary.total_rules,
        summary.high_severity,
        summary.categories,
        per_category
    );
    let _ = write!(out, "Catalog version {}", catalog.version());
    out
}

/// Lists the built-in sample claims, numbered from 1
pub fn run_samples() -> Result<String, CliError> {
    let mut out = String::new();
    for (i, claim) in sample_claims()?.iter().enumerate() {
        let amount = Money::new(claim.claim_amount, Currency::INR);
        let _ = writeln!(
            out,
            "{:>2}. {:<24} {:<16} {:<7} {:>12}  {}",
            i + 1,
            claim.customer_name,
            claim.policy_number,
            claim.claim_type,
            amount.to_grouped_string(),
            claim.provider_name.as_deref().unwrap_or("N/A")
        );
    }
    Ok(out.trim_end().to_string())
}

/// Drives one claim through all four steps and returns the report
///
/// With `--output` the report is written to the file and a confirmation
/// line is returned instead. An existing directory gets the default report
/// file name for the claim.
pub fn run_analyze(
    catalog: &RuleCatalog,
    config: &AnalysisConfig,
    args: &AnalyzeArgs,
) -> Result<String, CliError> {
    let submission = load_claim(args)?;
    let service = config.service(catalog, args.as_of);

    let mut session = service.start_session();
    service.load_submission(&mut session, &submission)?;
    service.advance(&mut session)?;
    apply_selection(&service, &mut session, args)?;
    service.advance(&mut session)?;
    service.advance(&mut session)?;
    debug_assert_eq!(session.step(), AnalysisStep::Result);

    let outcome = service.compute_risk_outcome(&session)?;
    tracing::info!(
        session_id = %session.id(),
        score = outcome.score,
        level = %outcome.level,
        recommendation = outcome.recommendation.as_str(),
        "Analysis complete"
    );

    let report = service.render_report(&session)?;
    match &args.output {
        Some(target) => {
            let path = if target.is_dir() {
                target.join(service.report_file_name(&session)?)
            } else {
                target.clone()
            };
            std::fs::write(&path, format!("{}\n", report)).map_err(|source| CliError::Io {
                path: path.clone(),
                source,
            })?;
            Ok(format!("Report written to {}", path.display()))
        }
        None => Ok(report),
    }
}

fn load_claim(args: &AnalyzeArgs) -> Result<ClaimSubmission, CliError> {
    match (&args.claim, args.sample) {
        (Some(path), _) => read_claim_file(path),
        (None, Some(number)) => {
            let samples = sample_claims()?;
            number
                .checked_sub(1)
                .and_then(|i| samples.get(i))
                .cloned()
                .ok_or_else(|| {
                    CliError::InvalidArgument(format!(
                        "sample {} does not exist, choose 1 to {}",
                        number,
                        samples.len()
                    ))
                })
        }
        (None, None) => Err(CliError::InvalidArgument(
            "either --claim or --sample is required".to_string(),
        )),
    }
}

fn read_claim_file(path: &Path) -> Result<ClaimSubmission, CliError> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::ClaimFile {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_selection(
    service: &RiskAnalysisService<'_>,
    session: &mut Session,
    args: &AnalyzeArgs,
) -> Result<(), CliError> {
    if !args.only.is_empty() {
        service.clear_rules(session)?;
        for id in &args.only {
            if !session.selection().contains(id.trim()) {
                service.toggle_rule(session, id)?;
            }
        }
    }

    for id in &args.exclude {
        if session.selection().contains(id.trim()) {
            service.toggle_rule(session, id)?;
        } else if let Some(category) = session.selection().category() {
            if service.catalog().find_in(category, id.trim()).is_none() {
                return Err(RiskError::InvalidRuleId {
                    rule_id: id.trim().to_string(),
                    category: category.to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}
