//! Plain-text risk report

use chrono::{DateTime, NaiveDate, Utc};

use crate::catalog::RuleCatalog;
use crate::evaluator::EvaluationResult;
use crate::intake::ClaimIntake;
use crate::scoring::RiskOutcome;

const GENERATED_AT_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Renders the report for an evaluated claim
///
/// Output depends only on the arguments, so two renders with the same
/// `generated_at` are byte-identical.
pub fn render(
    intake: &ClaimIntake,
    evaluation: &EvaluationResult,
    outcome: &RiskOutcome,
    catalog: &RuleCatalog,
    generated_at: DateTime<Utc>,
) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let date = |value: Option<chrono::NaiveDate>| {
        value.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
    };

    let mut lines = vec![
        "RISK ANALYSIS REPORT".to_string(),
        "====================".to_string(),
        String::new(),
        "Customer Information:".to_string(),
        format!("- Name: {}", text(&intake.customer_name)),
        format!("- Policy Number: {}", text(&intake.policy_number)),
        format!(
            "- Claim Type: {}",
            intake.claim_type.map(|c| c.display_name()).unwrap_or_default()
        ),
        format!(
            "- Claim Amount: {}",
            intake
                .claim_amount
                .map(|m| m.to_grouped_string())
                .unwrap_or_default()
        ),
        format!("- Policy Start Date: {}", date(intake.policy_start_date)),
        format!("- Incident Date: {}", date(intake.incident_date)),
        format!(
            "- Hospital/Garage: {}",
            intake.provider_name.as_deref().unwrap_or("N/A")
        ),
        String::new(),
        "Risk Analysis Results:".to_string(),
        format!("- Risk Score: {}", outcome.score),
        format!("- Risk Level: {}", outcome.level),
        format!("- Recommendation: {}", outcome.recommendation.action()),
        String::new(),
        "Rule Evaluation Summary:".to_string(),
        format!("- Total Rules Evaluated: {}", evaluation.total()),
        format!("- Passed: {}", evaluation.passed_count()),
        format!("- Failed: {}", evaluation.failed_count()),
        format!("- Critical Failures: {}", outcome.critical_failures()),
        String::new(),
        "Detailed Rule Results:".to_string(),
    ];

    for result in &evaluation.outcomes {
        let description = catalog
            .find_in(evaluation.category, result.rule_id.as_str())
            .map(|r| r.description.as_str())
            .unwrap_or_default();
        lines.push(format!(
            "- {} ({}): {} - {}",
            result.rule_id,
            description,
            if result.passed { "PASSED" } else { "FAILED" },
            result.reason
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Report Generated: {}",
        generated_at.format(GENERATED_AT_FORMAT)
    ));

    lines.join("\n")
}

/// Default file name for a saved report, e.g.
/// `Risk_Analysis_Report_GSS-2025-123456_2025-08-01.txt`
pub fn file_name(policy_number: &str, date: NaiveDate) -> String {
    let policy: String = policy_number
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("Risk_Analysis_Report_{}_{}.txt", policy, date.format("%Y-%m-%d"))
}
