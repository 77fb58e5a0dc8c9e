//! Custom Test Assertions
//!
//! Assertion helpers for evaluation and scoring results that name the rule
//! or figure involved when they fail.

use domain_risk::{EvaluationResult, Recommendation, RiskError, RiskLevel, RiskOutcome};

/// Asserts that the rule was evaluated and failed
pub fn assert_rule_failed(evaluation: &EvaluationResult, rule_id: &str) {
    let outcome = evaluation
        .outcome(rule_id)
        .unwrap_or_else(|| panic!("Rule {} was not evaluated", rule_id));
    assert!(
        !outcome.passed,
        "Expected {} to fail, it passed: {}",
        rule_id,
        outcome.reason
    );
}

/// Asserts that the rule was evaluated and passed
pub fn assert_rule_passed(evaluation: &EvaluationResult, rule_id: &str) {
    let outcome = evaluation
        .outcome(rule_id)
        .unwrap_or_else(|| panic!("Rule {} was not evaluated", rule_id));
    assert!(
        outcome.passed,
        "Expected {} to pass, it failed: {}",
        rule_id,
        outcome.reason
    );
}

/// Asserts that every evaluated rule passed
pub fn assert_all_passed(evaluation: &EvaluationResult) {
    let failed: Vec<&str> = evaluation.failed().map(|o| o.rule_id.as_str()).collect();
    assert!(failed.is_empty(), "Expected no failures, got {:?}", failed);
}

/// Asserts score, level and recommendation together
pub fn assert_outcome(
    outcome: &RiskOutcome,
    score: u32,
    level: RiskLevel,
    recommendation: Recommendation,
) {
    assert_eq!(
        (outcome.score, outcome.level, outcome.recommendation),
        (score, level, recommendation),
        "Unexpected risk outcome: {:?}",
        outcome
    );
}

/// Asserts that an error lists exactly these missing fields
pub fn assert_missing_fields(error: &RiskError, expected: &[domain_risk::ClaimField]) {
    match error {
        RiskError::Validation { missing } => assert_eq!(missing.as_slice(), expected),
        other => panic!("Expected a validation error, got {:?}", other),
    }
}
