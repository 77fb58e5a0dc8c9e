//! Risk scoring
//!
//! Failed rules are counted per severity and each count is multiplied by a
//! severity weight. The sum, capped, is the risk score:
//!
//! ```text
//! score = min(cap, 30 * high + 20 * medium + 10 * low)
//! ```
//!
//! The score maps to a risk level by thresholds, and the level together
//! with the presence of critical failures decides the recommendation.

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::CoreError;
use crate::catalog::RuleCatalog;
use crate::evaluator::EvaluationResult;
use crate::rule::{RuleId, Severity};
use crate::selection::RuleSelection;

/// Weights, cap and thresholds used by [`RiskScorer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub high_weight: u32,
    pub medium_weight: u32,
    pub low_weight: u32,
    pub score_cap: u32,
    /// Lowest score rated Medium
    pub medium_threshold: u32,
    /// Lowest score rated High
    pub high_threshold: u32,
    /// Recommendation for a Medium level without critical failures
    pub medium_recommendation: Recommendation,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            high_weight: 30,
            medium_weight: 20,
            low_weight: 10,
            score_cap: 100,
            medium_threshold: 30,
            high_threshold: 60,
            medium_recommendation: Recommendation::Investigate,
        }
    }
}

impl ScoringPolicy {
    /// Checks that the thresholds are ordered and within the cap
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.score_cap == 0 {
            return Err(CoreError::configuration("score_cap must be positive"));
        }
        if self.medium_threshold > self.high_threshold {
            return Err(CoreError::configuration(format!(
                "medium_threshold ({}) exceeds high_threshold ({})",
                self.medium_threshold, self.high_threshold
            )));
        }
        if self.high_threshold > self.score_cap {
            return Err(CoreError::configuration(format!(
                "high_threshold ({}) exceeds score_cap ({})",
                self.high_threshold, self.score_cap
            )));
        }
        if !matches!(
            self.medium_recommendation,
            Recommendation::Investigate | Recommendation::Review
        ) {
            return Err(CoreError::configuration(format!(
                "medium_recommendation must be investigate or review, got {}",
                self.medium_recommendation.as_str()
            )));
        }
        Ok(())
    }
}

/// Overall risk rating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// Suggested handling of the claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Approve,
    Review,
    Investigate,
    Escalate,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Approve => "approve",
            Recommendation::Review => "review",
            Recommendation::Investigate => "investigate",
            Recommendation::Escalate => "escalate",
        }
    }

    /// Action line shown in reports
    pub fn action(&self) -> &'static str {
        match self {
            Recommendation::Approve => "Approve",
            Recommendation::Review => "Review",
            Recommendation::Investigate => "Investigate Further",
            Recommendation::Escalate => "Escalate for Review",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.action())
    }
}

/// Failed-rule counts per severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl SeverityCounts {
    pub fn total(&self) -> u32 {
        self.high + self.medium + self.low
    }

    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }
}

/// Aggregated result of an evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskOutcome {
    pub score: u32,
    pub level: RiskLevel,
    pub recommendation: Recommendation,
    pub counts: SeverityCounts,
    pub failed_high: Vec<RuleId>,
    pub failed_medium: Vec<RuleId>,
    pub failed_low: Vec<RuleId>,
}

impl RiskOutcome {
    /// Failed High-severity rules
    pub fn critical_failures(&self) -> usize {
        self.failed_high.len()
    }
}

/// Computes risk outcomes under a [`ScoringPolicy`]
#[derive(Debug, Clone, Default)]
pub struct RiskScorer {
    policy: ScoringPolicy,
}

impl RiskScorer {
    pub fn new(policy: ScoringPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn score(&self, counts: &SeverityCounts) -> u32 {
        let raw = u64::from(self.policy.high_weight) * u64::from(counts.high)
            + u64::from(self.policy.medium_weight) * u64::from(counts.medium)
            + u64::from(self.policy.low_weight) * u64::from(counts.low);
        raw.min(u64::from(self.policy.score_cap)) as u32
    }

    pub fn level(&self, score: u32) -> RiskLevel {
        if score >= self.policy.high_threshold {
            RiskLevel::High
        } else if score >= self.policy.medium_threshold {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn recommend(&self, level: RiskLevel, counts: &SeverityCounts) -> Recommendation {
        if counts.high > 0 {
            return Recommendation::Escalate;
        }
        match level {
            RiskLevel::Low => Recommendation::Approve,
            RiskLevel::Medium => self.policy.medium_recommendation,
            RiskLevel::High => Recommendation::Escalate,
        }
    }

    /// Scores the failed outcomes of rules that are still selected
    ///
    /// Severities come from the catalog entry of each failed rule.
    pub fn compute(
        &self,
        evaluation: &EvaluationResult,
        selection: &RuleSelection,
        catalog: &RuleCatalog,
    ) -> RiskOutcome {
        let mut counts = SeverityCounts::default();
        let mut failed_high = Vec::new();
        let mut failed_medium = Vec::new();
        let mut failed_low = Vec::new();

        for outcome in evaluation.failed() {
            if !selection.contains(outcome.rule_id.as_str()) {
                continue;
            }
            let Some(rule) = catalog.find_in(evaluation.category, outcome.rule_id.as_str()) else {
                tracing::warn!(rule_id = %outcome.rule_id, "Failed rule missing from catalog");
                continue;
            };
            counts.record(rule.severity);
            match rule.severity {
                Severity::High => failed_high.push(rule.id.clone()),
                Severity::Medium => failed_medium.push(rule.id.clone()),
                Severity::Low => failed_low.push(rule.id.clone()),
            }
        }

        let score = self.score(&counts);
        let level = self.level(score);
        let recommendation = self.recommend(level, &counts);

        RiskOutcome {
            score,
            level,
            recommendation,
            counts,
            failed_high,
            failed_medium,
            failed_low,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn counts(high: u32, medium: u32, low: u32) -> SeverityCounts {
        SeverityCounts { high, medium, low }
    }

    #[test]
    fn test_default_weights() {
        let scorer = RiskScorer::default();
        assert_eq!(scorer.score(&counts(0, 0, 0)), 0);
        assert_eq!(scorer.score(&counts(1, 1, 1)), 60);
        assert_eq!(scorer.score(&counts(4, 0, 0)), 100);
    }

    #[test]
    fn test_level_thresholds() {
        let scorer = RiskScorer::default();
        assert_eq!(scorer.level(29), RiskLevel::Low);
        assert_eq!(scorer.level(30), RiskLevel::Medium);
        assert_eq!(scorer.level(59), RiskLevel::Medium);
        assert_eq!(scorer.level(60), RiskLevel::High);
    }

    #[test]
    fn test_critical_failure_escalates() {
        let scorer = RiskScorer::default();
        let c = counts(1, 0, 0);
        let level = scorer.level(scorer.score(&c));
        assert_eq!(level, RiskLevel::Medium);
        assert_eq!(scorer.recommend(level, &c), Recommendation::Escalate);
    }

    #[test]
    fn test_medium_recommendation_is_configurable() {
        let c = counts(0, 2, 0);
        let default = RiskScorer::default();
        assert_eq!(default.recommend(RiskLevel::Medium, &c), Recommendation::Investigate);

        let review = RiskScorer::new(ScoringPolicy {
            medium_recommendation: Recommendation::Review,
            ..ScoringPolicy::default()
        });
        assert_eq!(review.recommend(RiskLevel::Medium, &c), Recommendation::Review);
    }

    #[test]
    fn test_policy_validation() {
        assert!(ScoringPolicy::default().validate().is_ok());

        let inverted = ScoringPolicy {
            medium_threshold: 70,
            ..ScoringPolicy::default()
        };
        assert!(inverted.validate().is_err());

        let approve_medium = ScoringPolicy {
            medium_recommendation: Recommendation::Approve,
            ..ScoringPolicy::default()
        };
        assert!(approve_medium.validate().is_err());
    }

    proptest! {
        #[test]
        fn test_score_never_exceeds_cap(high in 0u32..50, medium in 0u32..50, low in 0u32..50) {
            let scorer = RiskScorer::default();
            prop_assert!(scorer.score(&counts(high, medium, low)) <= 100);
        }

        #[test]
        fn test_score_monotonic_in_high_failures(high in 0u32..20, medium in 0u32..10, low in 0u32..10) {
            let scorer = RiskScorer::default();
            let before = scorer.score(&counts(high, medium, low));
            let after = scorer.score(&counts(high + 1, medium, low));
            prop_assert!(after >= before);
        }
    }
}
