//! Rule evaluation
//!
//! Evaluation turns a complete intake into three derived facts and checks
//! every selected rule's condition against them. The outcome of each rule is
//! fully determined by those facts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{days_since, EvaluationId};
use crate::catalog::RuleCatalog;
use crate::category::ClaimCategory;
use crate::error::RiskError;
use crate::intake::ClaimIntake;
use crate::rule::{RuleDefinition, RuleId, Variable};
use crate::selection::RuleSelection;

/// Values rule conditions are evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimFacts {
    /// Claim amount as entered, in rupees
    pub claim_amount: Decimal,
    /// Days from policy start to the evaluation instant, rounded up
    pub days_since_policy_start: i64,
    /// Days from the incident to the evaluation instant, rounded up
    pub days_since_incident: i64,
}

impl ClaimFacts {
    /// Derives facts from a complete intake as of `at`
    ///
    /// # Errors
    ///
    /// `Validation` if the amount or either date is missing.
    pub fn derive(intake: &ClaimIntake, at: DateTime<Utc>) -> Result<Self, RiskError> {
        match (intake.claim_amount, intake.policy_start_date, intake.incident_date) {
            (Some(amount), Some(policy_start), Some(incident)) => Ok(Self {
                claim_amount: amount.amount(),
                days_since_policy_start: days_since(policy_start, at),
                days_since_incident: days_since(incident, at),
            }),
            _ => Err(RiskError::Validation {
                missing: intake.missing_fields(),
            }),
        }
    }

    pub fn value_of(&self, variable: Variable) -> Decimal {
        match variable {
            Variable::ClaimAmount => self.claim_amount,
            Variable::DaysSincePolicyStart => Decimal::from(self.days_since_policy_start),
            Variable::DaysSinceIncident => Decimal::from(self.days_since_incident),
        }
    }
}

/// Pass/fail verdict for one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub rule_id: RuleId,
    pub passed: bool,
    pub reason: String,
}

/// Outcomes of one evaluation run, in catalog order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub id: EvaluationId,
    pub category: ClaimCategory,
    pub evaluated_at: DateTime<Utc>,
    pub facts: ClaimFacts,
    pub outcomes: Vec<RuleOutcome>,
}

impl EvaluationResult {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    pub fn outcome(&self, rule_id: &str) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|o| o.rule_id.as_str() == rule_id)
    }

    pub fn failed(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }
}

/// Evaluates selected rules from a catalog
#[derive(Debug, Clone, Copy)]
pub struct RuleEvaluator<'a> {
    catalog: &'a RuleCatalog,
}

impl<'a> RuleEvaluator<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self { catalog }
    }

    /// A rule fails when its violation condition holds
    pub fn evaluate_rule(&self, rule: &RuleDefinition, facts: &ClaimFacts) -> RuleOutcome {
        let passed = !rule.condition.holds(facts);
        let reason = if passed { &rule.pass_reason } else { &rule.fail_reason };

        tracing::debug!(
            rule_id = %rule.id,
            passed,
            condition = %rule.condition,
            "Evaluated rule"
        );

        RuleOutcome {
            rule_id: rule.id.clone(),
            passed,
            reason: reason.clone(),
        }
    }

    /// Evaluates every selected rule against the intake as of `at`
    ///
    /// # Errors
    ///
    /// * `Validation` if the intake is incomplete
    /// * `EmptySelection` if no rule is selected
    pub fn evaluate(
        &self,
        intake: &ClaimIntake,
        selection: &RuleSelection,
        at: DateTime<Utc>,
    ) -> Result<EvaluationResult, RiskError> {
        intake.validate()?;
        let facts = ClaimFacts::derive(intake, at)?;

        let category = match (selection.category(), selection.is_empty()) {
            (Some(category), false) => category,
            _ => return Err(RiskError::EmptySelection),
        };

        let outcomes: Vec<RuleOutcome> = selection
            .ordered(self.catalog)
            .into_iter()
            .map(|rule| self.evaluate_rule(rule, &facts))
            .collect();

        Ok(EvaluationResult {
            id: EvaluationId::new_v7(),
            category,
            evaluated_at: at,
            facts,
            outcomes,
        })
    }
}
