//! Rule definitions and their conditions
//!
//! A rule's condition describes the *violation*: when it holds for a claim,
//! the rule fails. Conditions are a closed predicate tree over three derived
//! claim variables and are interpreted by [`Condition::holds`]; nothing is
//! ever parsed or evaluated from free text at runtime.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::category::ClaimCategory;
use crate::evaluator::ClaimFacts;

/// Rule identifier, e.g. `HLT-001`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RuleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Rule severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// Claim-derived variable a predicate can inspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variable {
    ClaimAmount,
    DaysSincePolicyStart,
    DaysSinceIncident,
}

impl Variable {
    pub fn name(&self) -> &'static str {
        match self {
            Variable::ClaimAmount => "claim_amount",
            Variable::DaysSincePolicyStart => "days_since_policy_start",
            Variable::DaysSinceIncident => "days_since_incident",
        }
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl Comparator {
    /// Applies `lhs <op> rhs`
    pub fn apply(&self, lhs: Decimal, rhs: Decimal) -> bool {
        match self {
            Comparator::Lt => lhs < rhs,
            Comparator::Le => lhs <= rhs,
            Comparator::Gt => lhs > rhs,
            Comparator::Ge => lhs >= rhs,
            Comparator::Eq => lhs == rhs,
            Comparator::Ne => lhs != rhs,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Lt => "<",
            Comparator::Le => "<=",
            Comparator::Gt => ">",
            Comparator::Ge => ">=",
            Comparator::Eq => "==",
            Comparator::Ne => "!=",
        }
    }
}

/// `variable <comparator> threshold`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub variable: Variable,
    pub comparator: Comparator,
    pub threshold: Decimal,
}

impl Predicate {
    pub fn new(variable: Variable, comparator: Comparator, threshold: Decimal) -> Self {
        Self {
            variable,
            comparator,
            threshold,
        }
    }
}

/// Predicate tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Compare(Predicate),
    All(Vec<Condition>),
    Any(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    /// Shorthand for a single comparison
    pub fn compare(variable: Variable, comparator: Comparator, threshold: Decimal) -> Self {
        Condition::Compare(Predicate::new(variable, comparator, threshold))
    }

    /// Returns true when the condition holds for the given facts
    pub fn holds(&self, facts: &ClaimFacts) -> bool {
        match self {
            Condition::Compare(p) => p.comparator.apply(facts.value_of(p.variable), p.threshold),
            Condition::All(children) => children.iter().all(|c| c.holds(facts)),
            Condition::Any(children) => children.iter().any(|c| c.holds(facts)),
            Condition::Not(inner) => !inner.holds(facts),
        }
    }

    /// Checks structural well-formedness
    ///
    /// Empty `all`/`any` groups are rejected: they would make a rule
    /// unconditionally pass or fail, which is never what a catalog author means.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Condition::Compare(_) => Ok(()),
            Condition::All(children) | Condition::Any(children) => {
                if children.is_empty() {
                    return Err("empty condition group".to_string());
                }
                children.iter().try_for_each(Condition::validate)
            }
            Condition::Not(inner) => inner.validate(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Compare(p) => write!(
                f,
                "{} {} {}",
                p.variable.name(),
                p.comparator.symbol(),
                p.threshold
            ),
            Condition::All(children) => write_group(f, children, " AND "),
            Condition::Any(children) => write_group(f, children, " OR "),
            Condition::Not(inner) => write!(f, "NOT {}", inner),
        }
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, children: &[Condition], sep: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{}", child)?;
    }
    f.write_str(")")
}

/// A single catalog rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub id: RuleId,
    pub category: ClaimCategory,
    /// Short browse label, e.g. "Waiting Period"
    pub topic: String,
    pub description: String,
    pub severity: Severity,
    pub weight: u32,
    /// Holds when the rule is violated
    pub condition: Condition,
    pub pass_reason: String,
    pub fail_reason: String,
}
