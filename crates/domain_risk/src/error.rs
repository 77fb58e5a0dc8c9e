//! Risk analysis domain errors

use thiserror::Error;

use core_kernel::CoreError;
use crate::intake::ClaimField;
use crate::session::AnalysisStep;

/// Errors that can occur while driving a risk analysis
///
/// Every variant is recoverable: the operation that produced it leaves the
/// session exactly as it was.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error("Missing required fields: {}", join_fields(.missing))]
    Validation { missing: Vec<ClaimField> },

    #[error("Invalid value for {field}: {reason}")]
    InvalidFieldValue { field: ClaimField, reason: String },

    #[error("Unknown claim field: {0}")]
    UnknownField(String),

    #[error("Unknown claim category: {0}")]
    UnknownCategory(String),

    #[error("Rule {rule_id} is not available for category {category}")]
    InvalidRuleId { rule_id: String, category: String },

    #[error("At least one rule must be selected")]
    EmptySelection,

    #[error("Operation requires {expected}, session is at {actual}")]
    StepMismatch {
        expected: AnalysisStep,
        actual: AnalysisStep,
    },

    #[error("Cannot move from {from} to {to}")]
    InvalidTransition { from: AnalysisStep, to: AnalysisStep },

    #[error("Session has not been evaluated")]
    NotEvaluated,

    #[error("Rule catalog error: {0}")]
    Catalog(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl RiskError {
    pub fn catalog(message: impl Into<String>) -> Self {
        RiskError::Catalog(message.into())
    }

    /// True for errors that block a step transition
    pub fn is_blocked_transition(&self) -> bool {
        matches!(
            self,
            RiskError::Validation { .. }
                | RiskError::EmptySelection
                | RiskError::InvalidTransition { .. }
        )
    }
}

fn join_fields(fields: &[ClaimField]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}
