//! Analysis session state

use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::SessionId;
use crate::evaluator::EvaluationResult;
use crate::intake::ClaimIntake;
use crate::selection::RuleSelection;

/// Workflow step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnalysisStep {
    /// Customer and claim details
    Intake,
    /// Choosing the rules to apply
    RuleSelection,
    /// Rules have been evaluated
    Evaluation,
    /// Score, level and recommendation
    Result,
}

impl AnalysisStep {
    pub const ALL: [AnalysisStep; 4] = [
        AnalysisStep::Intake,
        AnalysisStep::RuleSelection,
        AnalysisStep::Evaluation,
        AnalysisStep::Result,
    ];

    /// One-based position in the workflow
    pub fn number(&self) -> u8 {
        match self {
            AnalysisStep::Intake => 1,
            AnalysisStep::RuleSelection => 2,
            AnalysisStep::Evaluation => 3,
            AnalysisStep::Result => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == number)
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn title(&self) -> &'static str {
        match self {
            AnalysisStep::Intake => "Customer Details",
            AnalysisStep::RuleSelection => "Rule Selection",
            AnalysisStep::Evaluation => "Rule Evaluation",
            AnalysisStep::Result => "Risk Result",
        }
    }
}

impl fmt::Display for AnalysisStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.number(), self.title())
    }
}

/// One in-progress analysis, owned by its caller
///
/// Sessions are only mutated through
/// [`RiskAnalysisService`](crate::service::RiskAnalysisService).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub(crate) id: SessionId,
    pub(crate) step: AnalysisStep,
    pub(crate) intake: ClaimIntake,
    pub(crate) selection: RuleSelection,
    pub(crate) evaluation: Option<EvaluationResult>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self {
            id: SessionId::new_v7(),
            step: AnalysisStep::Intake,
            intake: ClaimIntake::default(),
            selection: RuleSelection::empty(),
            evaluation: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn step(&self) -> AnalysisStep {
        self.step
    }

    pub fn intake(&self) -> &ClaimIntake {
        &self.intake
    }

    pub fn selection(&self) -> &RuleSelection {
        &self.selection
    }

    pub fn evaluation(&self) -> Option<&EvaluationResult> {
        self.evaluation.as_ref()
    }
}
