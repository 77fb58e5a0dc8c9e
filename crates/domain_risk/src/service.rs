//! Analysis workflow service
//!
//! [`RiskAnalysisService`] owns the collaborators a session needs (the rule
//! catalog, a clock and a scorer) and is the only way a [`Session`] changes.
//! Sessions move through four steps:
//!
//! ```text
//! Intake -> RuleSelection -> Evaluation -> Result
//! ```
//!
//! Moving forward is gated: intake must be complete to reach rule selection,
//! and at least one rule must be selected to reach evaluation. Moving back is
//! always allowed and keeps everything entered so far. Every operation that
//! returns an error leaves the session untouched.

use core_kernel::{Clock, SystemClock};
use crate::catalog::RuleCatalog;
use crate::error::RiskError;
use crate::evaluator::{EvaluationResult, RuleEvaluator};
use crate::intake::{ClaimField, ClaimIntake, ClaimSubmission};
use crate::report;
use crate::scoring::{RiskOutcome, RiskScorer, ScoringPolicy};
use crate::selection::RuleSelection;
use crate::session::{AnalysisStep, Session};

/// Drives analysis sessions against one rule catalog
pub struct RiskAnalysisService<'c> {
    catalog: &'c RuleCatalog,
    clock: Box<dyn Clock>,
    scorer: RiskScorer,
}

impl<'c> RiskAnalysisService<'c> {
    /// Creates a service using wall-clock time and the default scoring policy
    pub fn new(catalog: &'c RuleCatalog) -> Self {
        Self {
            catalog,
            clock: Box::new(SystemClock),
            scorer: RiskScorer::default(),
        }
    }

    /// Replaces the evaluation time source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Replaces the scoring policy
    pub fn with_scoring_policy(mut self, policy: ScoringPolicy) -> Self {
        self.scorer = RiskScorer::new(policy);
        self
    }

    pub fn catalog(&self) -> &'c RuleCatalog {
        self.catalog
    }

    pub fn scoring_policy(&self) -> &ScoringPolicy {
        self.scorer.policy()
    }

    /// Starts an empty session at the intake step
    pub fn start_session(&self) -> Session {
        let session = Session::new();
        tracing::info!(session_id = %session.id, "Started analysis session");
        session
    }

    // ------------------------------------------------------------------
    // Intake
    // ------------------------------------------------------------------

    /// Sets one intake field from raw text
    ///
    /// Changing the claim type re-seeds the selection with every rule of the
    /// new category. Any previous evaluation is discarded.
    pub fn set_claim_field(
        &self,
        session: &mut Session,
        field: ClaimField,
        value: &str,
    ) -> Result<(), RiskError> {
        require_step(session, AnalysisStep::Intake)?;

        let mut intake = session.intake.clone();
        intake.set_field(field, value)?;
        self.commit_intake(session, intake);

        tracing::debug!(session_id = %session.id, field = field.key(), "Updated claim field");
        Ok(())
    }

    /// Sets an intake field given by name, e.g. `"claimAmount"`
    pub fn set_claim_field_named(
        &self,
        session: &mut Session,
        name: &str,
        value: &str,
    ) -> Result<(), RiskError> {
        let field: ClaimField = name.parse()?;
        self.set_claim_field(session, field, value)
    }

    /// Fills the whole intake form from a submission
    ///
    /// Either every field is applied or, on the first bad value, none is.
    pub fn load_submission(
        &self,
        session: &mut Session,
        submission: &ClaimSubmission,
    ) -> Result<(), RiskError> {
        require_step(session, AnalysisStep::Intake)?;

        let mut intake = session.intake.clone();
        for (field, value) in submission.field_values() {
            intake.set_field(field, &value)?;
        }
        self.commit_intake(session, intake);

        tracing::info!(
            session_id = %session.id,
            policy_number = %submission.policy_number,
            "Loaded claim submission"
        );
        Ok(())
    }

    fn commit_intake(&self, session: &mut Session, intake: ClaimIntake) {
        if intake.claim_type != session.selection.category() {
            session.selection = match intake.claim_type {
                Some(category) => RuleSelection::default_selection(self.catalog, category),
                None => RuleSelection::empty(),
            };
        }
        session.intake = intake;
        session.evaluation = None;
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Moves one step forward, running evaluation when entering step 3
    pub fn advance(&self, session: &mut Session) -> Result<AnalysisStep, RiskError> {
        let from = session.step;
        let result = match from {
            AnalysisStep::Intake => session
                .intake
                .validate()
                .map(|_| AnalysisStep::RuleSelection),
            AnalysisStep::RuleSelection => self.run_evaluation(session).map(|evaluation| {
                session.evaluation = Some(evaluation);
                AnalysisStep::Evaluation
            }),
            AnalysisStep::Evaluation => Ok(AnalysisStep::Result),
            AnalysisStep::Result => Err(RiskError::InvalidTransition {
                from,
                to: AnalysisStep::Result,
            }),
        };

        match result {
            Ok(to) => {
                session.step = to;
                tracing::info!(session_id = %session.id, from = %from, to = %to, "Advanced session");
                Ok(to)
            }
            Err(e) => {
                tracing::warn!(session_id = %session.id, step = %from, error = %e, "Advance rejected");
                Err(e)
            }
        }
    }

    /// Moves one step back; a no-op at the intake step
    pub fn retreat(&self, session: &mut Session) -> Result<AnalysisStep, RiskError> {
        if let Some(previous) = session.step.previous() {
            tracing::info!(session_id = %session.id, from = %session.step, to = %previous, "Retreated session");
            session.step = previous;
        }
        Ok(session.step)
    }

    /// Jumps to an earlier (or the current) step
    ///
    /// # Errors
    ///
    /// `InvalidTransition` for a step ahead of the current one; use
    /// [`advance`](Self::advance) to move forward through the gates.
    pub fn go_to(&self, session: &mut Session, target: AnalysisStep) -> Result<AnalysisStep, RiskError> {
        if target > session.step {
            tracing::warn!(session_id = %session.id, from = %session.step, to = %target, "Jump rejected");
            return Err(RiskError::InvalidTransition {
                from: session.step,
                to: target,
            });
        }
        session.step = target;
        Ok(target)
    }

    // ------------------------------------------------------------------
    // Rule selection
    // ------------------------------------------------------------------

    /// Toggles a rule of the active category; returns whether it is now selected
    pub fn toggle_rule(&self, session: &mut Session, rule_id: &str) -> Result<bool, RiskError> {
        require_step(session, AnalysisStep::RuleSelection)?;

        let selected = session.selection.toggle(self.catalog, rule_id)?;
        session.evaluation = None;

        tracing::debug!(session_id = %session.id, rule_id, selected, "Toggled rule");
        Ok(selected)
    }

    pub fn select_all_rules(&self, session: &mut Session) -> Result<(), RiskError> {
        require_step(session, AnalysisStep::RuleSelection)?;
        session.selection.select_all(self.catalog);
        session.evaluation = None;
        Ok(())
    }

    pub fn clear_rules(&self, session: &mut Session) -> Result<(), RiskError> {
        require_step(session, AnalysisStep::RuleSelection)?;
        session.selection.clear();
        session.evaluation = None;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Evaluation and results
    // ------------------------------------------------------------------

    /// Evaluates the selected rules now, replacing any earlier evaluation
    ///
    /// Allowed at the rule selection and evaluation steps; the step itself
    /// does not change.
    pub fn evaluate<'s>(&self, session: &'s mut Session) -> Result<&'s EvaluationResult, RiskError> {
        if !matches!(session.step, AnalysisStep::RuleSelection | AnalysisStep::Evaluation) {
            return Err(RiskError::StepMismatch {
                expected: AnalysisStep::Evaluation,
                actual: session.step,
            });
        }
        let evaluation = self.run_evaluation(session)?;
        Ok(session.evaluation.insert(evaluation))
    }

    fn run_evaluation(&self, session: &Session) -> Result<EvaluationResult, RiskError> {
        let at = self.clock.now();
        let evaluation = RuleEvaluator::new(self.catalog).evaluate(&session.intake, &session.selection, at)?;

        tracing::info!(
            session_id = %session.id,
            evaluation_id = %evaluation.id,
            category = %evaluation.category,
            rules = evaluation.total(),
            failed = evaluation.failed_count(),
            "Evaluated claim"
        );
        Ok(evaluation)
    }

    /// Scores the current evaluation
    pub fn compute_risk_outcome(&self, session: &Session) -> Result<RiskOutcome, RiskError> {
        let evaluation = session.evaluation.as_ref().ok_or(RiskError::NotEvaluated)?;
        Ok(self.scorer.compute(evaluation, &session.selection, self.catalog))
    }

    /// Renders the plain-text report, stamped with the clock's current time
    pub fn render_report(&self, session: &Session) -> Result<String, RiskError> {
        let evaluation = session.evaluation.as_ref().ok_or(RiskError::NotEvaluated)?;
        let outcome = self.scorer.compute(evaluation, &session.selection, self.catalog);
        Ok(report::render(
            &session.intake,
            evaluation,
            &outcome,
            self.catalog,
            self.clock.now(),
        ))
    }

    /// Default file name for saving the report, dated by the clock
    pub fn report_file_name(&self, session: &Session) -> Result<String, RiskError> {
        if session.evaluation.is_none() {
            return Err(RiskError::NotEvaluated);
        }
        let policy = session.intake.policy_number.as_deref().unwrap_or_default();
        Ok(report::file_name(policy, self.clock.now().date_naive()))
    }

    /// Clears all session data and returns to the intake step
    pub fn reset(&self, session: &mut Session) {
        session.step = AnalysisStep::Intake;
        session.intake = ClaimIntake::default();
        session.selection = RuleSelection::empty();
        session.evaluation = None;
        tracing::info!(session_id = %session.id, "Reset session");
    }
}

fn require_step(session: &Session, expected: AnalysisStep) -> Result<(), RiskError> {
    if session.step == expected {
        Ok(())
    } else {
        Err(RiskError::StepMismatch {
            expected,
            actual: session.step,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::FixedClock;
    use chrono::NaiveDate;

    fn service() -> RiskAnalysisService<'static> {
        let catalog = RuleCatalog::builtin().unwrap();
        RiskAnalysisService::new(catalog)
            .with_clock(FixedClock::on(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()))
    }

    fn filled(service: &RiskAnalysisService<'_>) -> Session {
        let mut session = service.start_session();
        for (name, value) in [
            ("customerName", "Vikram Singh"),
            ("policyNumber", "GSS-2024-111222"),
            ("claimType", "motor"),
            ("claimAmount", "45000"),
            ("policyStartDate", "2024-01-10"),
            ("incidentDate", "2025-07-28"),
        ] {
            service.set_claim_field_named(&mut session, name, value).unwrap();
        }
        session
    }

    #[test]
    fn test_claim_type_seeds_selection() {
        let service = service();
        let session = filled(&service);
        assert_eq!(session.selection().len(), 7);
        assert!(session.selection().contains("MOT-001"));
    }

    #[test]
    fn test_edit_outside_intake_rejected() {
        let service = service();
        let mut session = filled(&service);
        service.advance(&mut session).unwrap();

        let before = session.clone();
        let err = service
            .set_claim_field(&mut session, ClaimField::ClaimAmount, "99")
            .unwrap_err();
        assert!(matches!(err, RiskError::StepMismatch { .. }));
        assert_eq!(session, before);
    }

    #[test]
    fn test_toggle_clears_evaluation() {
        let service = service();
        let mut session = filled(&service);
        service.advance(&mut session).unwrap();
        service.evaluate(&mut session).unwrap();
        assert!(session.evaluation().is_some());

        service.toggle_rule(&mut session, "MOT-007").unwrap();
        assert!(session.evaluation().is_none());
    }

    #[test]
    fn test_go_to_forward_rejected() {
        let service = service();
        let mut session = filled(&service);
        let err = service.go_to(&mut session, AnalysisStep::Result).unwrap_err();
        assert!(err.is_blocked_transition());
        assert_eq!(session.step(), AnalysisStep::Intake);
    }

    #[test]
    fn test_advance_past_result_rejected() {
        let service = service();
        let mut session = filled(&service);
        for _ in 0..3 {
            service.advance(&mut session).unwrap();
        }
        assert_eq!(session.step(), AnalysisStep::Result);
        assert!(service.advance(&mut session).is_err());
        assert_eq!(session.step(), AnalysisStep::Result);
    }

    #[test]
    fn test_report_file_name_needs_evaluation() {
        let service = service();
        let mut session = filled(&service);
        assert!(matches!(
            service.report_file_name(&session),
            Err(RiskError::NotEvaluated)
        ));

        service.advance(&mut session).unwrap();
        service.advance(&mut session).unwrap();
        assert_eq!(
            service.report_file_name(&session).unwrap(),
            "Risk_Analysis_Report_GSS-2024-111222_2025-08-01.txt"
        );
    }
}
