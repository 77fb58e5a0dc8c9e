//! Test Data Builders
//!
//! Builders for claims and for sessions already driven to a given step.
//! Tests specify only what they care about and take defaults for the rest.

use chrono::NaiveDate;
use domain_risk::{AnalysisStep, ClaimSubmission, RiskAnalysisService, Session};
use rust_decimal::Decimal;

use crate::fixtures::ClaimFixtures;

/// Builder for claim submissions, starting from the reference health claim
pub struct ClaimSubmissionBuilder {
    submission: ClaimSubmission,
}

impl Default for ClaimSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimSubmissionBuilder {
    pub fn new() -> Self {
        Self {
            submission: ClaimFixtures::rajesh_health(),
        }
    }

    pub fn from_submission(submission: ClaimSubmission) -> Self {
        Self { submission }
    }

    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.submission.customer_name = name.into();
        self
    }

    pub fn with_policy_number(mut self, number: impl Into<String>) -> Self {
        self.submission.policy_number = number.into();
        self
    }

    /// Sets the claim type by name, e.g. `"motor"`
    pub fn with_claim_type(mut self, claim_type: impl Into<String>) -> Self {
        self.submission.claim_type = claim_type.into();
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.submission.claim_amount = amount;
        self
    }

    pub fn with_policy_start(mut self, date: NaiveDate) -> Self {
        self.submission.policy_start_date = date;
        self
    }

    pub fn with_incident_date(mut self, date: NaiveDate) -> Self {
        self.submission.incident_date = date;
        self
    }

    pub fn with_provider(mut self, provider: Option<&str>) -> Self {
        self.submission.provider_name = provider.map(str::to_string);
        self
    }

    pub fn build(self) -> ClaimSubmission {
        self.submission
    }
}

/// Builds sessions driven through the workflow with a chosen rule subset
pub struct SessionBuilder<'s, 'c> {
    service: &'s RiskAnalysisService<'c>,
    submission: ClaimSubmission,
    only: Option<Vec<String>>,
    excluded: Vec<String>,
}

impl<'s, 'c> SessionBuilder<'s, 'c> {
    pub fn new(service: &'s RiskAnalysisService<'c>, submission: ClaimSubmission) -> Self {
        Self {
            service,
            submission,
            only: None,
            excluded: Vec::new(),
        }
    }

    /// Keeps only the given rules selected
    pub fn only(mut self, rule_ids: &[&str]) -> Self {
        self.only = Some(rule_ids.iter().map(|id| id.to_string()).collect());
        self
    }

    /// Deselects the given rules
    pub fn excluding(mut self, rule_ids: &[&str]) -> Self {
        self.excluded.extend(rule_ids.iter().map(|id| id.to_string()));
        self
    }

    /// A session with the intake filled, still at step 1
    pub fn at_intake(&self) -> Session {
        let mut session = self.service.start_session();
        self.service
            .load_submission(&mut session, &self.submission)
            .expect("submission must load");
        session
    }

    /// A session at step 2 with the requested selection applied
    pub fn at_rule_selection(&self) -> Session {
        let mut session = self.at_intake();
        self.service.advance(&mut session).expect("intake must be complete");

        if let Some(only) = &self.only {
            self.service.clear_rules(&mut session).expect("at rule selection");
            for id in only {
                self.service.toggle_rule(&mut session, id).expect("rule must exist");
            }
        }
        for id in &self.excluded {
            if session.selection().contains(id) {
                self.service.toggle_rule(&mut session, id).expect("rule must exist");
            }
        }
        session
    }

    /// A session at step 3 with a fresh evaluation
    pub fn evaluated(&self) -> Session {
        let mut session = self.at_rule_selection();
        self.service.advance(&mut session).expect("selection must not be empty");
        assert_eq!(session.step(), AnalysisStep::Evaluation);
        session
    }

    /// A session at step 4
    pub fn at_result(&self) -> Session {
        let mut session = self.evaluated();
        self.service.advance(&mut session).expect("evaluation advances unconditionally");
        session
    }
}
