//! Claim Risk Analysis Domain
//!
//! This crate scores insurance claims against a catalog of underwriting
//! rules and guides each claim through a four-step analysis workflow.
//!
//! # Analysis Workflow
//!
//! ```text
//! Intake -> Rule Selection -> Evaluation -> Result
//! ```
//!
//! 1. Claim details are entered into a [`ClaimIntake`].
//! 2. The rules of the claim's category are selected (all by default).
//! 3. Each selected rule's violation condition is checked against facts
//!    derived from the claim: the amount and the days elapsed since policy
//!    start and since the incident.
//! 4. Failed rules are scored by severity into a [`RiskOutcome`] with a risk
//!    level and a recommendation, and a plain-text report can be rendered.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_risk::{ClaimField, RiskAnalysisService, RuleCatalog};
//!
//! let service = RiskAnalysisService::new(RuleCatalog::builtin()?);
//! let mut session = service.start_session();
//! service.set_claim_field(&mut session, ClaimField::ClaimType, "health")?;
//! // ... remaining fields ...
//! service.advance(&mut session)?; // rule selection
//! service.advance(&mut session)?; // evaluation
//! let outcome = service.compute_risk_outcome(&session)?;
//! ```

pub mod category;
pub mod rule;
pub mod catalog;
pub mod query;
pub mod intake;
pub mod selection;
pub mod evaluator;
pub mod scoring;
pub mod session;
pub mod service;
pub mod report;
pub mod samples;
pub mod error;

pub use category::ClaimCategory;
pub use rule::{Comparator, Condition, Predicate, RuleDefinition, RuleId, Severity, Variable};
pub use catalog::RuleCatalog;
pub use query::{CatalogSummary, RuleQuery};
pub use intake::{ClaimField, ClaimIntake, ClaimSubmission};
pub use selection::RuleSelection;
pub use evaluator::{ClaimFacts, EvaluationResult, RuleEvaluator, RuleOutcome};
pub use scoring::{Recommendation, RiskLevel, RiskOutcome, RiskScorer, ScoringPolicy, SeverityCounts};
pub use session::{AnalysisStep, Session};
pub use service::RiskAnalysisService;
pub use samples::sample_claims;
pub use error::RiskError;
