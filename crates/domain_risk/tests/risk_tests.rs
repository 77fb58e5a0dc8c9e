//! Integration tests for the risk analysis workflow

use domain_risk::*;
use proptest::prelude::*;
use rust_decimal_macros::dec;
use test_utils::*;

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_clean_health_claim_with_core_rules() {
    let service = CatalogFixtures::service();
    let session = SessionBuilder::new(&service, ClaimFixtures::rajesh_health())
        .only(&["HLT-001", "HLT-002", "HLT-003"])
        .evaluated();

    let evaluation = session.evaluation().unwrap();
    assert_eq!(evaluation.total(), 3);
    assert_all_passed(evaluation);

    let outcome = service.compute_risk_outcome(&session).unwrap();
    assert_outcome(&outcome, 0, RiskLevel::Low, Recommendation::Approve);
}

#[test]
fn test_large_health_claim_escalates() {
    let service = CatalogFixtures::service();
    let claim = ClaimSubmissionBuilder::new().with_amount(dec!(600000)).build();
    let session = SessionBuilder::new(&service, claim)
        .only(&["HLT-001", "HLT-002", "HLT-003"])
        .evaluated();

    let evaluation = session.evaluation().unwrap();
    assert_rule_failed(evaluation, "HLT-001");
    assert_rule_passed(evaluation, "HLT-002");

    let outcome = service.compute_risk_outcome(&session).unwrap();
    assert!(outcome.score >= 30);
    assert!(outcome.level >= RiskLevel::Medium);
    assert_eq!(outcome.recommendation, Recommendation::Escalate);
    assert_eq!(outcome.failed_high, vec![RuleId::from("HLT-001")]);
}

#[test]
fn test_full_health_selection_flags_ayush_limit() {
    let service = CatalogFixtures::service();
    let session = SessionBuilder::new(&service, ClaimFixtures::rajesh_health()).evaluated();

    let evaluation = session.evaluation().unwrap();
    assert_eq!(evaluation.total(), 7);
    assert_rule_failed(evaluation, "HLT-005");
    assert_eq!(evaluation.failed_count(), 1);

    let outcome = service.compute_risk_outcome(&session).unwrap();
    assert_outcome(&outcome, 10, RiskLevel::Low, Recommendation::Approve);
}

#[test]
fn test_motor_claim_passes_all_rules() {
    let service = CatalogFixtures::service();
    let session = SessionBuilder::new(&service, ClaimFixtures::priya_motor()).evaluated();

    assert_all_passed(session.evaluation().unwrap());
    let outcome = service.compute_risk_outcome(&session).unwrap();
    assert_outcome(&outcome, 0, RiskLevel::Low, Recommendation::Approve);
}

#[test]
fn test_large_life_claim_is_high_risk() {
    let service = CatalogFixtures::service();
    let session = SessionBuilder::new(&service, ClaimFixtures::amit_life()).evaluated();

    let evaluation = session.evaluation().unwrap();
    assert_rule_passed(evaluation, "LIF-002");
    assert_rule_failed(evaluation, "LIF-004");

    let outcome = service.compute_risk_outcome(&session).unwrap();
    assert_eq!(outcome.counts, SeverityCounts { high: 1, medium: 3, low: 0 });
    assert_outcome(&outcome, 90, RiskLevel::High, Recommendation::Escalate);
    assert_eq!(outcome.critical_failures(), 1);
}

// ============================================================================
// Rule boundaries
// ============================================================================

#[test]
fn test_waiting_period_boundary_for_health_and_motor() {
    let service = CatalogFixtures::service();

    for (claim_type, rule_id) in [("health", "HLT-002"), ("motor", "MOT-002")] {
        let young = ClaimSubmissionBuilder::new()
            .with_claim_type(claim_type)
            .with_policy_start(TimeFixtures::days_before(29))
            .build();
        let session = SessionBuilder::new(&service, young).only(&[rule_id]).evaluated();
        assert_rule_failed(session.evaluation().unwrap(), rule_id);

        let settled = ClaimSubmissionBuilder::new()
            .with_claim_type(claim_type)
            .with_policy_start(TimeFixtures::days_before(30))
            .build();
        let session = SessionBuilder::new(&service, settled).only(&[rule_id]).evaluated();
        assert_rule_passed(session.evaluation().unwrap(), rule_id);
    }
}

#[test]
fn test_amount_exactly_at_limit_passes() {
    let service = CatalogFixtures::service();
    let claim = ClaimSubmissionBuilder::new().with_amount(dec!(500000)).build();
    let session = SessionBuilder::new(&service, claim).only(&["HLT-001"]).evaluated();

    assert_rule_passed(session.evaluation().unwrap(), "HLT-001");
}

#[test]
fn test_amount_fraction_above_limit_fails() {
    let service = CatalogFixtures::service();
    let claim = ClaimSubmissionBuilder::new().with_amount(dec!(500000.00001)).build();
    let session = SessionBuilder::new(&service, claim).only(&["HLT-001"]).evaluated();

    let stored = session.intake().claim_amount.unwrap();
    assert_eq!(stored.amount(), dec!(500000.00001));
    assert_rule_failed(session.evaluation().unwrap(), "HLT-001");
}

#[test]
fn test_typed_amount_keeps_fraction() {
    let service = CatalogFixtures::service();
    let mut session = SessionBuilder::new(&service, ClaimFixtures::rajesh_health()).at_intake();
    service
        .set_claim_field(&mut session, ClaimField::ClaimAmount, "5,00,000.00001")
        .unwrap();
    service.advance(&mut session).unwrap();
    service.clear_rules(&mut session).unwrap();
    service.toggle_rule(&mut session, "HLT-001").unwrap();
    service.advance(&mut session).unwrap();

    assert_rule_failed(session.evaluation().unwrap(), "HLT-001");
}

// ============================================================================
// Workflow gates
// ============================================================================

#[test]
fn test_advance_blocked_until_intake_complete() {
    let service = CatalogFixtures::service();
    let mut session = service.start_session();
    service
        .set_claim_field(&mut session, ClaimField::CustomerName, "Neha Verma")
        .unwrap();
    service
        .set_claim_field(&mut session, ClaimField::ClaimType, "life")
        .unwrap();

    let err = service.advance(&mut session).unwrap_err();
    assert_missing_fields(
        &err,
        &[
            ClaimField::PolicyNumber,
            ClaimField::ClaimAmount,
            ClaimField::PolicyStartDate,
            ClaimField::IncidentDate,
        ],
    );
    assert!(err.is_blocked_transition());
    assert_eq!(session.step(), AnalysisStep::Intake);
}

#[test]
fn test_rejected_field_edits_leave_session_unchanged() {
    let service = CatalogFixtures::service();
    let mut session = SessionBuilder::new(&service, ClaimFixtures::rajesh_health()).at_intake();
    let before = session.clone();
    assert_eq!(before.selection().len(), 7);

    let err = service
        .set_claim_field(&mut session, ClaimField::ClaimType, "travel")
        .unwrap_err();
    assert!(matches!(err, RiskError::UnknownCategory(ref name) if name == "travel"));
    assert_eq!(session, before);

    let err = service
        .set_claim_field(&mut session, ClaimField::ClaimAmount, "-5")
        .unwrap_err();
    assert!(matches!(
        err,
        RiskError::InvalidFieldValue { field: ClaimField::ClaimAmount, .. }
    ));
    assert_eq!(session, before);

    let err = service
        .set_claim_field(&mut session, ClaimField::IncidentDate, "31/07/2025")
        .unwrap_err();
    assert!(matches!(
        err,
        RiskError::InvalidFieldValue { field: ClaimField::IncidentDate, .. }
    ));
    assert_eq!(session, before);
}

#[test]
fn test_loading_claim_without_provider_clears_previous_provider() {
    let service = CatalogFixtures::service();
    let mut session = SessionBuilder::new(&service, ClaimFixtures::rajesh_health()).at_intake();
    assert!(session.intake().provider_name.is_some());

    let next = ClaimSubmissionBuilder::new()
        .with_customer_name("Sunita Iyer")
        .with_provider(None)
        .build();
    service.load_submission(&mut session, &next).unwrap();
    assert_eq!(session.intake().provider_name, None);

    service.advance(&mut session).unwrap();
    service.advance(&mut session).unwrap();
    service.advance(&mut session).unwrap();
    let report = service.render_report(&session).unwrap();
    assert!(report.contains("- Name: Sunita Iyer"));
    assert!(report.contains("- Hospital/Garage: N/A"));
}

#[test]
fn test_provider_is_optional() {
    let service = CatalogFixtures::service();
    let claim = ClaimSubmissionBuilder::new().with_provider(None).build();
    let mut session = SessionBuilder::new(&service, claim).at_intake();

    assert_eq!(service.advance(&mut session).unwrap(), AnalysisStep::RuleSelection);
}

#[test]
fn test_empty_selection_blocks_evaluation() {
    let service = CatalogFixtures::service();
    let mut session = SessionBuilder::new(&service, ClaimFixtures::rajesh_health()).at_rule_selection();
    service.clear_rules(&mut session).unwrap();

    let err = service.advance(&mut session).unwrap_err();
    assert!(matches!(err, RiskError::EmptySelection));
    assert_eq!(session.step(), AnalysisStep::RuleSelection);
    assert!(session.evaluation().is_none());
}

#[test]
fn test_toggle_foreign_rule_leaves_selection_unchanged() {
    let service = CatalogFixtures::service();
    let mut session = SessionBuilder::new(&service, ClaimFixtures::rajesh_health()).at_rule_selection();
    let before = session.selection().clone();

    let err = service.toggle_rule(&mut session, "MOT-001").unwrap_err();
    assert!(matches!(err, RiskError::InvalidRuleId { .. }));
    assert_eq!(session.selection(), &before);
}

#[test]
fn test_backward_navigation_preserves_data() {
    let service = CatalogFixtures::service();
    let mut session = SessionBuilder::new(&service, ClaimFixtures::priya_motor())
        .excluding(&["MOT-007"])
        .at_result();
    let intake = session.intake().clone();
    let selection = session.selection().clone();

    assert_eq!(service.go_to(&mut session, AnalysisStep::Intake).unwrap(), AnalysisStep::Intake);
    assert_eq!(session.intake(), &intake);
    assert_eq!(session.selection(), &selection);
    assert!(session.evaluation().is_some());

    assert_eq!(service.retreat(&mut session).unwrap(), AnalysisStep::Intake);
}

#[test]
fn test_changing_claim_type_reseeds_selection() {
    let service = CatalogFixtures::service();
    let mut session = SessionBuilder::new(&service, ClaimFixtures::rajesh_health())
        .only(&["HLT-001"])
        .evaluated();

    service.go_to(&mut session, AnalysisStep::Intake).unwrap();
    service
        .set_claim_field(&mut session, ClaimField::ClaimType, "motor")
        .unwrap();

    assert!(session.evaluation().is_none());
    assert_eq!(session.selection().category(), Some(ClaimCategory::Motor));
    assert_eq!(session.selection().len(), 7);
}

#[test]
fn test_reset_then_default_selection_is_full() {
    let service = CatalogFixtures::service();
    let mut session = SessionBuilder::new(&service, ClaimFixtures::rajesh_health())
        .excluding(&["HLT-004", "HLT-006"])
        .evaluated();

    service.reset(&mut session);
    assert_eq!(session.step(), AnalysisStep::Intake);
    assert_eq!(session.intake(), &ClaimIntake::default());
    assert!(session.selection().is_empty());
    assert!(session.evaluation().is_none());

    service
        .set_claim_field(&mut session, ClaimField::ClaimType, "health")
        .unwrap();
    let expected = RuleSelection::default_selection(service.catalog(), ClaimCategory::Health);
    assert_eq!(session.selection(), &expected);
}

#[test]
fn test_outcome_requires_evaluation() {
    let service = CatalogFixtures::service();
    let session = SessionBuilder::new(&service, ClaimFixtures::rajesh_health()).at_rule_selection();

    assert!(matches!(service.compute_risk_outcome(&session), Err(RiskError::NotEvaluated)));
    assert!(matches!(service.render_report(&session), Err(RiskError::NotEvaluated)));
}

#[test]
fn test_compute_risk_outcome_is_idempotent() {
    let service = CatalogFixtures::service();
    let session = SessionBuilder::new(&service, ClaimFixtures::amit_life()).at_result();

    let first = service.compute_risk_outcome(&session).unwrap();
    let second = service.compute_risk_outcome(&session).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_stricter_medium_policy_recommends_review() {
    let service = CatalogFixtures::service().with_scoring_policy(ScoringPolicy {
        medium_recommendation: Recommendation::Review,
        ..ScoringPolicy::default()
    });
    let claim = ClaimSubmissionBuilder::new().with_amount(dec!(320000)).build();
    let session = SessionBuilder::new(&service, claim)
        .only(&["HLT-003", "HLT-005"])
        .evaluated();

    let outcome = service.compute_risk_outcome(&session).unwrap();
    assert_outcome(&outcome, 30, RiskLevel::Medium, Recommendation::Review);
}

// ============================================================================
// Report
// ============================================================================

#[test]
fn test_report_layout() {
    let service = CatalogFixtures::service();
    let session = SessionBuilder::new(&service, ClaimFixtures::rajesh_health())
        .only(&["HLT-001", "HLT-002", "HLT-003"])
        .at_result();

    let expected = "\
RISK ANALYSIS REPORT
====================

Customer Information:
- Name: Rajesh Kumar Sharma
- Policy Number: GSS-2025-123456
- Claim Type: Health Insurance
- Claim Amount: ₹1,85,000
- Policy Start Date: 2023-05-15
- Incident Date: 2025-08-01
- Hospital/Garage: Apollo Hospital, Delhi

Risk Analysis Results:
- Risk Score: 0
- Risk Level: Low
- Recommendation: Approve

Rule Evaluation Summary:
- Total Rules Evaluated: 3
- Passed: 3
- Failed: 0
- Critical Failures: 0

Detailed Rule Results:
- HLT-001 (Claims above ₹5,00,000 require pre-authorization from network hospitals as per IRDAI guidelines): PASSED - Within acceptable limit
- HLT-002 (Waiting period of 30 days for illnesses and 48 months for pre-existing diseases (PED)): PASSED - Waiting period satisfied
- HLT-003 (Room rent capped at 1% of sum insured or ₹5,000 per day, whichever is lower): PASSED - Room rent within limits

Report Generated: 01/08/2025, 00:00:00";

    assert_eq!(service.render_report(&session).unwrap(), expected);
}

#[test]
fn test_report_without_provider_and_with_failures() {
    let service = CatalogFixtures::service();
    let claim = ClaimSubmissionBuilder::new()
        .with_amount(dec!(600000))
        .with_provider(None)
        .build();
    let session = SessionBuilder::new(&service, claim)
        .only(&["HLT-001", "HLT-003"])
        .at_result();

    let report = service.render_report(&session).unwrap();
    assert!(report.contains("- Hospital/Garage: N/A"));
    assert!(report.contains("- Claim Amount: ₹6,00,000"));
    assert!(report.contains("- Recommendation: Escalate for Review"));
    assert!(report.contains("- Critical Failures: 1"));
    assert!(report.contains(": FAILED - Claim amount exceeds ₹5,00,000 limit"));
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #[test]
    fn test_generated_claims_score_within_bounds(claim in submission_strategy()) {
        let service = CatalogFixtures::service();
        let session = SessionBuilder::new(&service, claim).evaluated();

        let outcome = service.compute_risk_outcome(&session).unwrap();
        prop_assert!(outcome.score <= 100);
        prop_assert_eq!(outcome.counts.total() as usize, session.evaluation().unwrap().failed_count());
        if outcome.counts.high > 0 {
            prop_assert_eq!(outcome.recommendation, Recommendation::Escalate);
        }
    }

    #[test]
    fn test_evaluation_is_deterministic(claim in submission_strategy()) {
        let service = CatalogFixtures::service();
        let builder = SessionBuilder::new(&service, claim);
        let a = builder.evaluated();
        let b = builder.evaluated();

        prop_assert_eq!(&a.evaluation().unwrap().outcomes, &b.evaluation().unwrap().outcomes);
        prop_assert_eq!(
            service.render_report(&a).unwrap(),
            service.render_report(&b).unwrap()
        );
    }
}

#[test]
fn test_fake_customer_details_are_accepted() {
    let service = CatalogFixtures::service();
    let claim = ClaimSubmissionBuilder::new()
        .with_customer_name(fake_customer_name())
        .with_policy_number(fake_policy_number())
        .build();

    let mut session = SessionBuilder::new(&service, claim).at_intake();
    assert!(service.advance(&mut session).is_ok());
}
