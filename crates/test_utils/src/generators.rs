//! Property-Based Test Generators
//!
//! Provides proptest strategies for claims that stay within what the intake
//! form accepts, plus `fake`-backed names for readable test data.

use chrono::NaiveDate;
use domain_risk::{ClaimCategory, ClaimSubmission};
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::fixtures::TimeFixtures;

/// Strategy for claim categories
pub fn category_strategy() -> impl Strategy<Value = ClaimCategory> {
    prop_oneof![
        Just(ClaimCategory::Health),
        Just(ClaimCategory::Motor),
        Just(ClaimCategory::Life),
    ]
}

/// Strategy for whole-rupee claim amounts up to fifty lakhs
pub fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=5_000_000i64).prop_map(Decimal::from)
}

/// Strategy for dates up to `max_days` before the evaluation date
pub fn date_before_strategy(max_days: i64) -> impl Strategy<Value = NaiveDate> {
    (0..=max_days).prop_map(TimeFixtures::days_before)
}

/// Strategy for complete claim submissions
pub fn submission_strategy() -> impl Strategy<Value = ClaimSubmission> {
    (
        category_strategy(),
        amount_strategy(),
        date_before_strategy(3650),
        0i64..60,
        100_000u32..999_999u32,
    )
        .prop_map(|(category, amount, policy_start, incident_lag, serial)| ClaimSubmission {
            customer_name: "Generated Customer".to_string(),
            policy_number: format!("GSS-2025-{}", serial),
            claim_type: category.as_str().to_string(),
            claim_amount: amount,
            policy_start_date: policy_start,
            incident_date: TimeFixtures::days_before(incident_lag),
            provider_name: None,
        })
}

/// Random customer name
pub fn fake_customer_name() -> String {
    Name().fake()
}

/// Random policy number in the `GSS-YYYY-NNNNNN` layout
pub fn fake_policy_number() -> String {
    let year: u32 = (2018..2026).fake();
    let serial: u32 = (100_000..999_999).fake();
    format!("GSS-{}-{}", year, serial)
}
