//! Pre-built Test Fixtures
//!
//! Ready-to-use data for risk analysis tests. All evaluation happens as of a
//! single fixed date so elapsed-day rules give predictable results.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{temporal::start_of_day, FixedClock};
use domain_risk::{ClaimSubmission, RiskAnalysisService, RuleCatalog};
use rust_decimal_macros::dec;

/// Fixture for evaluation time
pub struct TimeFixtures;

impl TimeFixtures {
    /// Date every test evaluates as of (Aug 1, 2025)
    pub fn as_of_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
    }

    /// Midnight UTC on the evaluation date
    pub fn as_of() -> DateTime<Utc> {
        start_of_day(Self::as_of_date())
    }

    /// Clock frozen at the evaluation date
    pub fn clock() -> FixedClock {
        FixedClock::on(Self::as_of_date())
    }

    /// Date `days` before the evaluation date
    pub fn days_before(days: i64) -> NaiveDate {
        Self::as_of_date() - chrono::Duration::days(days)
    }
}

/// Fixture for the built-in rule catalog and a service over it
pub struct CatalogFixtures;

impl CatalogFixtures {
    pub fn builtin() -> &'static RuleCatalog {
        RuleCatalog::builtin().expect("built-in catalog must load")
    }

    /// Service over the built-in catalog, evaluating as of [`TimeFixtures::as_of`]
    pub fn service() -> RiskAnalysisService<'static> {
        RiskAnalysisService::new(Self::builtin()).with_clock(TimeFixtures::clock())
    }
}

/// Fixture for reference claims
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Long-standing health policy, moderate hospital claim
    pub fn rajesh_health() -> ClaimSubmission {
        ClaimSubmission {
            customer_name: "Rajesh Kumar Sharma".to_string(),
            policy_number: "GSS-2025-123456".to_string(),
            claim_type: "health".to_string(),
            claim_amount: dec!(185000),
            policy_start_date: NaiveDate::from_ymd_opt(2023, 5, 15).unwrap(),
            incident_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            provider_name: Some("Apollo Hospital, Delhi".to_string()),
        }
    }

    /// Motor own-damage claim reported a few days after the accident
    pub fn priya_motor() -> ClaimSubmission {
        ClaimSubmission {
            customer_name: "Priya Singh Chauhan".to_string(),
            policy_number: "GSS-2024-987654".to_string(),
            claim_type: "motor".to_string(),
            claim_amount: dec!(45000),
            policy_start_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            incident_date: NaiveDate::from_ymd_opt(2025, 7, 28).unwrap(),
            provider_name: Some("Maruti Service Center, Mumbai".to_string()),
        }
    }

    /// Large life claim on an old policy
    pub fn amit_life() -> ClaimSubmission {
        ClaimSubmission {
            customer_name: "Amit Patel".to_string(),
            policy_number: "GSS-2023-456789".to_string(),
            claim_type: "life".to_string(),
            claim_amount: dec!(2500000),
            policy_start_date: NaiveDate::from_ymd_opt(2020, 12, 5).unwrap(),
            incident_date: NaiveDate::from_ymd_opt(2025, 7, 30).unwrap(),
            provider_name: Some("LIC Branch Office, Ahmedabad".to_string()),
        }
    }
}
