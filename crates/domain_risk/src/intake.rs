//! Claim intake form data

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{parse_date, Currency, Money};
use crate::category::ClaimCategory;
use crate::error::RiskError;

/// Fields of the intake form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimField {
    CustomerName,
    PolicyNumber,
    ClaimType,
    ClaimAmount,
    PolicyStartDate,
    IncidentDate,
    ProviderName,
}

impl ClaimField {
    /// Fields that must be filled before rule selection
    pub const REQUIRED: [ClaimField; 6] = [
        ClaimField::CustomerName,
        ClaimField::PolicyNumber,
        ClaimField::ClaimType,
        ClaimField::ClaimAmount,
        ClaimField::PolicyStartDate,
        ClaimField::IncidentDate,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ClaimField::CustomerName => "customer_name",
            ClaimField::PolicyNumber => "policy_number",
            ClaimField::ClaimType => "claim_type",
            ClaimField::ClaimAmount => "claim_amount",
            ClaimField::PolicyStartDate => "policy_start_date",
            ClaimField::IncidentDate => "incident_date",
            ClaimField::ProviderName => "provider_name",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClaimField::CustomerName => "Customer Name",
            ClaimField::PolicyNumber => "Policy Number",
            ClaimField::ClaimType => "Claim Type",
            ClaimField::ClaimAmount => "Claim Amount",
            ClaimField::PolicyStartDate => "Policy Start Date",
            ClaimField::IncidentDate => "Incident Date",
            ClaimField::ProviderName => "Hospital/Garage Name",
        }
    }
}

impl fmt::Display for ClaimField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClaimField {
    type Err = RiskError;

    /// Accepts snake_case keys and the camelCase names used by form front ends
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "customername" => Ok(ClaimField::CustomerName),
            "policynumber" => Ok(ClaimField::PolicyNumber),
            "claimtype" => Ok(ClaimField::ClaimType),
            "claimamount" => Ok(ClaimField::ClaimAmount),
            "policystartdate" => Ok(ClaimField::PolicyStartDate),
            "incidentdate" => Ok(ClaimField::IncidentDate),
            "providername" | "hospitalgaragename" => Ok(ClaimField::ProviderName),
            _ => Err(RiskError::UnknownField(s.trim().to_string())),
        }
    }
}

/// In-progress claim details for one analysis session
///
/// Every field starts empty. Values arrive as raw text and are parsed on
/// entry; a blank value clears the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimIntake {
    pub customer_name: Option<String>,
    pub policy_number: Option<String>,
    pub claim_type: Option<ClaimCategory>,
    pub claim_amount: Option<Money>,
    pub policy_start_date: Option<NaiveDate>,
    pub incident_date: Option<NaiveDate>,
    pub provider_name: Option<String>,
}

impl ClaimIntake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `value` and stores it in `field`
    ///
    /// # Errors
    ///
    /// * `UnknownCategory` for a claim type outside health/motor/life
    /// * `InvalidFieldValue` for an unparseable or negative amount or a bad date
    ///
    /// On error the intake is left untouched.
    pub fn set_field(&mut self, field: ClaimField, value: &str) -> Result<(), RiskError> {
        let trimmed = value.trim();
        let text = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };

        match field {
            ClaimField::CustomerName => self.customer_name = text,
            ClaimField::PolicyNumber => self.policy_number = text,
            ClaimField::ProviderName => self.provider_name = text,
            ClaimField::ClaimType => {
                self.claim_type = text.as_deref().map(ClaimCategory::from_str).transpose()?;
            }
            ClaimField::ClaimAmount => {
                self.claim_amount = text
                    .as_deref()
                    .map(|t| Money::parse_non_negative(t, Currency::INR))
                    .transpose()
                    .map_err(|e| RiskError::InvalidFieldValue {
                        field,
                        reason: e.to_string(),
                    })?;
            }
            ClaimField::PolicyStartDate | ClaimField::IncidentDate => {
                let date = text
                    .as_deref()
                    .map(parse_date)
                    .transpose()
                    .map_err(|e| RiskError::InvalidFieldValue {
                        field,
                        reason: e.to_string(),
                    })?;
                if field == ClaimField::PolicyStartDate {
                    self.policy_start_date = date;
                } else {
                    self.incident_date = date;
                }
            }
        }
        Ok(())
    }

    /// Returns true if the field holds a value
    pub fn is_set(&self, field: ClaimField) -> bool {
        match field {
            ClaimField::CustomerName => self.customer_name.is_some(),
            ClaimField::PolicyNumber => self.policy_number.is_some(),
            ClaimField::ClaimType => self.claim_type.is_some(),
            ClaimField::ClaimAmount => self.claim_amount.is_some(),
            ClaimField::PolicyStartDate => self.policy_start_date.is_some(),
            ClaimField::IncidentDate => self.incident_date.is_some(),
            ClaimField::ProviderName => self.provider_name.is_some(),
        }
    }

    /// Required fields that are still empty, in form order
    pub fn missing_fields(&self) -> Vec<ClaimField> {
        ClaimField::REQUIRED
            .into_iter()
            .filter(|f| !self.is_set(*f))
            .collect()
    }

    /// Checks that every required field is filled
    pub fn validate(&self) -> Result<(), RiskError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(RiskError::Validation { missing })
        }
    }
}

/// A complete claim as supplied in a file or by the sample set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    #[serde(alias = "customerName")]
    pub customer_name: String,
    #[serde(alias = "policyNumber")]
    pub policy_number: String,
    #[serde(alias = "claimType")]
    pub claim_type: String,
    #[serde(alias = "claimAmount")]
    pub claim_amount: Decimal,
    #[serde(alias = "policyStartDate")]
    pub policy_start_date: NaiveDate,
    #[serde(alias = "incidentDate")]
    pub incident_date: NaiveDate,
    #[serde(default, alias = "providerName", alias = "hospitalGarageName")]
    pub provider_name: Option<String>,
}

impl ClaimSubmission {
    /// Field values as they would be typed into the intake form
    pub fn field_values(&self) -> Vec<(ClaimField, String)> {
        vec![
            (ClaimField::CustomerName, self.customer_name.clone()),
            (ClaimField::PolicyNumber, self.policy_number.clone()),
            (ClaimField::ClaimType, self.claim_type.clone()),
            (ClaimField::ClaimAmount, self.claim_amount.to_string()),
            (ClaimField::PolicyStartDate, self.policy_start_date.to_string()),
            (ClaimField::IncidentDate, self.incident_date.to_string()),
            // blank clears any provider left from an earlier claim
            (
                ClaimField::ProviderName,
                self.provider_name.clone().unwrap_or_default(),
            ),
        ]
    }
}
