//! Claim categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RiskError;

/// Line of business a claim belongs to; selects the applicable rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimCategory {
    Health,
    Motor,
    Life,
}

impl ClaimCategory {
    pub const ALL: [ClaimCategory; 3] = [ClaimCategory::Health, ClaimCategory::Motor, ClaimCategory::Life];

    /// Lowercase key used in catalogs and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimCategory::Health => "health",
            ClaimCategory::Motor => "motor",
            ClaimCategory::Life => "life",
        }
    }

    /// Name shown in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            ClaimCategory::Health => "Health Insurance",
            ClaimCategory::Motor => "Motor Insurance",
            ClaimCategory::Life => "Life Insurance",
        }
    }

    /// Prefix every rule id of this category carries, e.g. `HLT` in `HLT-001`
    pub fn rule_prefix(&self) -> &'static str {
        match self {
            ClaimCategory::Health => "HLT",
            ClaimCategory::Motor => "MOT",
            ClaimCategory::Life => "LIF",
        }
    }
}

impl fmt::Display for ClaimCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimCategory {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "health" => Ok(ClaimCategory::Health),
            "motor" => Ok(ClaimCategory::Motor),
            "life" => Ok(ClaimCategory::Life),
            _ => Err(RiskError::UnknownCategory(s.trim().to_string())),
        }
    }
}
