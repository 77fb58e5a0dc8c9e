//! Built-in sample claims for demos and tests

use once_cell::sync::OnceCell;

use crate::error::RiskError;
use crate::intake::ClaimSubmission;

const SAMPLE_CLAIMS: &str = include_str!("../data/sample_claims.json");

static SAMPLES: OnceCell<Vec<ClaimSubmission>> = OnceCell::new();

/// The ten sample claims, parsed on first use
pub fn sample_claims() -> Result<&'static [ClaimSubmission], RiskError> {
    SAMPLES
        .get_or_try_init(|| {
            serde_json::from_str(SAMPLE_CLAIMS)
                .map_err(|e| RiskError::catalog(format!("Failed to parse sample claims: {}", e)))
        })
        .map(Vec::as_slice)
}
