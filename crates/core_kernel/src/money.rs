//! Money types with precise decimal arithmetic
//!
//! Claim amounts are entered as free text and compared against rule
//! thresholds, so they are held as `rust_decimal` values rather than floats
//! and are never rounded on the way in. Formatting follows Indian lakh/crore
//! digit grouping.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    INR,
}

impl Currency {
    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::INR => "₹",
        }
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount must not be negative: {0}")]
    NegativeAmount(String),
}

/// A monetary amount with associated currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value holding `amount` exactly
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Parses a user-entered amount, rejecting negative values
    ///
    /// Surrounding whitespace and thousands separators are ignored, so both
    /// `"185000"` and `"1,85,000"` are accepted. Fractional digits are kept
    /// as entered.
    pub fn parse_non_negative(input: &str, currency: Currency) -> Result<Self, MoneyError> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| *c != ',' && *c != '_')
            .collect();

        let amount = Decimal::from_str(&cleaned)
            .map_err(|_| MoneyError::InvalidAmount(input.trim().to_string()))?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::NegativeAmount(input.trim().to_string()));
        }

        Ok(Self::new(amount, currency))
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Renders the whole-unit amount with lakh/crore grouping, e.g. `₹1,85,000`
    pub fn to_grouped_string(&self) -> String {
        let whole = self.amount.trunc();
        let digits = whole.abs().to_string();
        let sign = if whole.is_sign_negative() && !whole.is_zero() { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), group_indian(&digits))
    }
}

/// Inserts separators into a run of ASCII digits: the last three digits,
/// then pairs (12,34,567)
pub fn group_indian(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(len - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = groups.join(",");
    out.push(',');
    out.push_str(tail);
    out
}
