//! Evaluation time
//!
//! Rule conditions look at how many days have elapsed since the policy
//! started and since the incident happened. Both are measured against an
//! evaluation instant supplied by a [`Clock`], so evaluation stays
//! reproducible under test and when a fixed "as of" date is configured.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Returns the current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    /// Creates a clock frozen at midnight UTC on the given date
    pub fn on(date: NaiveDate) -> Self {
        Self {
            at: start_of_day(date),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}

/// Midnight UTC at the start of `date`
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Whole days elapsed from `date` to `at`, rounded up
///
/// Any partial day counts as a full day. The result is negative when `date`
/// lies after `at`.
pub fn days_since(date: NaiveDate, at: DateTime<Utc>) -> i64 {
    let elapsed = (at - start_of_day(date)).num_milliseconds();
    // ceil(elapsed / MILLIS_PER_DAY) for a positive divisor
    -((-elapsed).div_euclid(MILLIS_PER_DAY))
}

/// Parses an ISO calendar date (`YYYY-MM-DD`), ignoring surrounding whitespace
pub fn parse_date(input: &str) -> Result<NaiveDate, TemporalError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| TemporalError::InvalidDate(trimmed.to_string()))
}
