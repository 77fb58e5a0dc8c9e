//! Core Kernel - Foundational types for the claim risk analysis engine
//!
//! This crate provides the building blocks shared by the risk domain and its
//! front ends:
//! - Money types with precise decimal arithmetic and lakh/crore grouping
//! - Evaluation time (clocks and elapsed-day arithmetic)
//! - Strongly-typed identifiers

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{Clock, SystemClock, FixedClock, TemporalError, days_since, parse_date};
pub use identifiers::{SessionId, EvaluationId};
pub use error::CoreError;
