//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! claim risk analysis test suite.
//!
//! # Modules
//!
//! - `fixtures`: Fixed evaluation date, built-in catalog and reference claims
//! - `builders`: Builder patterns for claims and sessions at a given step
//! - `assertions`: Custom assertion helpers for evaluation and scoring results
//! - `generators`: Property-based and fake-data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
