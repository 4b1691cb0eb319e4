//! Portfolio domain model for projects, contractors and ledgers.
//!
//! # Responsibility
//! - Define canonical data structures read by the aggregation engine.
//! - Keep one schema for assignments: hours only, cost derived from rate.
//!
//! # Invariants
//! - Project and contractor ids are unique within their collections.
//! - Monetary amounts, rates and hours are non-negative decimals.
//! - Assignments may reference contractors that no longer exist.

pub mod contractor;
pub mod project;
pub mod snapshot;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised while parsing model values from external input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Status string is not one of `active|completed|paused`.
    UnknownStatus(String),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStatus(value) => write!(
                f,
                "unknown project status `{value}`; expected active|completed|paused"
            ),
        }
    }
}

impl Error for ModelError {}

/// Generates a fresh stable id for new entities and ledger entries.
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
