//! Project financial aggregation engine.
//!
//! # Responsibility
//! - Derive per-project cost/profit figures from a portfolio snapshot.
//! - Derive portfolio totals and the contractor earnings ranking.
//!
//! # Invariants
//! - Every function is pure: inputs are borrowed immutably, outputs are new values.
//! - Unresolved contractor references contribute zero; nothing here fails.
//! - Assignment cost is always `contractor.rate * hours`.
//! - Project income is the project budget; income receipts are reported separately.

pub mod costs;
pub mod portfolio;
pub mod ratio;
