//! Dashboard analytics derived from the aggregation engine.
//!
//! # Responsibility
//! - Provide the per-contractor, per-status and cost-structure views.
//! - Flatten project ledgers for finance listings.
//!
//! # Invariants
//! - Pure functions over a borrowed snapshot; nothing is cached.
//! - Every ratio goes through `engine::ratio::percentage` (zero-guarded).

pub mod ledger;
pub mod summary;
