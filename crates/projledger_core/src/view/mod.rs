//! Serializable dashboard view state and its reducer.
//!
//! # Responsibility
//! - Hold tab, dialog and form-draft state as plain data.
//! - Turn submitted drafts into `LedgerCommand` values for the store.
//!
//! # Invariants
//! - `reduce` is pure: it never reads a clock or touches the store.
//! - A submitted draft is reset only when it produced a command.

pub mod reducer;
pub mod state;
