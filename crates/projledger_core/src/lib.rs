//! Core domain logic for project portfolio accounting.
//! This crate owns the financial aggregation rules; view layers only render them.

pub mod analytics;
pub mod engine;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod store;
pub mod view;

pub use analytics::ledger::{expense_ledger, income_ledger, ExpenseLine, IncomeLine};
pub use analytics::summary::{
    contractor_summaries, cost_structure, earnings_share_of_costs, status_counts,
    ContractorSummary, CostStructure, EarningsShare, StatusCounts,
};
pub use engine::costs::{compute_project_costs, ProjectCosts};
pub use engine::portfolio::{
    compute_portfolio_stats, contractor_earnings, rank_contractor_earnings, ContractorEarnings,
    PortfolioStats,
};
pub use engine::ratio::{percentage, round_one_decimal, saturating_sum};
pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LoggingConfig,
    LoggingError,
};
pub use model::contractor::{Contractor, ContractorId, DEFAULT_CONTRACTOR_ROLE};
pub use model::project::{
    Assignment, EntryId, Expense, Income, Project, ProjectId, ProjectStatus,
};
pub use model::snapshot::PortfolioSnapshot;
pub use model::ModelError;
pub use reconcile::{
    reconcile_legacy_snapshot, LegacyAssignment, LegacyProject, LegacySnapshot,
    ReconcileFinding, ReconcileReport, UnrepresentableReason,
};
pub use store::command::{CommandOutcome, LedgerCommand};
pub use store::memory::{LedgerStore, StoreObserver};
pub use store::{StoreError, StoreResult};
pub use view::reducer::{reduce, Reduction, ViewAction, ViewNotice};
pub use view::state::{
    AssignmentDraft, ContractorDraft, DashboardState, Dialog, ExpenseDraft, IncomeDraft,
    NewProjectDraft, ProjectDraft, ProjectEditor, Tab,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
