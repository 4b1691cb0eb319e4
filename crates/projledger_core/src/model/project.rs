//! Project domain model and its ledgers.
//!
//! # Responsibility
//! - Define projects with their assignments, expenses and income receipts.
//! - Provide stable wire strings for project status.
//!
//! # Invariants
//! - `budget` is the contractual income profit is computed against.
//! - `incomes` are dated receipts against the budget, not a second income source.
//! - Status transitions are unconstrained; any status may follow any other.

use super::contractor::ContractorId;
use super::ModelError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stable project identifier.
pub type ProjectId = String;

/// Stable identifier for expense and income entries.
pub type EntryId = String;

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    Completed,
    Paused,
}

/// Wire string value for active projects.
pub const PROJECT_STATUS_ACTIVE: &str = "active";
/// Wire string value for completed projects.
pub const PROJECT_STATUS_COMPLETED: &str = "completed";
/// Wire string value for paused projects.
pub const PROJECT_STATUS_PAUSED: &str = "paused";

impl ProjectStatus {
    /// Stable string id used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => PROJECT_STATUS_ACTIVE,
            Self::Completed => PROJECT_STATUS_COMPLETED,
            Self::Paused => PROJECT_STATUS_PAUSED,
        }
    }

    /// Parses a status string, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        match value.trim().to_ascii_lowercase().as_str() {
            PROJECT_STATUS_ACTIVE => Ok(Self::Active),
            PROJECT_STATUS_COMPLETED => Ok(Self::Completed),
            PROJECT_STATUS_PAUSED => Ok(Self::Paused),
            other => Err(ModelError::UnknownStatus(other.to_string())),
        }
    }
}

/// Link between a project and a contractor.
///
/// Cost is never stored here; it is `contractor.rate * hours`, resolved when
/// aggregates are computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub contractor_id: ContractorId,
    pub hours: Decimal,
}

impl Assignment {
    pub fn new(contractor_id: impl Into<ContractorId>, hours: Decimal) -> Self {
        Self {
            contractor_id: contractor_id.into(),
            hours,
        }
    }
}

/// One project expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: EntryId,
    pub description: String,
    pub amount: Decimal,
    /// Free text, e.g. "Infrastructure".
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    /// Creates an expense entry with a generated id.
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: super::generate_id(),
            description: description.into(),
            amount,
            category: category.into(),
            date,
        }
    }
}

/// One income receipt (e.g. an advance payment) against the project budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub id: EntryId,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl Income {
    /// Creates an income entry with a generated id.
    pub fn new(description: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id: super::generate_id(),
            description: description.into(),
            amount,
            date,
        }
    }
}

/// Tracked software-development project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub client: String,
    pub budget: Decimal,
    pub status: ProjectStatus,
    /// Ordered; one contractor may appear more than once.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    pub created_at: NaiveDate,
}

impl Project {
    /// Creates an active project with empty ledgers and a generated id.
    pub fn new(
        name: impl Into<String>,
        client: impl Into<String>,
        budget: Decimal,
        created_at: NaiveDate,
    ) -> Self {
        Self::with_id(super::generate_id(), name, client, budget, created_at)
    }

    /// Creates an active project with a caller-provided id.
    ///
    /// Used by import paths and fixtures where identity already exists.
    pub fn with_id(
        id: impl Into<ProjectId>,
        name: impl Into<String>,
        client: impl Into<String>,
        budget: Decimal,
        created_at: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            client: client.into(),
            budget,
            status: ProjectStatus::Active,
            assignments: Vec::new(),
            expenses: Vec::new(),
            incomes: Vec::new(),
            created_at,
        }
    }

    /// Whether any assignment on this project references `contractor_id`.
    pub fn involves(&self, contractor_id: &str) -> bool {
        self.assignments
            .iter()
            .any(|assignment| assignment.contractor_id == contractor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::{ProjectStatus, PROJECT_STATUS_PAUSED};
    use crate::model::ModelError;

    #[test]
    fn status_parse_is_case_and_whitespace_insensitive() {
        assert_eq!(
            ProjectStatus::parse(" Completed ").expect("status should parse"),
            ProjectStatus::Completed
        );
        assert_eq!(ProjectStatus::Paused.as_str(), PROJECT_STATUS_PAUSED);
    }

    #[test]
    fn status_parse_rejects_unknown_values() {
        let err = ProjectStatus::parse("archived").expect_err("unknown status must fail");
        assert_eq!(err, ModelError::UnknownStatus("archived".to_string()));
    }
}
