//! Store commands and their outcomes.

use crate::model::contractor::ContractorId;
use crate::model::project::{EntryId, ProjectId, ProjectStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One mutation request against the portfolio store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LedgerCommand {
    CreateProject {
        name: String,
        client: String,
        budget: Decimal,
        created_at: NaiveDate,
    },
    /// Full replacement of the editable project fields.
    UpdateProject {
        project_id: ProjectId,
        name: String,
        client: String,
        budget: Decimal,
        status: ProjectStatus,
    },
    DeleteProject {
        project_id: ProjectId,
    },
    AddContractor {
        name: String,
        role: String,
        rate: Decimal,
    },
    RemoveContractor {
        contractor_id: ContractorId,
    },
    AddAssignment {
        project_id: ProjectId,
        contractor_id: ContractorId,
        hours: Decimal,
    },
    /// Removes the assignment at `index` in the project's ordered list.
    RemoveAssignment {
        project_id: ProjectId,
        index: usize,
    },
    AddExpense {
        project_id: ProjectId,
        description: String,
        amount: Decimal,
        category: String,
        date: NaiveDate,
    },
    RemoveExpense {
        project_id: ProjectId,
        entry_id: EntryId,
    },
    AddIncome {
        project_id: ProjectId,
        description: String,
        amount: Decimal,
        date: NaiveDate,
    },
    RemoveIncome {
        project_id: ProjectId,
        entry_id: EntryId,
    },
}

impl LedgerCommand {
    /// Stable command name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CreateProject { .. } => "create_project",
            Self::UpdateProject { .. } => "update_project",
            Self::DeleteProject { .. } => "delete_project",
            Self::AddContractor { .. } => "add_contractor",
            Self::RemoveContractor { .. } => "remove_contractor",
            Self::AddAssignment { .. } => "add_assignment",
            Self::RemoveAssignment { .. } => "remove_assignment",
            Self::AddExpense { .. } => "add_expense",
            Self::RemoveExpense { .. } => "remove_expense",
            Self::AddIncome { .. } => "add_income",
            Self::RemoveIncome { .. } => "remove_income",
        }
    }
}

/// What a successfully applied command changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutcome {
    ProjectCreated {
        project_id: ProjectId,
    },
    ProjectUpdated {
        project_id: ProjectId,
    },
    ProjectDeleted {
        project_id: ProjectId,
    },
    ContractorAdded {
        contractor_id: ContractorId,
    },
    ContractorRemoved {
        contractor_id: ContractorId,
        /// Assignments left pointing at the removed contractor.
        dangling_assignments: usize,
    },
    AssignmentAdded {
        project_id: ProjectId,
        index: usize,
    },
    AssignmentRemoved {
        project_id: ProjectId,
        index: usize,
    },
    ExpenseAdded {
        project_id: ProjectId,
        entry_id: EntryId,
    },
    ExpenseRemoved {
        project_id: ProjectId,
        entry_id: EntryId,
    },
    IncomeAdded {
        project_id: ProjectId,
        entry_id: EntryId,
    },
    IncomeRemoved {
        project_id: ProjectId,
        entry_id: EntryId,
    },
}

impl CommandOutcome {
    /// Project touched by this outcome, if any.
    pub fn project_id(&self) -> Option<&str> {
        match self {
            Self::ContractorAdded { .. } | Self::ContractorRemoved { .. } => None,
            Self::ProjectCreated { project_id }
            | Self::ProjectUpdated { project_id }
            | Self::ProjectDeleted { project_id }
            | Self::AssignmentAdded { project_id, .. }
            | Self::AssignmentRemoved { project_id, .. }
            | Self::ExpenseAdded { project_id, .. }
            | Self::ExpenseRemoved { project_id, .. }
            | Self::IncomeAdded { project_id, .. }
            | Self::IncomeRemoved { project_id, .. } => Some(project_id.as_str()),
        }
    }
}
