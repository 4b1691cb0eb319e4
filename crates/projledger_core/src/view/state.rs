//! Dashboard view state records.

use crate::model::contractor::ContractorId;
use crate::model::project::{Project, ProjectId, ProjectStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Projects,
    Contractors,
    Finances,
    Analytics,
}

/// Modal dialog currently shown, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialog {
    NewProject,
    NewContractor,
    /// Nested dialogs of the project editor.
    AddAssignment,
    AddExpense,
    AddIncome,
}

/// Draft for creating a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProjectDraft {
    pub name: String,
    pub client: String,
    pub budget: Decimal,
}

/// Draft for creating a contractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorDraft {
    pub name: String,
    pub role: String,
    pub rate: Decimal,
}

/// Editable fields of the project under edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    pub name: String,
    pub client: String,
    pub budget: Decimal,
    pub status: ProjectStatus,
}

impl From<&Project> for ProjectDraft {
    fn from(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            client: project.client.clone(),
            budget: project.budget,
            status: project.status,
        }
    }
}

/// Draft for assigning an existing contractor to the edited project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    pub contractor_id: ContractorId,
    pub hours: Decimal,
}

/// Draft for a new project expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub date: NaiveDate,
}

impl ExpenseDraft {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            description: String::new(),
            amount: Decimal::ZERO,
            category: String::new(),
            date,
        }
    }
}

/// Draft for a new income receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeDraft {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

impl IncomeDraft {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            description: String::new(),
            amount: Decimal::ZERO,
            date,
        }
    }
}

/// Project editor state: the target project and its field draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEditor {
    pub project_id: ProjectId,
    pub draft: ProjectDraft,
}

/// Complete dashboard view state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub active_tab: Tab,
    pub open_dialog: Option<Dialog>,
    pub editing: Option<ProjectEditor>,
    /// Default date for new ledger entries, supplied by the caller.
    pub today: NaiveDate,
    pub new_project: NewProjectDraft,
    pub new_contractor: ContractorDraft,
    pub assignment: AssignmentDraft,
    pub expense: ExpenseDraft,
    pub income: IncomeDraft,
}

impl DashboardState {
    /// Creates the initial state: projects tab, nothing open, empty drafts.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            active_tab: Tab::default(),
            open_dialog: None,
            editing: None,
            today,
            new_project: NewProjectDraft::default(),
            new_contractor: ContractorDraft::default(),
            assignment: AssignmentDraft::default(),
            expense: ExpenseDraft::empty(today),
            income: IncomeDraft::empty(today),
        }
    }

    /// Id of the project being edited, if any.
    pub fn editing_project_id(&self) -> Option<&str> {
        self.editing
            .as_ref()
            .map(|editor| editor.project_id.as_str())
    }
}
