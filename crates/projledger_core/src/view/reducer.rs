//! Pure reducer from view actions to the next dashboard state.

use super::state::{
    AssignmentDraft, ContractorDraft, DashboardState, Dialog, ExpenseDraft, IncomeDraft,
    NewProjectDraft, ProjectDraft, ProjectEditor, Tab,
};
use crate::model::project::ProjectId;
use crate::model::snapshot::PortfolioSnapshot;
use crate::store::command::LedgerCommand;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// User intent coming from the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewAction {
    SelectTab { tab: Tab },
    OpenDialog { dialog: Dialog },
    /// Closes the open dialog and discards its draft.
    CloseDialog,
    BeginEdit { project_id: ProjectId },
    CancelEdit,
    EditNewProject { draft: NewProjectDraft },
    EditContractor { draft: ContractorDraft },
    EditProject { draft: ProjectDraft },
    EditAssignment { draft: AssignmentDraft },
    EditExpense { draft: ExpenseDraft },
    EditIncome { draft: IncomeDraft },
    SubmitNewProject,
    SubmitContractor,
    SubmitProjectEdit,
    SubmitAssignment,
    SubmitExpense,
    SubmitIncome,
}

/// User-facing feedback produced while reducing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewNotice {
    /// A submitted draft has blank or non-positive required fields.
    FillAllFields,
    /// The target project no longer exists in the snapshot.
    ProjectMissing,
}

/// Next state plus the store command (or notice) the action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reduction {
    pub state: DashboardState,
    pub command: Option<LedgerCommand>,
    pub notice: Option<ViewNotice>,
}

impl Reduction {
    fn state(state: DashboardState) -> Self {
        Self {
            state,
            command: None,
            notice: None,
        }
    }

    fn command(state: DashboardState, command: LedgerCommand) -> Self {
        Self {
            state,
            command: Some(command),
            notice: None,
        }
    }

    fn notice(state: DashboardState, notice: ViewNotice) -> Self {
        Self {
            state,
            command: None,
            notice: Some(notice),
        }
    }
}

/// Applies one view action.
///
/// `snapshot` is read to prefill the project editor; it is never modified.
pub fn reduce(
    state: &DashboardState,
    action: ViewAction,
    snapshot: &PortfolioSnapshot,
) -> Reduction {
    let mut next = state.clone();
    match action {
        ViewAction::SelectTab { tab } => {
            next.active_tab = tab;
            Reduction::state(next)
        }
        ViewAction::OpenDialog { dialog } => {
            if requires_editor(dialog) && next.editing.is_none() {
                return Reduction::notice(next, ViewNotice::ProjectMissing);
            }
            next.open_dialog = Some(dialog);
            Reduction::state(next)
        }
        ViewAction::CloseDialog => {
            if let Some(dialog) = next.open_dialog.take() {
                reset_draft(&mut next, dialog);
            }
            Reduction::state(next)
        }
        ViewAction::BeginEdit { project_id } => match snapshot.project(&project_id) {
            Some(project) => {
                next.editing = Some(ProjectEditor {
                    project_id,
                    draft: ProjectDraft::from(project),
                });
                Reduction::state(next)
            }
            None => Reduction::notice(next, ViewNotice::ProjectMissing),
        },
        ViewAction::CancelEdit => {
            close_editor(&mut next);
            Reduction::state(next)
        }
        ViewAction::EditNewProject { draft } => {
            next.new_project = draft;
            Reduction::state(next)
        }
        ViewAction::EditContractor { draft } => {
            next.new_contractor = draft;
            Reduction::state(next)
        }
        ViewAction::EditProject { draft } => match next.editing.as_mut() {
            Some(editor) => {
                editor.draft = draft;
                Reduction::state(next)
            }
            None => Reduction::notice(next, ViewNotice::ProjectMissing),
        },
        ViewAction::EditAssignment { draft } => {
            next.assignment = draft;
            Reduction::state(next)
        }
        ViewAction::EditExpense { draft } => {
            next.expense = draft;
            Reduction::state(next)
        }
        ViewAction::EditIncome { draft } => {
            next.income = draft;
            Reduction::state(next)
        }
        ViewAction::SubmitNewProject => submit_new_project(next),
        ViewAction::SubmitContractor => submit_contractor(next),
        ViewAction::SubmitProjectEdit => submit_project_edit(next),
        ViewAction::SubmitAssignment => submit_assignment(next),
        ViewAction::SubmitExpense => submit_expense(next),
        ViewAction::SubmitIncome => submit_income(next),
    }
}

fn requires_editor(dialog: Dialog) -> bool {
    matches!(
        dialog,
        Dialog::AddAssignment | Dialog::AddExpense | Dialog::AddIncome
    )
}

fn reset_draft(state: &mut DashboardState, dialog: Dialog) {
    match dialog {
        Dialog::NewProject => state.new_project = NewProjectDraft::default(),
        Dialog::NewContractor => state.new_contractor = ContractorDraft::default(),
        Dialog::AddAssignment => state.assignment = AssignmentDraft::default(),
        Dialog::AddExpense => state.expense = ExpenseDraft::empty(state.today),
        Dialog::AddIncome => state.income = IncomeDraft::empty(state.today),
    }
}

fn close(state: &mut DashboardState, dialog: Dialog) {
    reset_draft(state, dialog);
    if state.open_dialog == Some(dialog) {
        state.open_dialog = None;
    }
}

/// Leaves edit mode along with any dialog that targets the edited project.
fn close_editor(state: &mut DashboardState) {
    state.editing = None;
    if let Some(dialog) = state.open_dialog.filter(|dialog| requires_editor(*dialog)) {
        close(state, dialog);
    }
}

fn filled(text: &str) -> bool {
    !text.trim().is_empty()
}

fn submit_new_project(mut state: DashboardState) -> Reduction {
    let draft = &state.new_project;
    if !filled(&draft.name) || !filled(&draft.client) || draft.budget < Decimal::ZERO {
        return Reduction::notice(state, ViewNotice::FillAllFields);
    }
    let command = LedgerCommand::CreateProject {
        name: draft.name.clone(),
        client: draft.client.clone(),
        budget: draft.budget,
        created_at: state.today,
    };
    close(&mut state, Dialog::NewProject);
    Reduction::command(state, command)
}

fn submit_contractor(mut state: DashboardState) -> Reduction {
    let draft = &state.new_contractor;
    if !filled(&draft.name) || draft.rate < Decimal::ZERO {
        return Reduction::notice(state, ViewNotice::FillAllFields);
    }
    let command = LedgerCommand::AddContractor {
        name: draft.name.clone(),
        role: draft.role.clone(),
        rate: draft.rate,
    };
    close(&mut state, Dialog::NewContractor);
    Reduction::command(state, command)
}

fn submit_project_edit(mut state: DashboardState) -> Reduction {
    let Some(editor) = state.editing.as_ref() else {
        return Reduction::notice(state, ViewNotice::ProjectMissing);
    };
    let draft = &editor.draft;
    if !filled(&draft.name) || !filled(&draft.client) || draft.budget < Decimal::ZERO {
        return Reduction::notice(state, ViewNotice::FillAllFields);
    }
    let command = LedgerCommand::UpdateProject {
        project_id: editor.project_id.clone(),
        name: draft.name.clone(),
        client: draft.client.clone(),
        budget: draft.budget,
        status: draft.status,
    };
    close_editor(&mut state);
    Reduction::command(state, command)
}

fn submit_assignment(mut state: DashboardState) -> Reduction {
    let Some(project_id) = state.editing_project_id().map(str::to_string) else {
        return Reduction::notice(state, ViewNotice::ProjectMissing);
    };
    let draft = &state.assignment;
    if !filled(&draft.contractor_id) || draft.hours <= Decimal::ZERO {
        return Reduction::notice(state, ViewNotice::FillAllFields);
    }
    let command = LedgerCommand::AddAssignment {
        project_id,
        contractor_id: draft.contractor_id.clone(),
        hours: draft.hours,
    };
    close(&mut state, Dialog::AddAssignment);
    Reduction::command(state, command)
}

fn submit_expense(mut state: DashboardState) -> Reduction {
    let Some(project_id) = state.editing_project_id().map(str::to_string) else {
        return Reduction::notice(state, ViewNotice::ProjectMissing);
    };
    let draft = &state.expense;
    if !filled(&draft.description) || !filled(&draft.category) || draft.amount <= Decimal::ZERO {
        return Reduction::notice(state, ViewNotice::FillAllFields);
    }
    let command = LedgerCommand::AddExpense {
        project_id,
        description: draft.description.clone(),
        amount: draft.amount,
        category: draft.category.clone(),
        date: draft.date,
    };
    close(&mut state, Dialog::AddExpense);
    Reduction::command(state, command)
}

fn submit_income(mut state: DashboardState) -> Reduction {
    let Some(project_id) = state.editing_project_id().map(str::to_string) else {
        return Reduction::notice(state, ViewNotice::ProjectMissing);
    };
    let draft = &state.income;
    if !filled(&draft.description) || draft.amount <= Decimal::ZERO {
        return Reduction::notice(state, ViewNotice::FillAllFields);
    }
    let command = LedgerCommand::AddIncome {
        project_id,
        description: draft.description.clone(),
        amount: draft.amount,
        date: draft.date,
    };
    close(&mut state, Dialog::AddIncome);
    Reduction::command(state, command)
}

#[cfg(test)]
mod tests {
    use super::{reduce, ViewAction, ViewNotice};
    use crate::model::snapshot::PortfolioSnapshot;
    use crate::view::state::{DashboardState, Dialog, Tab};
    use chrono::NaiveDate;

    fn initial() -> DashboardState {
        DashboardState::new(NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date"))
    }

    #[test]
    fn select_tab_only_changes_tab() {
        let state = initial();
        let reduction = reduce(
            &state,
            ViewAction::SelectTab {
                tab: Tab::Analytics,
            },
            &PortfolioSnapshot::default(),
        );
        assert_eq!(reduction.state.active_tab, Tab::Analytics);
        assert!(reduction.command.is_none());
        assert_eq!(state.active_tab, Tab::Projects);
    }

    #[test]
    fn nested_dialog_requires_open_editor() {
        let reduction = reduce(
            &initial(),
            ViewAction::OpenDialog {
                dialog: Dialog::AddExpense,
            },
            &PortfolioSnapshot::default(),
        );
        assert_eq!(reduction.notice, Some(ViewNotice::ProjectMissing));
        assert_eq!(reduction.state.open_dialog, None);
    }
}
