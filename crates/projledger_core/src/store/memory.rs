//! Single-writer in-memory store over one portfolio snapshot.

use super::command::{CommandOutcome, LedgerCommand};
use super::{StoreError, StoreResult};
use crate::engine::costs::{compute_project_costs, ProjectCosts};
use crate::engine::portfolio::{compute_portfolio_stats, PortfolioStats};
use crate::model::contractor::Contractor;
use crate::model::project::{Assignment, Expense, Income, Project};
use crate::model::snapshot::PortfolioSnapshot;
use log::{info, warn};
use rust_decimal::Decimal;

/// Receives outcomes of applied commands.
///
/// Called synchronously after the snapshot has been updated.
pub trait StoreObserver {
    fn on_change(&self, outcome: &CommandOutcome, snapshot: &PortfolioSnapshot);
}

impl<F> StoreObserver for F
where
    F: Fn(&CommandOutcome, &PortfolioSnapshot),
{
    fn on_change(&self, outcome: &CommandOutcome, snapshot: &PortfolioSnapshot) {
        self(outcome, snapshot)
    }
}

/// In-memory portfolio store for one session.
#[derive(Default)]
pub struct LedgerStore {
    snapshot: PortfolioSnapshot,
    observers: Vec<Box<dyn StoreObserver>>,
}

impl LedgerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with an existing snapshot.
    pub fn from_snapshot(snapshot: PortfolioSnapshot) -> Self {
        Self {
            snapshot,
            observers: Vec::new(),
        }
    }

    /// Registers an observer notified after every applied command.
    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    /// Read-only view handed to the aggregation engine.
    pub fn snapshot(&self) -> &PortfolioSnapshot {
        &self.snapshot
    }

    /// Consumes the store and returns its snapshot.
    pub fn into_snapshot(self) -> PortfolioSnapshot {
        self.snapshot
    }

    /// Computes the financial view of one stored project.
    pub fn project_costs(&self, project_id: &str) -> StoreResult<ProjectCosts> {
        let project = self
            .snapshot
            .project(project_id)
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))?;
        Ok(compute_project_costs(project, &self.snapshot.contractors))
    }

    /// Computes portfolio totals over the whole stored snapshot.
    pub fn portfolio_stats(&self) -> PortfolioStats {
        compute_portfolio_stats(&self.snapshot.projects, &self.snapshot.contractors)
    }

    /// Applies one command and notifies observers on success.
    ///
    /// # Errors
    /// - Returns `MissingField`/`InvalidAmount` when presence checks fail.
    /// - Returns `*NotFound` errors when a referenced entity is missing.
    pub fn apply(&mut self, command: LedgerCommand) -> StoreResult<CommandOutcome> {
        let kind = command.kind();
        match self.apply_inner(command) {
            Ok(outcome) => {
                info!("event=command_applied module=store status=ok command={kind}");
                for observer in &self.observers {
                    observer.on_change(&outcome, &self.snapshot);
                }
                Ok(outcome)
            }
            Err(err) => {
                warn!(
                    "event=command_rejected module=store status=error command={kind} error={}",
                    err.code()
                );
                Err(err)
            }
        }
    }

    fn apply_inner(&mut self, command: LedgerCommand) -> StoreResult<CommandOutcome> {
        match command {
            LedgerCommand::CreateProject {
                name,
                client,
                budget,
                created_at,
            } => {
                let name = require_text("name", name)?;
                let client = require_text("client", client)?;
                require_non_negative("budget", budget)?;
                let project = Project::new(name, client, budget, created_at);
                let project_id = project.id.clone();
                self.snapshot.projects.push(project);
                Ok(CommandOutcome::ProjectCreated { project_id })
            }
            LedgerCommand::UpdateProject {
                project_id,
                name,
                client,
                budget,
                status,
            } => {
                let name = require_text("name", name)?;
                let client = require_text("client", client)?;
                require_non_negative("budget", budget)?;
                let project = self.project_mut(&project_id)?;
                project.name = name;
                project.client = client;
                project.budget = budget;
                project.status = status;
                Ok(CommandOutcome::ProjectUpdated { project_id })
            }
            LedgerCommand::DeleteProject { project_id } => {
                let position = self.project_position(&project_id)?;
                self.snapshot.projects.remove(position);
                Ok(CommandOutcome::ProjectDeleted { project_id })
            }
            LedgerCommand::AddContractor { name, role, rate } => {
                let name = require_text("name", name)?;
                require_non_negative("rate", rate)?;
                let contractor = Contractor::new(name, role.trim(), rate);
                let contractor_id = contractor.id.clone();
                self.snapshot.contractors.push(contractor);
                Ok(CommandOutcome::ContractorAdded { contractor_id })
            }
            LedgerCommand::RemoveContractor { contractor_id } => {
                let position = self
                    .snapshot
                    .contractors
                    .iter()
                    .position(|contractor| contractor.id == contractor_id)
                    .ok_or_else(|| StoreError::ContractorNotFound(contractor_id.clone()))?;
                self.snapshot.contractors.remove(position);
                let dangling_assignments = self
                    .snapshot
                    .projects
                    .iter()
                    .flat_map(|project| project.assignments.iter())
                    .filter(|assignment| assignment.contractor_id == contractor_id)
                    .count();
                Ok(CommandOutcome::ContractorRemoved {
                    contractor_id,
                    dangling_assignments,
                })
            }
            LedgerCommand::AddAssignment {
                project_id,
                contractor_id,
                hours,
            } => {
                require_positive("hours", hours)?;
                if self.snapshot.contractor(&contractor_id).is_none() {
                    return Err(StoreError::ContractorNotFound(contractor_id));
                }
                let project = self.project_mut(&project_id)?;
                project
                    .assignments
                    .push(Assignment::new(contractor_id, hours));
                let index = project.assignments.len() - 1;
                Ok(CommandOutcome::AssignmentAdded { project_id, index })
            }
            LedgerCommand::RemoveAssignment { project_id, index } => {
                let project = self.project_mut(&project_id)?;
                let len = project.assignments.len();
                if index >= len {
                    return Err(StoreError::AssignmentIndexOutOfRange {
                        project_id,
                        index,
                        len,
                    });
                }
                project.assignments.remove(index);
                Ok(CommandOutcome::AssignmentRemoved { project_id, index })
            }
            LedgerCommand::AddExpense {
                project_id,
                description,
                amount,
                category,
                date,
            } => {
                let description = require_text("description", description)?;
                let category = require_text("category", category)?;
                require_positive("amount", amount)?;
                let project = self.project_mut(&project_id)?;
                let expense = Expense::new(description, amount, category, date);
                let entry_id = expense.id.clone();
                project.expenses.push(expense);
                Ok(CommandOutcome::ExpenseAdded {
                    project_id,
                    entry_id,
                })
            }
            LedgerCommand::RemoveExpense {
                project_id,
                entry_id,
            } => {
                let project = self.project_mut(&project_id)?;
                let before = project.expenses.len();
                project.expenses.retain(|expense| expense.id != entry_id);
                if project.expenses.len() == before {
                    return Err(StoreError::EntryNotFound {
                        project_id,
                        entry_id,
                    });
                }
                Ok(CommandOutcome::ExpenseRemoved {
                    project_id,
                    entry_id,
                })
            }
            LedgerCommand::AddIncome {
                project_id,
                description,
                amount,
                date,
            } => {
                let description = require_text("description", description)?;
                require_positive("amount", amount)?;
                let project = self.project_mut(&project_id)?;
                let income = Income::new(description, amount, date);
                let entry_id = income.id.clone();
                project.incomes.push(income);
                Ok(CommandOutcome::IncomeAdded {
                    project_id,
                    entry_id,
                })
            }
            LedgerCommand::RemoveIncome {
                project_id,
                entry_id,
            } => {
                let project = self.project_mut(&project_id)?;
                let before = project.incomes.len();
                project.incomes.retain(|income| income.id != entry_id);
                if project.incomes.len() == before {
                    return Err(StoreError::EntryNotFound {
                        project_id,
                        entry_id,
                    });
                }
                Ok(CommandOutcome::IncomeRemoved {
                    project_id,
                    entry_id,
                })
            }
        }
    }

    fn project_position(&self, project_id: &str) -> StoreResult<usize> {
        self.snapshot
            .projects
            .iter()
            .position(|project| project.id == project_id)
            .ok_or_else(|| StoreError::ProjectNotFound(project_id.to_string()))
    }

    fn project_mut(&mut self, project_id: &str) -> StoreResult<&mut Project> {
        let position = self.project_position(project_id)?;
        Ok(&mut self.snapshot.projects[position])
    }
}

fn require_text(field: &'static str, value: String) -> StoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn require_non_negative(field: &'static str, value: Decimal) -> StoreResult<()> {
    if value < Decimal::ZERO {
        return Err(StoreError::InvalidAmount { field, value });
    }
    Ok(())
}

fn require_positive(field: &'static str, value: Decimal) -> StoreResult<()> {
    if value <= Decimal::ZERO {
        return Err(StoreError::InvalidAmount { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::require_non_negative;
    use crate::store::StoreError;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn non_negative_accepts_zero_and_rejects_negatives() {
        assert!(require_non_negative("budget", Decimal::ZERO).is_ok());
        assert!(require_non_negative("budget", dec!(-0)).is_ok());
        assert_eq!(
            require_non_negative("budget", dec!(-1)),
            Err(StoreError::InvalidAmount {
                field: "budget",
                value: dec!(-1)
            })
        );
    }
}
