//! Flattened expense and income listings across all projects.

use crate::model::project::{EntryId, Project, ProjectId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One expense tagged with the project it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub entry_id: EntryId,
    pub project_id: ProjectId,
    pub project_name: String,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// One income receipt tagged with the project it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeLine {
    pub entry_id: EntryId,
    pub project_id: ProjectId,
    pub project_name: String,
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Lists every expense in project order, then entry order.
pub fn expense_ledger(projects: &[Project]) -> Vec<ExpenseLine> {
    projects
        .iter()
        .flat_map(|project| {
            project.expenses.iter().map(move |expense| ExpenseLine {
                entry_id: expense.id.clone(),
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                description: expense.description.clone(),
                category: expense.category.clone(),
                amount: expense.amount,
                date: expense.date,
            })
        })
        .collect()
}

/// Lists every income receipt in project order, then entry order.
pub fn income_ledger(projects: &[Project]) -> Vec<IncomeLine> {
    projects
        .iter()
        .flat_map(|project| {
            project.incomes.iter().map(move |income| IncomeLine {
                entry_id: income.id.clone(),
                project_id: project.id.clone(),
                project_name: project.name.clone(),
                description: income.description.clone(),
                amount: income.amount,
                date: income.date,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{expense_ledger, income_ledger};
    use crate::model::snapshot::PortfolioSnapshot;

    #[test]
    fn demo_ledgers_follow_project_then_entry_order() {
        let demo = PortfolioSnapshot::demo();
        let expenses = expense_ledger(&demo.projects);
        let ids = expenses
            .iter()
            .map(|line| line.entry_id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["e1", "e2", "e3"]);
        assert_eq!(expenses[2].project_id, "2");

        let incomes = income_ledger(&demo.projects);
        assert_eq!(incomes.len(), 2);
        assert_eq!(incomes[0].project_name, "Electronics web shop");
    }
}
