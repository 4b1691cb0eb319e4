//! Per-project cost, profit and margin derivation.

use super::ratio::{percentage, round_one_decimal, saturating_sum};
use crate::model::contractor::Contractor;
use crate::model::project::Project;
use crate::model::snapshot::index_contractors;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Financial view of one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCosts {
    /// Sum of `rate * hours` over resolved assignments.
    pub contractor_cost: Decimal,
    /// Sum of expense amounts.
    pub expense_cost: Decimal,
    /// `contractor_cost + expense_cost`.
    pub total_cost: Decimal,
    /// Contractual income, i.e. the project budget.
    pub income: Decimal,
    /// `income - total_cost`; may be negative.
    pub profit: Decimal,
    /// Raw `profit / income * 100`, zero when income is not positive.
    pub profit_margin: Decimal,
    /// Sum of income receipts recorded so far.
    pub received: Decimal,
    /// `income - received`; negative when receipts exceed the budget.
    pub outstanding: Decimal,
}

impl ProjectCosts {
    /// Profit margin rounded for display (one decimal, half away from zero).
    pub fn rounded_margin(&self) -> Decimal {
        round_one_decimal(self.profit_margin)
    }
}

/// Computes the financial view of one project.
///
/// `contractors` is the full contractor collection used for rate lookup.
/// Assignments whose contractor cannot be resolved contribute zero cost.
pub fn compute_project_costs(project: &Project, contractors: &[Contractor]) -> ProjectCosts {
    let index = index_contractors(contractors);
    project_costs_with_index(project, &index)
}

pub(crate) fn project_costs_with_index(
    project: &Project,
    index: &HashMap<&str, &Contractor>,
) -> ProjectCosts {
    let contractor_cost = contractor_cost_with_index(project, index);
    let expense_cost = saturating_sum(project.expenses.iter().map(|expense| expense.amount));
    let received = saturating_sum(project.incomes.iter().map(|income| income.amount));

    let total_cost = contractor_cost.saturating_add(expense_cost);
    let income = project.budget;
    let profit = income.saturating_sub(total_cost);
    let profit_margin = if income > Decimal::ZERO {
        percentage(profit, income)
    } else {
        Decimal::ZERO
    };

    ProjectCosts {
        contractor_cost,
        expense_cost,
        total_cost,
        income,
        profit,
        profit_margin,
        received,
        outstanding: income.saturating_sub(received),
    }
}

fn contractor_cost_with_index(project: &Project, index: &HashMap<&str, &Contractor>) -> Decimal {
    saturating_sum(project.assignments.iter().map(|assignment| {
        match index.get(assignment.contractor_id.as_str()) {
            Some(contractor) => contractor.charge_for(assignment.hours),
            None => {
                debug!(
                    "event=assignment_unresolved module=engine status=degraded project_id={} contractor_id={}",
                    project.id, assignment.contractor_id
                );
                Decimal::ZERO
            }
        }
    }))
}
