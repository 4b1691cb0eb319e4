//! Contractor, status and cost-structure summaries.

use crate::engine::costs::project_costs_with_index;
use crate::engine::portfolio::{contractor_earnings, PortfolioStats};
use crate::engine::ratio::{percentage, saturating_sum};
use crate::model::contractor::{Contractor, ContractorId};
use crate::model::project::{Project, ProjectStatus};
use crate::model::snapshot::index_contractors;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contractor card figures: earnings, hours and project involvement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorSummary {
    pub contractor_id: ContractorId,
    pub total_earned: Decimal,
    pub total_hours: Decimal,
    /// Distinct projects with at least one assignment for this contractor.
    pub project_count: usize,
}

/// Project counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub active: usize,
    pub completed: usize,
    pub paused: usize,
}

impl StatusCounts {
    pub fn get(&self, status: ProjectStatus) -> usize {
        match status {
            ProjectStatus::Active => self.active,
            ProjectStatus::Completed => self.completed,
            ProjectStatus::Paused => self.paused,
        }
    }

    pub fn total(&self) -> usize {
        self.active + self.completed + self.paused
    }
}

/// Split of the portfolio budget into contractor cost, expenses and profit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostStructure {
    pub total_budget: Decimal,
    pub contractor_cost: Decimal,
    pub expense_cost: Decimal,
    pub profit: Decimal,
    /// Percentages of `total_budget`; zero when the budget is zero.
    pub contractor_share: Decimal,
    pub expense_share: Decimal,
    pub profit_share: Decimal,
}

/// Ranked contractor with earnings share of total portfolio costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsShare {
    pub contractor_id: ContractorId,
    pub earnings: Decimal,
    pub share_of_costs: Decimal,
}

/// Builds one summary per contractor, in contractor input order.
pub fn contractor_summaries(
    projects: &[Project],
    contractors: &[Contractor],
) -> Vec<ContractorSummary> {
    contractors
        .iter()
        .map(|contractor| {
            let total_hours = saturating_sum(
                projects
                    .iter()
                    .flat_map(|project| project.assignments.iter())
                    .filter(|assignment| assignment.contractor_id == contractor.id)
                    .map(|assignment| assignment.hours),
            );
            let project_count = projects
                .iter()
                .filter(|project| project.involves(&contractor.id))
                .count();
            ContractorSummary {
                contractor_id: contractor.id.clone(),
                total_earned: contractor_earnings(contractor, projects),
                total_hours,
                project_count,
            }
        })
        .collect()
}

/// Counts projects per status.
pub fn status_counts(projects: &[Project]) -> StatusCounts {
    projects
        .iter()
        .fold(StatusCounts::default(), |mut counts, project| {
            match project.status {
                ProjectStatus::Active => counts.active += 1,
                ProjectStatus::Completed => counts.completed += 1,
                ProjectStatus::Paused => counts.paused += 1,
            }
            counts
        })
}

/// Splits the total budget into contractor cost, expenses and profit.
pub fn cost_structure(projects: &[Project], contractors: &[Contractor]) -> CostStructure {
    let index = index_contractors(contractors);
    let mut structure = CostStructure::default();
    for project in projects {
        let costs = project_costs_with_index(project, &index);
        structure.total_budget = structure.total_budget.saturating_add(project.budget);
        structure.contractor_cost = structure.contractor_cost.saturating_add(costs.contractor_cost);
        structure.expense_cost = structure.expense_cost.saturating_add(costs.expense_cost);
    }
    structure.profit = structure
        .total_budget
        .saturating_sub(structure.contractor_cost)
        .saturating_sub(structure.expense_cost);
    structure.contractor_share = percentage(structure.contractor_cost, structure.total_budget);
    structure.expense_share = percentage(structure.expense_cost, structure.total_budget);
    structure.profit_share = percentage(structure.profit, structure.total_budget);
    structure
}

/// Decorates the earnings ranking with each contractor's share of total costs.
pub fn earnings_share_of_costs(stats: &PortfolioStats) -> Vec<EarningsShare> {
    stats
        .contractor_earnings
        .iter()
        .map(|entry| EarningsShare {
            contractor_id: entry.contractor.id.clone(),
            earnings: entry.earnings,
            share_of_costs: percentage(entry.earnings, stats.total_costs),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{cost_structure, status_counts, StatusCounts};
    use crate::model::project::{Project, ProjectStatus};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn status_counts_cover_every_status() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        let mut paused = Project::with_id("p2", "B", "C", dec!(1), date);
        paused.status = ProjectStatus::Paused;
        let projects = vec![Project::with_id("p1", "A", "C", dec!(1), date), paused];

        let counts = status_counts(&projects);
        assert_eq!(
            counts,
            StatusCounts {
                active: 1,
                completed: 0,
                paused: 1
            }
        );
        assert_eq!(counts.get(ProjectStatus::Paused), 1);
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn cost_structure_of_empty_portfolio_is_zero() {
        let structure = cost_structure(&[], &[]);
        assert_eq!(structure.contractor_share, Decimal::ZERO);
        assert_eq!(structure.expense_share, Decimal::ZERO);
        assert_eq!(structure.profit_share, Decimal::ZERO);
    }
}
