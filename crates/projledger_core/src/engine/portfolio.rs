//! Portfolio totals and contractor earnings ranking.

use super::costs::project_costs_with_index;
use super::ratio::saturating_sum;
use crate::model::contractor::Contractor;
use crate::model::project::Project;
use crate::model::snapshot::index_contractors;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Contractor decorated with earnings across the whole portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorEarnings {
    #[serde(flatten)]
    pub contractor: Contractor,
    pub earnings: Decimal,
}

/// Portfolio-wide aggregate view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub total_budget: Decimal,
    pub total_costs: Decimal,
    /// `total_budget - total_costs`.
    pub total_profit: Decimal,
    /// Sorted by earnings descending; ties keep contractor input order.
    pub contractor_earnings: Vec<ContractorEarnings>,
}

/// Computes portfolio totals and the earnings ranking.
///
/// Empty inputs yield zero totals and an empty ranking.
pub fn compute_portfolio_stats(projects: &[Project], contractors: &[Contractor]) -> PortfolioStats {
    let index = index_contractors(contractors);

    let total_budget = saturating_sum(projects.iter().map(|project| project.budget));
    let total_costs = saturating_sum(
        projects
            .iter()
            .map(|project| project_costs_with_index(project, &index).total_cost),
    );

    PortfolioStats {
        total_budget,
        total_costs,
        total_profit: total_budget.saturating_sub(total_costs),
        contractor_earnings: rank_contractor_earnings(projects, contractors),
    }
}

/// Earnings of one contractor summed over every matching assignment.
pub fn contractor_earnings(contractor: &Contractor, projects: &[Project]) -> Decimal {
    saturating_sum(
        projects
            .iter()
            .flat_map(|project| project.assignments.iter())
            .filter(|assignment| assignment.contractor_id == contractor.id)
            .map(|assignment| contractor.charge_for(assignment.hours)),
    )
}

/// Ranks all contractors by earnings, descending.
///
/// Uses a stable sort, so equal earnings keep the order of `contractors`.
pub fn rank_contractor_earnings(
    projects: &[Project],
    contractors: &[Contractor],
) -> Vec<ContractorEarnings> {
    let mut ranking = contractors
        .iter()
        .map(|contractor| ContractorEarnings {
            contractor: contractor.clone(),
            earnings: contractor_earnings(contractor, projects),
        })
        .collect::<Vec<_>>();
    ranking.sort_by(|left, right| right.earnings.cmp(&left.earnings));
    ranking
}

#[cfg(test)]
mod tests {
    use super::{compute_portfolio_stats, rank_contractor_earnings};
    use crate::model::contractor::Contractor;
    use crate::model::project::{Assignment, Project};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn project(id: &str, budget: Decimal, assignments: Vec<Assignment>) -> Project {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        let mut project = Project::with_id(id, id, "Client", budget, date);
        project.assignments = assignments;
        project
    }

    #[test]
    fn empty_inputs_yield_zero_stats() {
        let stats = compute_portfolio_stats(&[], &[]);
        assert_eq!(stats.total_budget, Decimal::ZERO);
        assert_eq!(stats.total_costs, Decimal::ZERO);
        assert_eq!(stats.total_profit, Decimal::ZERO);
        assert!(stats.contractor_earnings.is_empty());
    }

    #[test]
    fn duplicate_assignments_in_one_project_are_summed() {
        let contractors = vec![Contractor::with_id("c1", "Ann", "Dev", dec!(100))];
        let projects = vec![project(
            "p1",
            dec!(10000),
            vec![
                Assignment::new("c1", dec!(3)),
                Assignment::new("c1", dec!(2)),
            ],
        )];
        let ranking = rank_contractor_earnings(&projects, &contractors);
        assert_eq!(ranking[0].earnings, dec!(500));
    }

    #[test]
    fn ties_keep_input_order() {
        let contractors = vec![
            Contractor::with_id("a", "A", "Dev", dec!(10)),
            Contractor::with_id("b", "B", "Dev", dec!(20)),
            Contractor::with_id("c", "C", "Dev", dec!(10)),
        ];
        let projects = vec![project(
            "p1",
            dec!(1000),
            vec![
                Assignment::new("a", dec!(2)),
                Assignment::new("b", dec!(1)),
                Assignment::new("c", dec!(2)),
            ],
        )];
        let ids = rank_contractor_earnings(&projects, &contractors)
            .into_iter()
            .map(|entry| entry.contractor.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
