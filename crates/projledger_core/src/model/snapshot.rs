//! Read-only portfolio snapshot handed to the aggregation engine.

use super::contractor::Contractor;
use super::project::{Assignment, Expense, Income, Project};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Complete, materialized set of projects and contractors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub contractors: Vec<Contractor>,
}

impl PortfolioSnapshot {
    pub fn new(projects: Vec<Project>, contractors: Vec<Contractor>) -> Self {
        Self {
            projects,
            contractors,
        }
    }

    /// Finds a project by id.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    /// Finds a contractor by id.
    pub fn contractor(&self, id: &str) -> Option<&Contractor> {
        self.contractors
            .iter()
            .find(|contractor| contractor.id == id)
    }

    /// Seed dataset of the dashboard: two active projects, three contractors.
    pub fn demo() -> Self {
        let contractors = vec![
            Contractor::with_id("1", "Alexey Petrov", "Frontend Developer", Decimal::from(2500)),
            Contractor::with_id("2", "Maria Sidorova", "UI/UX Designer", Decimal::from(2000)),
            Contractor::with_id("3", "Dmitry Ivanov", "Backend Developer", Decimal::from(3000)),
        ];

        let mut shop = Project::with_id(
            "1",
            "Electronics web shop",
            "TechnoWorld LLC",
            Decimal::from(500_000),
            demo_date(2024, 1, 10),
        );
        shop.assignments = vec![
            Assignment::new("1", Decimal::from(80)),
            Assignment::new("2", Decimal::from(40)),
        ];
        shop.expenses = vec![
            demo_expense(
                "e1",
                "Hosting for one year",
                12_000,
                "Infrastructure",
                (2024, 1, 15),
            ),
            demo_expense("e2", "Plugin licenses", 8_000, "Software", (2024, 1, 20)),
        ];
        shop.incomes = vec![demo_income("i1", "Advance 50%", 250_000, (2024, 1, 10))];

        let mut law_site = Project::with_id(
            "2",
            "Law firm corporate site",
            "PravoConsult JSC",
            Decimal::from(300_000),
            demo_date(2024, 2, 1),
        );
        law_site.assignments = vec![
            Assignment::new("1", Decimal::from(60)),
            Assignment::new("3", Decimal::from(30)),
        ];
        law_site.expenses = vec![demo_expense(
            "e3",
            "Premium theme purchase",
            15_000,
            "Design",
            (2024, 2, 1),
        )];
        law_site.incomes = vec![demo_income("i2", "Advance 30%", 90_000, (2024, 2, 1))];

        Self::new(vec![shop, law_site], contractors)
    }
}

/// Builds an id -> contractor lookup table for one aggregation pass.
///
/// When ids are duplicated the first contractor wins, matching `find` order.
pub fn index_contractors(contractors: &[Contractor]) -> HashMap<&str, &Contractor> {
    let mut index: HashMap<&str, &Contractor> = HashMap::with_capacity(contractors.len());
    for contractor in contractors {
        index.entry(contractor.id.as_str()).or_insert(contractor);
    }
    index
}

fn demo_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn demo_expense(
    id: &str,
    description: &str,
    amount: i64,
    category: &str,
    (year, month, day): (i32, u32, u32),
) -> Expense {
    Expense {
        id: id.to_string(),
        description: description.to_string(),
        amount: Decimal::from(amount),
        category: category.to_string(),
        date: demo_date(year, month, day),
    }
}

fn demo_income(
    id: &str,
    description: &str,
    amount: i64,
    (year, month, day): (i32, u32, u32),
) -> Income {
    Income {
        id: id.to_string(),
        description: description.to_string(),
        amount: Decimal::from(amount),
        date: demo_date(year, month, day),
    }
}

#[cfg(test)]
mod tests {
    use super::{index_contractors, PortfolioSnapshot};
    use crate::model::contractor::Contractor;
    use rust_decimal_macros::dec;

    #[test]
    fn demo_has_two_projects_and_three_contractors() {
        let demo = PortfolioSnapshot::demo();
        assert_eq!(demo.projects.len(), 2);
        assert_eq!(demo.contractors.len(), 3);
        assert_eq!(demo.contractor("3").map(|c| c.rate), Some(dec!(3000)));
        assert!(demo.project("missing").is_none());
    }

    #[test]
    fn index_keeps_first_contractor_for_duplicate_ids() {
        let contractors = vec![
            Contractor::with_id("c1", "First", "Dev", dec!(10)),
            Contractor::with_id("c1", "Second", "Dev", dec!(20)),
        ];
        let index = index_contractors(&contractors);
        assert_eq!(index.len(), 1);
        assert_eq!(index["c1"].name, "First");
    }
}
