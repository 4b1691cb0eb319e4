//! Report assembly and text rendering.

use projledger_core::{
    compute_portfolio_stats, compute_project_costs, contractor_summaries, cost_structure,
    earnings_share_of_costs, round_one_decimal, status_counts, ContractorSummary, CostStructure,
    EarningsShare, PortfolioSnapshot, PortfolioStats, ProjectCosts, ProjectStatus, StatusCounts,
};
use serde::Serialize;
use std::fmt::Write;

/// One project row of the report.
#[derive(Debug, Serialize)]
pub struct ProjectRow {
    pub id: String,
    pub name: String,
    pub client: String,
    pub status: ProjectStatus,
    pub costs: ProjectCosts,
}

/// Everything the dashboard shows, computed from one snapshot.
#[derive(Debug, Serialize)]
pub struct PortfolioReport {
    pub projects: Vec<ProjectRow>,
    pub stats: PortfolioStats,
    pub status_counts: StatusCounts,
    pub cost_structure: CostStructure,
    pub contractors: Vec<ContractorSummary>,
    pub earnings_share: Vec<EarningsShare>,
}

impl PortfolioReport {
    pub fn build(snapshot: &PortfolioSnapshot) -> Self {
        let projects = snapshot
            .projects
            .iter()
            .map(|project| ProjectRow {
                id: project.id.clone(),
                name: project.name.clone(),
                client: project.client.clone(),
                status: project.status,
                costs: compute_project_costs(project, &snapshot.contractors),
            })
            .collect();
        let stats = compute_portfolio_stats(&snapshot.projects, &snapshot.contractors);
        let earnings_share = earnings_share_of_costs(&stats);

        Self {
            projects,
            status_counts: status_counts(&snapshot.projects),
            cost_structure: cost_structure(&snapshot.projects, &snapshot.contractors),
            contractors: contractor_summaries(&snapshot.projects, &snapshot.contractors),
            earnings_share,
            stats,
        }
    }

    /// Renders a plain-text report.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Projects: {}", self.projects.len());
        for row in &self.projects {
            let _ = writeln!(
                out,
                "  [{}] {} ({}) budget={} cost={} profit={} margin={}% received={}",
                row.status.as_str(),
                row.name,
                row.client,
                row.costs.income,
                row.costs.total_cost,
                row.costs.profit,
                row.costs.rounded_margin(),
                row.costs.received,
            );
        }

        let _ = writeln!(
            out,
            "Portfolio: budget={} costs={} profit={}",
            self.stats.total_budget, self.stats.total_costs, self.stats.total_profit
        );
        let _ = writeln!(
            out,
            "Status: active={} completed={} paused={}",
            self.status_counts.active, self.status_counts.completed, self.status_counts.paused
        );
        let _ = writeln!(
            out,
            "Structure: contractors={}% expenses={}% profit={}%",
            round_one_decimal(self.cost_structure.contractor_share),
            round_one_decimal(self.cost_structure.expense_share),
            round_one_decimal(self.cost_structure.profit_share)
        );

        let _ = writeln!(out, "Top contractors:");
        for (rank, (entry, share)) in self
            .stats
            .contractor_earnings
            .iter()
            .zip(&self.earnings_share)
            .enumerate()
        {
            let _ = writeln!(
                out,
                "  {}. {} ({}) earned={} share_of_costs={}%",
                rank + 1,
                entry.contractor.name,
                entry.contractor.role,
                entry.earnings,
                round_one_decimal(share.share_of_costs)
            );
        }
        out
    }
}
