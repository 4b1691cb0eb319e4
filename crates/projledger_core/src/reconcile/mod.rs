//! One-time migration of legacy snapshots to the hours-only assignment schema.
//!
//! # Responsibility
//! - Convert assignments that stored a precomputed `total_amount` into
//!   canonical `Assignment { contractor_id, hours }` records.
//! - Report every amount that does not survive the conversion exactly.
//!
//! # Invariants
//! - The legacy input is never mutated; a new snapshot is returned.
//! - Stored hours win over stored totals when both are present.
//! - Totals are only converted when the contractor resolves with rate > 0
//!   and the resulting hours fit in a `Decimal`.

use crate::engine::ratio::saturating_sum;
use crate::model::contractor::{Contractor, ContractorId};
use crate::model::project::{Assignment, Expense, Income, Project, ProjectId, ProjectStatus};
use crate::model::snapshot::{index_contractors, PortfolioSnapshot};
use chrono::NaiveDate;
use log::{info, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Assignment as stored by the legacy schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyAssignment {
    pub contractor_id: ContractorId,
    #[serde(default)]
    pub hours: Decimal,
    #[serde(default)]
    pub total_amount: Decimal,
}

/// Project as stored by the legacy schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyProject {
    pub id: ProjectId,
    pub name: String,
    pub client: String,
    pub budget: Decimal,
    pub status: ProjectStatus,
    #[serde(default)]
    pub assignments: Vec<LegacyAssignment>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub incomes: Vec<Income>,
    pub created_at: NaiveDate,
}

/// Legacy snapshot with precomputed assignment totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySnapshot {
    #[serde(default)]
    pub projects: Vec<LegacyProject>,
    #[serde(default)]
    pub contractors: Vec<Contractor>,
}

/// Why a stored total could not be expressed as hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnrepresentableReason {
    UnresolvedContractor,
    ZeroRate,
    /// `total_amount / rate` falls outside the `Decimal` range.
    Overflow,
}

/// One reconciliation observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReconcileFinding {
    /// Hours were derived as `total_amount / rate`.
    DerivedHours {
        project_id: ProjectId,
        contractor_id: ContractorId,
        hours: Decimal,
    },
    /// `rate * hours` differs from the stored total; the canonical figure is kept.
    Drift {
        project_id: ProjectId,
        contractor_id: ContractorId,
        stored_total: Decimal,
        derived_total: Decimal,
    },
    /// Stored total cannot be expressed as hours; stored hours are kept as-is.
    Unrepresentable {
        project_id: ProjectId,
        contractor_id: ContractorId,
        total_amount: Decimal,
        reason: UnrepresentableReason,
    },
}

/// Result summary of one migration run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub assignments_seen: usize,
    pub findings: Vec<ReconcileFinding>,
}

impl ReconcileReport {
    /// True when every stored amount survived unchanged.
    pub fn is_lossless(&self) -> bool {
        self.findings
            .iter()
            .all(|finding| matches!(finding, ReconcileFinding::DerivedHours { .. }))
    }

    /// Sum of stored totals that were dropped or changed by the migration.
    pub fn amount_at_risk(&self) -> Decimal {
        saturating_sum(self.findings.iter().map(|finding| match finding {
            ReconcileFinding::DerivedHours { .. } => Decimal::ZERO,
            ReconcileFinding::Drift {
                stored_total,
                derived_total,
                ..
            } => stored_total.saturating_sub(*derived_total).abs(),
            ReconcileFinding::Unrepresentable { total_amount, .. } => *total_amount,
        }))
    }
}

/// Converts a legacy snapshot into the canonical hours-only schema.
pub fn reconcile_legacy_snapshot(
    legacy: &LegacySnapshot,
) -> (PortfolioSnapshot, ReconcileReport) {
    let index = index_contractors(&legacy.contractors);
    let mut report = ReconcileReport::default();

    let projects = legacy
        .projects
        .iter()
        .map(|project| {
            let assignments = project
                .assignments
                .iter()
                .map(|assignment| {
                    report.assignments_seen += 1;
                    let contractor = index.get(assignment.contractor_id.as_str()).copied();
                    reconcile_assignment(&project.id, assignment, contractor, &mut report.findings)
                })
                .collect();
            Project {
                id: project.id.clone(),
                name: project.name.clone(),
                client: project.client.clone(),
                budget: project.budget,
                status: project.status,
                assignments,
                expenses: project.expenses.clone(),
                incomes: project.incomes.clone(),
                created_at: project.created_at,
            }
        })
        .collect();

    if report.is_lossless() {
        info!(
            "event=reconcile_done module=reconcile status=ok assignments={} findings={}",
            report.assignments_seen,
            report.findings.len()
        );
    } else {
        warn!(
            "event=reconcile_done module=reconcile status=lossy assignments={} findings={} amount_at_risk={}",
            report.assignments_seen,
            report.findings.len(),
            report.amount_at_risk()
        );
    }

    (
        PortfolioSnapshot::new(projects, legacy.contractors.clone()),
        report,
    )
}

fn reconcile_assignment(
    project_id: &str,
    assignment: &LegacyAssignment,
    contractor: Option<&Contractor>,
    findings: &mut Vec<ReconcileFinding>,
) -> Assignment {
    let canonical = Assignment::new(assignment.contractor_id.clone(), assignment.hours);

    let Some(contractor) = contractor else {
        if assignment.total_amount > Decimal::ZERO {
            findings.push(ReconcileFinding::Unrepresentable {
                project_id: project_id.to_string(),
                contractor_id: assignment.contractor_id.clone(),
                total_amount: assignment.total_amount,
                reason: UnrepresentableReason::UnresolvedContractor,
            });
        }
        return canonical;
    };

    if assignment.hours.is_zero() && assignment.total_amount > Decimal::ZERO {
        if contractor.rate.is_zero() {
            findings.push(ReconcileFinding::Unrepresentable {
                project_id: project_id.to_string(),
                contractor_id: assignment.contractor_id.clone(),
                total_amount: assignment.total_amount,
                reason: UnrepresentableReason::ZeroRate,
            });
            return canonical;
        }

        let Some(hours) = assignment.total_amount.checked_div(contractor.rate) else {
            findings.push(ReconcileFinding::Unrepresentable {
                project_id: project_id.to_string(),
                contractor_id: assignment.contractor_id.clone(),
                total_amount: assignment.total_amount,
                reason: UnrepresentableReason::Overflow,
            });
            return canonical;
        };
        findings.push(ReconcileFinding::DerivedHours {
            project_id: project_id.to_string(),
            contractor_id: assignment.contractor_id.clone(),
            hours,
        });
        push_drift(project_id, assignment, contractor.charge_for(hours), findings);
        return Assignment::new(assignment.contractor_id.clone(), hours);
    }

    push_drift(
        project_id,
        assignment,
        contractor.charge_for(assignment.hours),
        findings,
    );
    canonical
}

fn push_drift(
    project_id: &str,
    assignment: &LegacyAssignment,
    derived_total: Decimal,
    findings: &mut Vec<ReconcileFinding>,
) {
    if derived_total != assignment.total_amount {
        findings.push(ReconcileFinding::Drift {
            project_id: project_id.to_string(),
            contractor_id: assignment.contractor_id.clone(),
            stored_total: assignment.total_amount,
            derived_total,
        });
    }
}
