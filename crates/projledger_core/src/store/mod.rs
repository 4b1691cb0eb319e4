//! In-memory portfolio store with explicit commands and change notification.
//!
//! # Responsibility
//! - Own the single mutable portfolio snapshot of one session.
//! - Apply `LedgerCommand` values and notify observers of each outcome.
//! - Enforce presence checks at the data-entry boundary.
//!
//! # Invariants
//! - A rejected command leaves the snapshot unchanged.
//! - Observers run only after a command has been fully applied.
//! - Removing a contractor keeps assignments that reference it.

pub mod command;
pub mod memory;

use crate::model::contractor::ContractorId;
use crate::model::project::{EntryId, ProjectId};
use rust_decimal::Decimal;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Rejection reasons for store commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Target contractor does not exist.
    ContractorNotFound(ContractorId),
    /// Expense or income entry does not exist on the project.
    EntryNotFound {
        project_id: ProjectId,
        entry_id: EntryId,
    },
    /// Assignment position is past the end of the project's list.
    AssignmentIndexOutOfRange {
        project_id: ProjectId,
        index: usize,
        len: usize,
    },
    /// Required text field is blank after trim.
    MissingField(&'static str),
    /// Numeric field is outside its allowed range.
    InvalidAmount {
        field: &'static str,
        value: Decimal,
    },
}

impl StoreError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound(_) => "project_not_found",
            Self::ContractorNotFound(_) => "contractor_not_found",
            Self::EntryNotFound { .. } => "entry_not_found",
            Self::AssignmentIndexOutOfRange { .. } => "assignment_index_out_of_range",
            Self::MissingField(_) => "missing_field",
            Self::InvalidAmount { .. } => "invalid_amount",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::ContractorNotFound(id) => write!(f, "contractor not found: {id}"),
            Self::EntryNotFound {
                project_id,
                entry_id,
            } => write!(f, "entry {entry_id} not found in project {project_id}"),
            Self::AssignmentIndexOutOfRange {
                project_id,
                index,
                len,
            } => write!(
                f,
                "assignment index {index} out of range for project {project_id} (len {len})"
            ),
            Self::MissingField(field) => write!(f, "required field is blank: {field}"),
            Self::InvalidAmount { field, value } => {
                write!(f, "invalid value for {field}: {value}")
            }
        }
    }
}

impl Error for StoreError {}
