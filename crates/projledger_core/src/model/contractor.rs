//! Contractor domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stable contractor identifier.
pub type ContractorId = String;

/// Role assigned when the caller leaves it blank.
pub const DEFAULT_CONTRACTOR_ROLE: &str = "Contractor";

/// Person billed to projects at an hourly rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contractor {
    pub id: ContractorId,
    pub name: String,
    /// Free text, e.g. "Backend Developer".
    pub role: String,
    /// Hourly rate. Non-negative; zero is allowed for flat-fee imports.
    pub rate: Decimal,
}

impl Contractor {
    /// Creates a contractor with a generated id.
    ///
    /// A blank `role` falls back to [`DEFAULT_CONTRACTOR_ROLE`].
    pub fn new(name: impl Into<String>, role: impl Into<String>, rate: Decimal) -> Self {
        Self::with_id(super::generate_id(), name, role, rate)
    }

    /// Creates a contractor with a caller-provided id.
    pub fn with_id(
        id: impl Into<ContractorId>,
        name: impl Into<String>,
        role: impl Into<String>,
        rate: Decimal,
    ) -> Self {
        let role = role.into();
        let role = if role.trim().is_empty() {
            DEFAULT_CONTRACTOR_ROLE.to_string()
        } else {
            role
        };
        Self {
            id: id.into(),
            name: name.into(),
            role,
            rate,
        }
    }

    /// Amount credited for `hours` of work at this contractor's rate.
    ///
    /// Saturates at the `Decimal` range instead of panicking.
    pub fn charge_for(&self, hours: Decimal) -> Decimal {
        self.rate.saturating_mul(hours)
    }
}
