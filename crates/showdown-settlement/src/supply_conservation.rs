//! Supply conservation check.
//!
//! Chips enter the system only at registration and never leave it:
//! ```text
//! Σ balances (any time) == Σ balances (at registration)
//! ```
//!
//! A round that breaks this is never committed.

use showdown_types::{Chips, Result, ShowdownError, checked_sum};

/// Remembers the registered supply and checks balances against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupplyConservation {
    expected: Chips,
}

impl SupplyConservation {
    /// Fix the expected supply from the registered balances.
    pub fn from_registration(balances: &[Chips]) -> Result<Self> {
        Ok(Self {
            expected: checked_sum(balances)?,
        })
    }

    #[must_use]
    pub fn expected_supply(&self) -> Chips {
        self.expected
    }

    /// # Errors
    /// [`ShowdownError::SupplyInvariantViolation`] if the balances do not add
    /// up to the registered supply.
    pub fn verify(&self, balances: &[Chips]) -> Result<()> {
        let actual = checked_sum(balances)?;
        if actual != self.expected {
            return Err(ShowdownError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual} != expected {} across {} participants",
                    self.expected,
                    balances.len()
                ),
            });
        }
        Ok(())
    }
}
