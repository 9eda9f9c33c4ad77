//! Chip amounts.
//!
//! Balances, bets and pots are unsigned 256-bit integers. Negative amounts
//! cannot be expressed here; they are rejected where signed values enter
//! the system (see [`crate::request`]).

use primitive_types::U256;

use crate::{Result, ShowdownError};

/// A non-negative chip amount.
pub type Chips = U256;

/// Shorthand for building an amount from a machine integer.
#[must_use]
pub fn chips(amount: u64) -> Chips {
    Chips::from(amount)
}

/// Sum a slice of amounts, failing instead of wrapping on overflow.
///
/// # Errors
/// Returns [`ShowdownError::BalanceOverflow`] if the sum exceeds 256 bits.
pub fn checked_sum(amounts: &[Chips]) -> Result<Chips> {
    amounts.iter().try_fold(Chips::zero(), |acc, amount| {
        acc.checked_add(*amount).ok_or(ShowdownError::BalanceOverflow)
    })
}

/// Convert a signed wire amount into [`Chips`], returning `None` when negative.
#[must_use]
pub fn from_signed(amount: i128) -> Option<Chips> {
    u128::try_from(amount).ok().map(Chips::from)
}
