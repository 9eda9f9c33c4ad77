//! Participant balances.
//!
//! The ledger is created once by [`Ledger::initialize`] and afterwards only
//! changes through a debit followed by a pot distribution. It is `Clone` so
//! the orchestrator can stage a round on a copy and swap it in on commit.

use primitive_types::U256;
use showdown_types::{Address, Chips, Outcome, Result, ShowdownError, checked_sum};

/// What a successful debit hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Debit {
    /// Balances as they were before the bets were taken.
    pub pre_balances: Vec<Chips>,
    /// Sum of all bets.
    pub pot: Chips,
}

/// Per-participant balances, indexed by registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    initialized: bool,
    balances: Vec<Chips>,
    addresses: Vec<Address>,
    /// Credit per participant from the most recent distribution.
    last_distribution: Vec<Chips>,
}

impl Ledger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register participants. Index assignment is permanent.
    ///
    /// # Errors
    /// - `AlreadyInitialized` on a second call
    /// - `LengthMismatch` if `balances` and `addresses` differ in length
    pub fn initialize(&mut self, balances: Vec<Chips>, addresses: Vec<Address>) -> Result<()> {
        if self.initialized {
            return Err(ShowdownError::AlreadyInitialized);
        }
        if balances.len() != addresses.len() {
            return Err(ShowdownError::LengthMismatch {
                field: "addresses",
                expected: balances.len(),
                actual: addresses.len(),
            });
        }
        // Rejects a registration whose total cannot be represented.
        checked_sum(&balances)?;

        self.last_distribution = vec![Chips::zero(); balances.len()];
        self.balances = balances;
        self.addresses = addresses;
        self.initialized = true;
        Ok(())
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.balances.len()
    }

    #[must_use]
    pub fn balances(&self) -> &[Chips] {
        &self.balances
    }

    #[must_use]
    pub fn balance(&self, index: usize) -> Option<Chips> {
        self.balances.get(index).copied()
    }

    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    #[must_use]
    pub fn address(&self, index: usize) -> Option<Address> {
        self.addresses.get(index).copied()
    }

    #[must_use]
    pub fn last_distribution(&self) -> &[Chips] {
        &self.last_distribution
    }

    /// Sum of all balances.
    pub fn total(&self) -> Result<Chips> {
        checked_sum(&self.balances)
    }

    /// Indices of participants that still hold chips, ascending.
    #[must_use]
    pub fn funded_indices(&self) -> Vec<usize> {
        self.balances
            .iter()
            .enumerate()
            .filter(|(_, balance)| !balance.is_zero())
            .map(|(index, _)| index)
            .collect()
    }

    /// Take one bet from every participant.
    ///
    /// All checks run before any balance changes, so an error leaves the
    /// ledger untouched.
    ///
    /// # Errors
    /// - `NotInitialized` before [`Ledger::initialize`]
    /// - `InvalidBet` if there is not exactly one bet per participant
    /// - `InsufficientBalance` naming the first index that cannot cover its bet
    /// - `BalanceOverflow` if the pot cannot be represented
    pub fn validate_and_debit(&mut self, bets: &[Chips]) -> Result<Debit> {
        if !self.initialized {
            return Err(ShowdownError::NotInitialized);
        }
        if bets.len() != self.balances.len() {
            return Err(ShowdownError::InvalidBet {
                reason: format!(
                    "expected {} bets (one per participant), got {}",
                    self.balances.len(),
                    bets.len()
                ),
            });
        }
        for (index, (bet, balance)) in bets.iter().zip(&self.balances).enumerate() {
            if bet > balance {
                return Err(ShowdownError::InsufficientBalance {
                    index,
                    needed: *bet,
                    available: *balance,
                });
            }
        }
        let pot = checked_sum(bets)?;

        let pre_balances = self.balances.clone();
        for (balance, bet) in self.balances.iter_mut().zip(bets) {
            *balance -= *bet;
        }

        Ok(Debit { pre_balances, pot })
    }

    /// Credit `pot` to the outcome's recipients and return the per-index
    /// distribution.
    ///
    /// A tie among `k` participants credits `pot / k` to each; the remaining
    /// `pot % k` units go one each to the tied participants in ascending index
    /// order.
    ///
    /// # Errors
    /// - `Internal` if the outcome names a participant that does not exist
    /// - `BalanceOverflow` if a credit cannot be represented
    pub fn distribute_pot(&mut self, pot: Chips, outcome: &Outcome) -> Result<Vec<Chips>> {
        let recipients = outcome.recipients();
        if recipients.is_empty() {
            return Err(ShowdownError::Internal("outcome has no recipients".into()));
        }
        if let Some(index) = recipients.iter().find(|i| **i >= self.balances.len()) {
            return Err(ShowdownError::Internal(format!(
                "outcome names participant {index} but only {} are registered",
                self.balances.len()
            )));
        }

        let mut distribution = vec![Chips::zero(); self.balances.len()];
        let k = U256::from(recipients.len());
        let share = pot / k;
        // `remainder < k <= usize::MAX`, so the low word holds all of it.
        let remainder = (pot % k).low_u64();

        for (position, index) in recipients.iter().enumerate() {
            let extra = u64::try_from(position).is_ok_and(|p| p < remainder);
            distribution[*index] = if extra { share + Chips::one() } else { share };
        }

        let mut credited = self.balances.clone();
        for (balance, amount) in credited.iter_mut().zip(&distribution) {
            *balance = balance
                .checked_add(*amount)
                .ok_or(ShowdownError::BalanceOverflow)?;
        }
        self.balances = credited;
        self.last_distribution.clone_from(&distribution);

        Ok(distribution)
    }
}
