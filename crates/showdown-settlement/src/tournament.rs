//! Tournament state machine.
//!
//! ```text
//! InProgress ──(exactly one funded, enough registered)──> Finished(Some(i))
//!     │
//!     └──────(nobody funded)─────────────────────────────> Finished(None)
//! ```
//!
//! Status is derived from balances after every balance change and cached.
//! `Finished` is terminal.

use showdown_types::{Chips, Result, ShowdownError, TournamentStatus};

/// Derive the status from balances alone.
///
/// `registered` is the number of participants ever registered; a finish with
/// a winner needs at least `min_participants` of them.
#[must_use]
pub fn evaluate(balances: &[Chips], registered: usize, min_participants: usize) -> TournamentStatus {
    let mut funded = balances
        .iter()
        .enumerate()
        .filter(|(_, balance)| !balance.is_zero())
        .map(|(index, _)| index);

    match (funded.next(), funded.next()) {
        (None, _) => TournamentStatus::Finished { winner: None },
        (Some(index), None) if registered >= min_participants => {
            TournamentStatus::Finished { winner: Some(index) }
        }
        _ => TournamentStatus::InProgress,
    }
}

/// Cached tournament status with the terminal-state guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentTracker {
    status: TournamentStatus,
    min_participants: usize,
}

impl TournamentTracker {
    #[must_use]
    pub fn new(min_participants: usize) -> Self {
        Self {
            status: TournamentStatus::InProgress,
            min_participants,
        }
    }

    #[must_use]
    pub fn status(&self) -> TournamentStatus {
        self.status
    }

    /// # Errors
    /// `AlreadyFinished` once the tournament has a result.
    pub fn ensure_open(&self) -> Result<()> {
        if self.status.is_finished() {
            return Err(ShowdownError::AlreadyFinished);
        }
        Ok(())
    }

    /// Re-derive the status after a balance change. A finished tournament
    /// stays finished whatever the balances say.
    pub fn recompute(&mut self, balances: &[Chips]) -> TournamentStatus {
        if self.status.is_finished() {
            return self.status;
        }
        self.status = evaluate(balances, balances.len(), self.min_participants);
        if let TournamentStatus::Finished { winner } = self.status {
            tracing::info!(?winner, participants = balances.len(), "Tournament finished");
        }
        self.status
    }
}
