//! Read-only views returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, Chips, EliminationRecord, Outcome, RoundId, TournamentStatus};

/// Snapshot of everything a caller can observe about the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineState {
    pub initialized: bool,
    /// Current balances, by participant index.
    pub balances: Vec<Chips>,
    pub addresses: Vec<Address>,
    /// Hands of the last settled round.
    pub hands: Vec<String>,
    /// Board of the last settled round.
    pub board: String,
    /// Pot of the last settled round.
    pub pot: Chips,
    /// Winner of the last settled round, if it was not a tie.
    pub last_winner: Option<usize>,
    /// Tied participants of the last settled round, ascending.
    pub tie_players: Vec<usize>,
    pub is_tie: bool,
    /// Amount credited to each participant in the last settled round.
    pub last_distribution: Vec<Chips>,
    pub finished: bool,
    pub winner_index: Option<usize>,
    pub rounds_settled: u64,
}

/// The last settled round as the winner-query surface exposes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastRound {
    pub round: RoundId,
    pub hands: Vec<String>,
    pub board: String,
    pub outcome: Outcome,
}

/// Summary of one committed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: RoundId,
    pub outcome: Outcome,
    /// Total of all bets, redistributed to the outcome's recipients.
    pub pot: Chips,
    pub distribution: Vec<Chips>,
    /// Balances after the round committed.
    pub balances: Vec<Chips>,
    /// Eliminations recorded by this round only.
    pub eliminations: Vec<EliminationRecord>,
    pub status: TournamentStatus,
    /// SHA-256 (hex) of the reconciled canonical judgment.
    pub judgment_digest: String,
    pub settled_at: DateTime<Utc>,
}

impl RoundResult {
    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.outcome.is_tie()
    }
}
