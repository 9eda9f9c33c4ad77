//! Elimination records.
//!
//! A participant is eliminated in the round that takes their balance from
//! positive to exactly zero. The record captures the hand they lost with and
//! the hand they lost to, which downstream claim processors use to judge
//! the loss. Records are append-only and unique per address.

use serde::{Deserialize, Serialize};

use crate::{Address, RoundId};

/// Proof of how and when a participant was eliminated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationRecord {
    /// Participant position at registration.
    pub participant_index: usize,
    /// Identity the record is keyed by.
    pub participant_address: Address,
    /// The eliminated participant's hand in the deciding round.
    pub losing_hand: String,
    /// Hand of the round winner, or of the lowest tied index on a split pot.
    pub winning_hand: String,
    /// Community cards of the deciding round (empty if pre-flop).
    pub board: String,
    /// Round in which the elimination happened.
    pub round: RoundId,
}
