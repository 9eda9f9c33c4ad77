//! Parsing a reconciled answer into an [`Outcome`].
//!
//! Accepted shapes:
//! - `{"winner_index": i, "tie_players": []}` with `0 <= i < participants`
//! - `{"winner_index": -1, "tie_players": [j, ...]}` with every `j` in range
//!   and no duplicates
//!
//! Anything else is [`ShowdownError::MalformedOracleResponse`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use showdown_types::{Outcome, Result, ShowdownError, constants::TIE_WINNER_INDEX};

/// Judgment as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireJudgment {
    pub winner_index: i64,
    pub tie_players: Vec<i64>,
}

impl WireJudgment {
    #[must_use]
    pub fn from_outcome(outcome: &Outcome) -> Self {
        Self {
            winner_index: outcome.wire_winner_index(),
            tie_players: outcome
                .tied_indices()
                .into_iter()
                .map(|i| i64::try_from(i).unwrap_or(i64::MAX))
                .collect(),
        }
    }
}

fn malformed(reason: impl Into<String>) -> ShowdownError {
    ShowdownError::MalformedOracleResponse {
        reason: reason.into(),
    }
}

fn index_in_range(raw: i64, participants: usize) -> Option<usize> {
    usize::try_from(raw).ok().filter(|i| *i < participants)
}

/// Parse a canonical answer for a round with `participants` hands.
pub fn parse_outcome(canonical: &str, participants: usize) -> Result<Outcome> {
    let wire: WireJudgment = serde_json::from_str(canonical)
        .map_err(|e| malformed(format!("missing or mistyped field: {e}")))?;

    match wire.winner_index {
        TIE_WINNER_INDEX => {
            if wire.tie_players.is_empty() {
                return Err(malformed("tie declared with an empty tie_players list"));
            }
            let mut tied = BTreeSet::new();
            for raw in &wire.tie_players {
                let index = index_in_range(*raw, participants).ok_or_else(|| {
                    malformed(format!(
                        "tied index {raw} outside [0, {participants})"
                    ))
                })?;
                if !tied.insert(index) {
                    return Err(malformed(format!("tied index {raw} listed twice")));
                }
            }
            Ok(Outcome::Tie(tied))
        }
        raw => {
            let index = index_in_range(raw, participants).ok_or_else(|| {
                malformed(format!(
                    "winner_index {raw} outside [-1, {participants})"
                ))
            })?;
            if !wire.tie_players.is_empty() {
                return Err(malformed(format!(
                    "winner_index {raw} given together with tie_players"
                )));
            }
            Ok(Outcome::Winner(index))
        }
    }
}
