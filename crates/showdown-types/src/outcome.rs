//! Round outcomes.
//!
//! A judgment is either a single winner or a tie among a set of
//! participants. The wire form still uses `-1` for a tie (see
//! [`crate::constants::TIE_WINNER_INDEX`]), but nothing inside the engine
//! does arithmetic on that value.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::constants::TIE_WINNER_INDEX;

/// The deterministic result of resolving one round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// One participant takes the whole pot.
    Winner(usize),
    /// The pot is split among these participants. Never empty.
    Tie(BTreeSet<usize>),
}

impl Outcome {
    #[must_use]
    pub fn is_tie(&self) -> bool {
        matches!(self, Self::Tie(_))
    }

    /// The single winner, if there is one.
    #[must_use]
    pub fn winner_index(&self) -> Option<usize> {
        match self {
            Self::Winner(index) => Some(*index),
            Self::Tie(_) => None,
        }
    }

    /// Tied participants in ascending order; empty for a single winner.
    #[must_use]
    pub fn tied_indices(&self) -> Vec<usize> {
        match self {
            Self::Winner(_) => Vec::new(),
            Self::Tie(indices) => indices.iter().copied().collect(),
        }
    }

    /// Everyone who receives part of the pot, ascending.
    #[must_use]
    pub fn recipients(&self) -> Vec<usize> {
        match self {
            Self::Winner(index) => vec![*index],
            Self::Tie(indices) => indices.iter().copied().collect(),
        }
    }

    /// Whose hand an eliminated participant lost to: the winner, or the
    /// lowest tied index when the pot was split.
    #[must_use]
    pub fn reference_index(&self) -> Option<usize> {
        match self {
            Self::Winner(index) => Some(*index),
            Self::Tie(indices) => indices.first().copied(),
        }
    }

    /// Winner index in wire form: the index itself, or `-1` for a tie.
    #[must_use]
    pub fn wire_winner_index(&self) -> i64 {
        match self {
            Self::Winner(index) => i64::try_from(*index).unwrap_or(i64::MAX),
            Self::Tie(_) => TIE_WINNER_INDEX,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner(index) => write!(f, "WINNER({index})"),
            Self::Tie(indices) => {
                let list: Vec<String> = indices.iter().map(ToString::to_string).collect();
                write!(f, "TIE({})", list.join(","))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tie(indices: &[usize]) -> Outcome {
        Outcome::Tie(indices.iter().copied().collect())
    }

    #[test]
    fn winner_accessors() {
        let outcome = Outcome::Winner(2);
        assert!(!outcome.is_tie());
        assert_eq!(outcome.winner_index(), Some(2));
        assert!(outcome.tied_indices().is_empty());
        assert_eq!(outcome.recipients(), vec![2]);
        assert_eq!(outcome.wire_winner_index(), 2);
    }

    #[test]
    fn tie_accessors_are_ascending() {
        let outcome = tie(&[3, 0, 2]);
        assert!(outcome.is_tie());
        assert_eq!(outcome.winner_index(), None);
        assert_eq!(outcome.tied_indices(), vec![0, 2, 3]);
        assert_eq!(outcome.reference_index(), Some(0));
        assert_eq!(outcome.wire_winner_index(), -1);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Outcome::Winner(1)), "WINNER(1)");
        assert_eq!(format!("{}", tie(&[1, 0])), "TIE(0,1)");
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_string(&tie(&[0, 1])).unwrap();
        assert_eq!(json, r#"{"tie":[0,1]}"#);
        let back: Outcome = serde_json::from_str(r#"{"winner":3}"#).unwrap();
        assert_eq!(back, Outcome::Winner(3));
    }
}
