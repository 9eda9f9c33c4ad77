//! Tournament status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether the tournament still accepts rounds, and who won if not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Two or more participants still hold chips (or too few were registered).
    #[default]
    InProgress,
    /// Terminal. `winner` is `None` only if every balance reached zero.
    Finished { winner: Option<usize> },
}

impl TournamentStatus {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }

    /// The tournament winner, once finished with one.
    #[must_use]
    pub fn winner_index(&self) -> Option<usize> {
        match self {
            Self::InProgress => None,
            Self::Finished { winner } => *winner,
        }
    }
}

impl fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "IN_PROGRESS"),
            Self::Finished { winner: Some(index) } => write!(f, "FINISHED({index})"),
            Self::Finished { winner: None } => write!(f, "FINISHED(none)"),
        }
    }
}
