//! System-wide constants for the Showdown settlement engine.

/// Wire value of `winner_index` meaning "the round ended in a tie".
pub const TIE_WINNER_INDEX: i64 = -1;

/// Suit markers used by the card notation (`♠A♥K`). One marker per card.
pub const SUIT_MARKERS: [char; 4] = ['♠', '♥', '♦', '♣'];

/// Board size before the flop is dealt.
pub const PREFLOP_BOARD_CARDS: usize = 0;

/// Board size once all community cards are out.
pub const FULL_BOARD_CARDS: usize = 5;

/// Minimum number of hands in a round, and of registered participants
/// required before a tournament can finish with a winner.
pub const DEFAULT_MIN_PARTICIPANTS: usize = 2;

/// Default number of independent evaluations reconciled per round.
pub const DEFAULT_EVALUATORS: usize = 3;

/// Default budget for a full oracle reconciliation, in milliseconds.
pub const DEFAULT_ORACLE_TIMEOUT_MS: u64 = 30_000;

/// Length in bytes of a participant address.
pub const ADDRESS_LEN: usize = 20;
