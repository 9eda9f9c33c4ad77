//! Error types for the Showdown settlement engine.
//!
//! All errors use the `SD_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Round / initialization input validation
//! - 2xx: Balance errors
//! - 3xx: Oracle and consensus errors
//! - 4xx: Lifecycle guards
//! - 9xx: General / internal errors
//!
//! Every variant maps to a [`Disposition`] so callers can tell "retry with
//! different input" from "retry later" from "never retry".

use thiserror::Error;

use crate::Chips;

/// What a caller should do after receiving an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// The request itself is wrong. Resubmitting it unchanged fails again.
    FixInput,
    /// The request was fine but an external judgment could not be trusted.
    /// The same request may succeed later.
    RetryLater,
    /// The engine will never accept this request again.
    Permanent,
}

/// Central error enum for all Showdown operations.
#[derive(Debug, Error)]
pub enum ShowdownError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// The round input failed validation for a reason not covered below.
    #[error("SD_ERR_100: Invalid round: {reason}")]
    InvalidRound { reason: String },

    /// The board encodes a card count other than 0 or 5.
    #[error("SD_ERR_101: Board must hold exactly 0 or 5 cards, found {cards}")]
    InvalidBoard { cards: usize },

    /// Fewer hands than the minimum were supplied.
    #[error("SD_ERR_102: At least 2 hands are required, got {count}")]
    TooFewHands { count: usize },

    /// Two sequences that must be aligned by participant index differ in length.
    #[error("SD_ERR_103: Length mismatch for {field}: expected {expected}, got {actual}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A bet is negative or the bet vector does not cover every participant.
    #[error("SD_ERR_104: Invalid bet: {reason}")]
    InvalidBet { reason: String },

    /// An initial balance is negative.
    #[error("SD_ERR_105: Balance for participant {index} cannot be negative")]
    InvalidBalance { index: usize },

    /// An address could not be parsed.
    #[error("SD_ERR_106: Invalid address: {value}")]
    InvalidAddress { value: String },

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// A participant cannot cover their bet.
    #[error(
        "SD_ERR_200: Participant {index} has insufficient balance ({available}) for bet ({needed})"
    )]
    InsufficientBalance {
        index: usize,
        needed: Chips,
        available: Chips,
    },

    /// A credit or sum would exceed the 256-bit range.
    #[error("SD_ERR_201: Balance overflow")]
    BalanceOverflow,

    // =================================================================
    // Oracle Errors (3xx)
    // =================================================================
    /// Independent evaluators did not agree on the canonical judgment.
    #[error("SD_ERR_300: Consensus failure: {reason}")]
    ConsensusFailure { reason: String },

    /// The reconciled response is not a well-formed judgment.
    #[error("SD_ERR_301: Malformed oracle response: {reason}")]
    MalformedOracleResponse { reason: String },

    /// The oracle could not produce any response.
    #[error("SD_ERR_302: Oracle unavailable: {reason}")]
    OracleUnavailable { reason: String },

    /// Reconciliation took longer than the caller-supplied budget.
    #[error("SD_ERR_303: Oracle timed out after {elapsed_ms}ms (budget {budget_ms}ms)")]
    OracleTimeout { elapsed_ms: u64, budget_ms: u64 },

    // =================================================================
    // Lifecycle Errors (4xx)
    // =================================================================
    /// Participants have already been registered.
    #[error("SD_ERR_400: Tournament already initialized")]
    AlreadyInitialized,

    /// A round was submitted before participants were registered.
    #[error("SD_ERR_401: Tournament not initialized")]
    NotInitialized,

    /// The tournament has a final result; no more rounds are accepted.
    #[error("SD_ERR_402: Tournament already finished")]
    AlreadyFinished,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Chip conservation invariant violated.
    #[error("SD_ERR_900: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    /// Unrecoverable internal error.
    #[error("SD_ERR_901: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("SD_ERR_902: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (invalid config file, out-of-range values, etc.).
    #[error("SD_ERR_903: Configuration error: {0}")]
    Configuration(String),
}

impl ShowdownError {
    /// Classify the error for the caller's retry decision.
    #[must_use]
    pub fn disposition(&self) -> Disposition {
        match self {
            Self::InvalidRound { .. }
            | Self::InvalidBoard { .. }
            | Self::TooFewHands { .. }
            | Self::LengthMismatch { .. }
            | Self::InvalidBet { .. }
            | Self::InvalidBalance { .. }
            | Self::InvalidAddress { .. }
            | Self::InsufficientBalance { .. }
            | Self::BalanceOverflow
            | Self::Serialization(_)
            | Self::Configuration(_) => Disposition::FixInput,
            Self::ConsensusFailure { .. }
            | Self::MalformedOracleResponse { .. }
            | Self::OracleUnavailable { .. }
            | Self::OracleTimeout { .. }
            | Self::NotInitialized => Disposition::RetryLater,
            Self::AlreadyInitialized
            | Self::AlreadyFinished
            | Self::SupplyInvariantViolation { .. }
            | Self::Internal(_) => Disposition::Permanent,
        }
    }

    /// Whether the error came from the oracle boundary.
    #[must_use]
    pub fn is_oracle_error(&self) -> bool {
        matches!(
            self,
            Self::ConsensusFailure { .. }
                | Self::MalformedOracleResponse { .. }
                | Self::OracleUnavailable { .. }
                | Self::OracleTimeout { .. }
        )
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, ShowdownError>;

impl From<serde_json::Error> for ShowdownError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
