//! # showdown-types
//!
//! Shared types, errors, and configuration for the **Showdown** round
//! settlement engine.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identities**: [`Address`], [`RoundId`]
//! - **Amounts**: [`Chips`] (unsigned 256-bit)
//! - **Round model**: [`RoundInput`], board validation
//! - **Outcome model**: [`Outcome`]
//! - **Records**: [`EliminationRecord`], [`TournamentStatus`]
//! - **Views**: [`EngineState`], [`LastRound`], [`RoundResult`]
//! - **Wire requests**: [`InitializeRequest`], [`SettleRoundRequest`]
//! - **Configuration**: [`EngineConfig`], [`ConsensusConfig`], [`OracleConfig`]
//! - **Errors**: [`ShowdownError`] with `SD_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod address;
pub mod amount;
pub mod config;
pub mod constants;
pub mod elimination;
pub mod error;
pub mod outcome;
pub mod request;
pub mod round;
pub mod state;
pub mod tournament;

pub use address::*;
pub use amount::{Chips, checked_sum, chips};
pub use config::*;
pub use elimination::*;
pub use error::*;
pub use outcome::*;
pub use request::*;
pub use round::*;
pub use state::*;
pub use tournament::*;

// Constants are accessed via `showdown_types::constants::FOO`
// (not re-exported to avoid name collisions).
