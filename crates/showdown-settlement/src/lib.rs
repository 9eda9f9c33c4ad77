//! # showdown-settlement
//!
//! **Settlement engine**: the ledger, elimination register, tournament state
//! machine and the round orchestrator that composes them.
//!
//! ## Architecture
//!
//! [`TournamentEngine`] is the only writer. Each round:
//! 1. Debits bets on a staged [`Ledger`] copy
//! 2. Resolves the hand through `showdown-oracle`
//! 3. Distributes the pot and checks [`SupplyConservation`]
//! 4. Detects eliminations in the [`EliminationRegister`]
//! 5. Recomputes the [`TournamentTracker`] status
//! 6. Commits everything at once, or nothing
//!
//! Rounds are serialized: `settle_round` takes `&mut self` and blocks on the
//! oracle until consensus returns.

pub mod elimination;
pub mod engine;
pub mod ledger;
pub mod supply_conservation;
pub mod tournament;

pub use elimination::{EliminationRegister, RoundTransition};
pub use engine::TournamentEngine;
pub use ledger::{Debit, Ledger};
pub use supply_conservation::SupplyConservation;
pub use tournament::{TournamentTracker, evaluate as evaluate_status};
