//! # showdown-oracle
//!
//! **Hand Resolution Protocol**: turns a round's hands and board into a
//! single deterministic [`Outcome`](showdown_types::Outcome).
//!
//! ## Architecture
//!
//! The judgment source is non-deterministic, so nothing it says is used
//! directly:
//! 1. [`HandResolver`] checks the round shape and builds a fixed-rubric prompt
//! 2. [`Consensus::reconcile`] runs [`Oracle::query`] once per evaluator and
//!    requires every canonicalized answer to match exactly
//! 3. The agreed answer is parsed and range-checked into an outcome
//!
//! Both seams are traits, so a host environment plugs in its own networked
//! evaluators and tests plug in fixed answers. [`RubricOracle`] applies the
//! rubric mechanically for offline use.

pub mod cards;
pub mod consensus;
pub mod evaluator;
pub mod oracle;
pub mod prompt;
pub mod resolver;
pub mod response;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use consensus::{Consensus, StrictConsensus, canonicalize, digest};
pub use evaluator::{HandCategory, HandRank, RubricOracle, best_hand};
pub use oracle::{Oracle, OracleRequest};
pub use resolver::{HandResolver, Resolution};
pub use response::{WireJudgment, parse_outcome};
