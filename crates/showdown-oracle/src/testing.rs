//! Deterministic stand-ins for the oracle boundary.
//!
//! Available under `cfg(test)` and the `test-helpers` feature.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

use showdown_types::{Result, ShowdownError};

use crate::{
    consensus::Consensus,
    oracle::{Oracle, OracleRequest},
};

/// Judgment JSON in the shape the rubric asks for.
#[must_use]
pub fn judgment_json(winner_index: i64, tie_players: &[i64]) -> String {
    serde_json::json!({
        "winner_index": winner_index,
        "tie_players": tie_players,
    })
    .to_string()
}

/// Answers every query with the same text.
#[derive(Debug)]
pub struct FixedOracle {
    response: String,
    calls: Cell<usize>,
}

impl FixedOracle {
    #[must_use]
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: Cell::new(0),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl Oracle for FixedOracle {
    fn query(&self, _request: &OracleRequest) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.response.clone())
    }
}

/// Answers queries from a script, in order. Runs dry with `OracleUnavailable`.
#[derive(Debug)]
pub struct ScriptedOracle {
    responses: RefCell<VecDeque<String>>,
    calls: Cell<usize>,
}

impl ScriptedOracle {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: RefCell::new(responses.into_iter().map(Into::into).collect()),
            calls: Cell::new(0),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.responses.borrow().len()
    }
}

impl Oracle for ScriptedOracle {
    fn query(&self, _request: &OracleRequest) -> Result<String> {
        self.calls.set(self.calls.get() + 1);
        self.responses
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ShowdownError::OracleUnavailable {
                reason: "script exhausted".into(),
            })
    }
}

/// Never answers.
#[derive(Debug, Default)]
pub struct FailingOracle;

impl Oracle for FailingOracle {
    fn query(&self, _request: &OracleRequest) -> Result<String> {
        Err(ShowdownError::OracleUnavailable {
            reason: "oracle offline".into(),
        })
    }
}

/// Runs the producer once, then refuses to agree.
#[derive(Debug, Default)]
pub struct RejectingConsensus;

impl Consensus for RejectingConsensus {
    fn reconcile(&self, producer: &mut dyn FnMut() -> Result<String>) -> Result<String> {
        let _ = producer()?;
        Err(ShowdownError::ConsensusFailure {
            reason: "validators rejected the leader's result".into(),
        })
    }
}
