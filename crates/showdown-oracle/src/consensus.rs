//! Consensus reconciliation.
//!
//! A judgment is only trusted once several independent evaluations agree on
//! it byte for byte. Agreement is checked on a canonical serialization
//! (JSON with sorted keys and no insignificant whitespace), so two answers
//! that differ only in key order or spacing still agree.

use std::time::{Duration, Instant};

use serde_json::Value;
use sha2::{Digest, Sha256};
use showdown_types::{Result, ShowdownError};

/// Forces non-deterministic producers into a single agreed result.
pub trait Consensus {
    /// Run `producer` once per evaluator and return the common result.
    ///
    /// # Errors
    /// [`ShowdownError::ConsensusFailure`] if the results differ. Errors
    /// raised by `producer` are returned unchanged.
    fn reconcile(&self, producer: &mut dyn FnMut() -> Result<String>) -> Result<String>;
}

impl<C: Consensus + ?Sized> Consensus for &C {
    fn reconcile(&self, producer: &mut dyn FnMut() -> Result<String>) -> Result<String> {
        (**self).reconcile(producer)
    }
}

impl<C: Consensus + ?Sized> Consensus for Box<C> {
    fn reconcile(&self, producer: &mut dyn FnMut() -> Result<String>) -> Result<String> {
        (**self).reconcile(producer)
    }
}

/// Strict-equality consensus over `evaluators` sequential evaluations.
///
/// The first evaluation becomes the candidate; every further evaluation must
/// equal it exactly. The whole run must fit in `budget`.
#[derive(Debug, Clone)]
pub struct StrictConsensus {
    evaluators: usize,
    budget: Duration,
}

impl StrictConsensus {
    /// # Panics
    /// Panics if `evaluators` is zero.
    #[must_use]
    pub fn new(evaluators: usize, budget: Duration) -> Self {
        assert!(evaluators > 0, "StrictConsensus evaluators must be > 0");
        Self { evaluators, budget }
    }

    fn check_budget(&self, started: Instant) -> Result<()> {
        let elapsed = started.elapsed();
        if elapsed > self.budget {
            return Err(ShowdownError::OracleTimeout {
                elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                budget_ms: u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }
}

impl Consensus for StrictConsensus {
    fn reconcile(&self, producer: &mut dyn FnMut() -> Result<String>) -> Result<String> {
        let started = Instant::now();
        let candidate = producer()?;
        self.check_budget(started)?;
        tracing::debug!(
            evaluator = 0,
            digest = %digest(&candidate),
            "Evaluation produced"
        );

        for evaluator in 1..self.evaluators {
            let result = producer()?;
            self.check_budget(started)?;
            if result != candidate {
                tracing::warn!(
                    evaluator,
                    expected = %digest(&candidate),
                    actual = %digest(&result),
                    "Evaluators disagree"
                );
                return Err(ShowdownError::ConsensusFailure {
                    reason: format!(
                        "evaluator {evaluator} disagrees: expected {}, got {}",
                        digest(&candidate),
                        digest(&result)
                    ),
                });
            }
            tracing::debug!(evaluator, "Evaluation agrees");
        }

        Ok(candidate)
    }
}

/// Canonical serialization of a raw JSON answer.
///
/// # Errors
/// [`ShowdownError::MalformedOracleResponse`] if the text is empty or not JSON.
pub fn canonicalize(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ShowdownError::MalformedOracleResponse {
            reason: "empty response".into(),
        });
    }
    let value: Value =
        serde_json::from_str(trimmed).map_err(|e| ShowdownError::MalformedOracleResponse {
            reason: format!("response is not JSON: {e}"),
        })?;
    // serde_json maps are ordered by key, so re-serializing sorts them.
    serde_json::to_string(&value).map_err(|e| ShowdownError::Serialization(e.to_string()))
}

/// SHA-256 of a canonical result, hex encoded.
#[must_use]
pub fn digest(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(b"showdown:judgment:v1:");
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}
