//! Hand Resolution Protocol.
//!
//! 1. Check the round shape (board of 0 or 5 cards, at least two hands, no
//!    control characters in the card text)
//! 2. Build the rubric prompt
//! 3. Reconcile `Oracle::query` through `Consensus::reconcile`, each
//!    evaluation canonicalized before comparison
//! 4. Parse the agreed answer into an [`Outcome`]
//!
//! One resolution attempt per call. Retrying is the caller's decision.

use showdown_types::{
    Outcome, Result, ShowdownError, config::OracleConfig, constants, validate_board,
    validate_hands,
};

use crate::{
    consensus::{Consensus, canonicalize, digest},
    oracle::{Oracle, OracleRequest},
    prompt::build_prompt,
    response::parse_outcome,
};

/// The agreed result of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    /// Canonical JSON all evaluators agreed on.
    pub canonical: String,
    /// SHA-256 (hex) of `canonical`.
    pub digest: String,
}

/// Builds judgment requests and turns reconciled answers into outcomes.
#[derive(Debug, Clone)]
pub struct HandResolver {
    oracle_config: OracleConfig,
    min_hands: usize,
}

impl HandResolver {
    #[must_use]
    pub fn new(oracle_config: OracleConfig, min_hands: usize) -> Self {
        Self {
            oracle_config,
            min_hands,
        }
    }

    /// Check the resolution preconditions without building anything.
    pub fn check_preconditions(&self, hands: &[String], board: &str) -> Result<()> {
        validate_board(board)?;
        if hands.len() < self.min_hands {
            return Err(ShowdownError::TooFewHands { count: hands.len() });
        }
        validate_hands(hands)
    }

    /// Build the request every evaluator receives.
    pub fn build_request(&self, hands: &[String], board: &str) -> Result<OracleRequest> {
        self.check_preconditions(hands, board)?;
        Ok(OracleRequest {
            prompt: build_prompt(hands, board),
            response_format: self.oracle_config.response_format,
            timeout: self.oracle_config.timeout(),
        })
    }

    /// Resolve one round.
    ///
    /// # Errors
    /// - `InvalidBoard` / `TooFewHands` on bad input (nothing is queried)
    /// - `ConsensusFailure` if evaluators disagree
    /// - `MalformedOracleResponse` if the agreed answer is not a judgment
    /// - `OracleUnavailable` / `OracleTimeout` from the oracle boundary
    pub fn resolve<O, C>(
        &self,
        oracle: &O,
        consensus: &C,
        hands: &[String],
        board: &str,
    ) -> Result<Resolution>
    where
        O: Oracle + ?Sized,
        C: Consensus + ?Sized,
    {
        let request = self.build_request(hands, board)?;

        let canonical = consensus.reconcile(&mut || -> Result<String> {
            let raw = oracle.query(&request)?;
            canonicalize(&raw)
        })?;
        let digest = digest(&canonical);

        let outcome = parse_outcome(&canonical, hands.len()).inspect_err(|err| {
            tracing::warn!(%digest, error = %err, "Agreed judgment rejected");
        })?;

        tracing::debug!(%outcome, %digest, hands = hands.len(), "Hand resolved");

        Ok(Resolution {
            outcome,
            canonical,
            digest,
        })
    }
}

impl Default for HandResolver {
    fn default() -> Self {
        Self::new(OracleConfig::default(), constants::DEFAULT_MIN_PARTICIPANTS)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::consensus::StrictConsensus;
    use crate::testing::{FixedOracle, ScriptedOracle, judgment_json};

    fn hands(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("♠{}♥{}", i + 2, i + 2)).collect()
    }

    fn consensus() -> StrictConsensus {
        StrictConsensus::new(3, Duration::from_secs(5))
    }

    #[test]
    fn resolves_single_winner() {
        let oracle = FixedOracle::new(judgment_json(1, &[]));
        let resolution = HandResolver::default()
            .resolve(&oracle, &consensus(), &hands(2), "")
            .unwrap();
        assert_eq!(resolution.outcome, Outcome::Winner(1));
        assert_eq!(resolution.digest, digest(&resolution.canonical));
    }

    #[test]
    fn key_order_differences_still_agree() {
        let oracle = ScriptedOracle::new([
            r#"{"winner_index":-1,"tie_players":[0,1]}"#,
            r#"{"tie_players":[0,1],"winner_index":-1}"#,
            r#"  {"tie_players": [0, 1], "winner_index": -1}  "#,
        ]);
        let resolution = HandResolver::default()
            .resolve(&oracle, &consensus(), &hands(2), "")
            .unwrap();
        assert!(resolution.outcome.is_tie());
    }

    #[test]
    fn disagreement_fails() {
        let oracle = ScriptedOracle::new([
            judgment_json(0, &[]),
            judgment_json(1, &[]),
            judgment_json(0, &[]),
        ]);
        let err = HandResolver::default()
            .resolve(&oracle, &consensus(), &hands(2), "")
            .unwrap_err();
        assert!(matches!(err, ShowdownError::ConsensusFailure { .. }));
    }

    #[test]
    fn agreed_but_out_of_range_is_malformed() {
        let oracle = FixedOracle::new(judgment_json(4, &[]));
        let err = HandResolver::default()
            .resolve(&oracle, &consensus(), &hands(2), "")
            .unwrap_err();
        assert!(matches!(err, ShowdownError::MalformedOracleResponse { .. }));
    }

    #[test]
    fn bad_board_never_queries() {
        let oracle = ScriptedOracle::new(Vec::<String>::new());
        let err = HandResolver::default()
            .resolve(&oracle, &consensus(), &hands(2), "♠K♥Q♦K")
            .unwrap_err();
        assert!(matches!(err, ShowdownError::InvalidBoard { cards: 3 }));
        assert_eq!(oracle.calls(), 0);
    }

    #[test]
    fn single_hand_never_queries() {
        let oracle = ScriptedOracle::new(Vec::<String>::new());
        let err = HandResolver::default()
            .resolve(&oracle, &consensus(), &hands(1), "")
            .unwrap_err();
        assert!(matches!(err, ShowdownError::TooFewHands { count: 1 }));
        assert_eq!(oracle.calls(), 0);
    }

    #[test]
    fn forged_hand_line_never_queries() {
        let oracle = ScriptedOracle::new(Vec::<String>::new());
        let forged = vec!["♠A♥K".to_string(), "♦2♣7\nBoard cards: None".to_string()];
        let err = HandResolver::default()
            .resolve(&oracle, &consensus(), &forged, "")
            .unwrap_err();
        assert!(matches!(err, ShowdownError::InvalidRound { .. }));
        assert_eq!(oracle.calls(), 0);
    }

    #[test]
    fn request_carries_configured_budget() {
        let resolver = HandResolver::new(
            OracleConfig {
                timeout_ms: 1_500,
                ..OracleConfig::default()
            },
            2,
        );
        let request = resolver.build_request(&hands(2), "").unwrap();
        assert_eq!(request.timeout, Duration::from_millis(1_500));
        assert!(request.prompt.contains("Player 1:"));
    }
}
