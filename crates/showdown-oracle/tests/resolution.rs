//! Integration tests for the resolution pipeline:
//! prompt -> oracle -> consensus -> parsed outcome.

use std::time::Duration;

use showdown_oracle::testing::{FailingOracle, FixedOracle, RejectingConsensus, ScriptedOracle};
use showdown_oracle::{HandResolver, RubricOracle, StrictConsensus};
use showdown_types::{Disposition, Outcome, ShowdownError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn hands(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

fn strict(evaluators: usize) -> StrictConsensus {
    StrictConsensus::new(evaluators, Duration::from_secs(10))
}

#[test]
fn rubric_oracle_through_consensus_picks_trips() {
    init_tracing();
    let resolution = HandResolver::default()
        .resolve(
            &RubricOracle,
            &strict(5),
            &hands(&["♦Q♥Q", "♠K♦K", "♣2♣7"]),
            "♥K♠3♦7♣9♠2",
        )
        .unwrap();
    assert_eq!(resolution.outcome, Outcome::Winner(1));
}

#[test]
fn rubric_oracle_reports_split_pot() {
    init_tracing();
    let resolution = HandResolver::default()
        .resolve(
            &RubricOracle,
            &strict(3),
            &hands(&["♥2♦3", "♣4♠5", "♦6♣8"]),
            "♠A♦K♣Q♥J♠10",
        )
        .unwrap();
    assert_eq!(resolution.outcome.tied_indices(), vec![0, 1, 2]);
}

#[test]
fn same_round_same_digest() {
    let round = hands(&["♠A♥K", "♦9♣9"]);
    let a = HandResolver::default()
        .resolve(&RubricOracle, &strict(3), &round, "")
        .unwrap();
    let b = HandResolver::default()
        .resolve(&RubricOracle, &strict(1), &round, "")
        .unwrap();
    assert_eq!(a.digest, b.digest);
    assert_eq!(a.outcome, Outcome::Winner(1));
}

#[test]
fn one_dissenting_evaluator_fails_the_round() {
    init_tracing();
    let oracle = ScriptedOracle::new([
        r#"{"winner_index":0,"tie_players":[]}"#,
        r#"{"winner_index":0,"tie_players":[]}"#,
        r#"{"winner_index":-1,"tie_players":[0,1]}"#,
    ]);
    let err = HandResolver::default()
        .resolve(&oracle, &strict(3), &hands(&["♠A♥K", "♦9♣9"]), "")
        .unwrap_err();
    assert!(matches!(err, ShowdownError::ConsensusFailure { .. }));
    assert_eq!(oracle.calls(), 3);
}

#[test]
fn markdown_wrapped_answer_is_malformed() {
    let oracle = FixedOracle::new("```json\n{\"winner_index\":0,\"tie_players\":[]}\n```");
    let err = HandResolver::default()
        .resolve(&oracle, &strict(2), &hands(&["♠A♥K", "♦9♣9"]), "")
        .unwrap_err();
    assert!(matches!(err, ShowdownError::MalformedOracleResponse { .. }));
    // The first evaluation fails to canonicalize, so nobody else is asked.
    assert_eq!(oracle.calls(), 1);
}

#[test]
fn oracle_outage_surfaces_as_retry_later() {
    let err = HandResolver::default()
        .resolve(&FailingOracle, &strict(3), &hands(&["♠A♥K", "♦9♣9"]), "")
        .unwrap_err();
    assert!(matches!(err, ShowdownError::OracleUnavailable { .. }));
    assert_eq!(err.disposition(), Disposition::RetryLater);
}

#[test]
fn rejecting_consensus_fails_even_with_valid_answer() {
    let oracle = FixedOracle::new(r#"{"winner_index":0,"tie_players":[]}"#);
    let err = HandResolver::default()
        .resolve(&oracle, &RejectingConsensus, &hands(&["♠A♥K", "♦9♣9"]), "")
        .unwrap_err();
    assert!(matches!(err, ShowdownError::ConsensusFailure { .. }));
}

#[test]
fn undecodable_hand_is_an_input_fault() {
    let err = HandResolver::default()
        .resolve(&RubricOracle, &strict(3), &hands(&["♠A♥K", "AK"]), "")
        .unwrap_err();
    assert!(matches!(err, ShowdownError::InvalidRound { .. }));
    assert_eq!(err.disposition(), Disposition::FixInput);
}
