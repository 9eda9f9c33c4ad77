//! Round orchestration.
//!
//! [`TournamentEngine::settle_round`] runs one round as a single unit:
//! 1. Reject if the tournament is finished (or was never initialized)
//! 2. Check board size, hand count and bet alignment
//! 3. Debit bets on a staged copy of the ledger
//! 4. Resolve the hand through oracle + consensus
//! 5. Distribute the pot on the staged ledger and check supply conservation
//! 6. Detect eliminations against the pre/post balances
//! 7. Recompute the tournament status
//! 8. Commit: swap in the staged ledger, append eliminations, remember the
//!    round
//!
//! Steps 1-7 only read engine state. Any error before step 8 returns with
//! the engine exactly as it was.

use chrono::Utc;
use showdown_oracle::{Consensus, HandResolver, Oracle, Resolution, StrictConsensus};
use showdown_types::{
    Address, Chips, EliminationRecord, EngineConfig, EngineState, InitializeRequest, LastRound,
    Outcome, Registration, Result, RoundId, RoundInput, RoundResult, SettleRoundRequest,
    ShowdownError, TournamentStatus,
};

use crate::{
    elimination::{EliminationRegister, RoundTransition},
    ledger::Ledger,
    supply_conservation::SupplyConservation,
    tournament::TournamentTracker,
};

/// A round that passed every check but is not yet visible.
struct StagedRound {
    round: RoundId,
    ledger: Ledger,
    pot: Chips,
    distribution: Vec<Chips>,
    resolution: Resolution,
    eliminations: Vec<EliminationRecord>,
    tournament: TournamentTracker,
}

/// The settlement engine. Sole writer of the ledger.
pub struct TournamentEngine<O, C> {
    config: EngineConfig,
    oracle: O,
    consensus: C,
    resolver: HandResolver,
    ledger: Ledger,
    supply: SupplyConservation,
    eliminations: EliminationRegister,
    tournament: TournamentTracker,
    last_round: Option<LastRound>,
    last_pot: Chips,
    rounds_settled: u64,
}

impl<O: Oracle, C: Consensus> TournamentEngine<O, C> {
    /// Engine with the default configuration.
    pub fn new(oracle: O, consensus: C) -> Self {
        Self::build(EngineConfig::default(), oracle, consensus)
    }

    /// # Errors
    /// `Configuration` if `config` does not validate.
    pub fn with_config(config: EngineConfig, oracle: O, consensus: C) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, oracle, consensus))
    }

    fn build(config: EngineConfig, oracle: O, consensus: C) -> Self {
        let resolver = HandResolver::new(config.oracle.clone(), config.min_participants);
        let tournament = TournamentTracker::new(config.min_participants);
        Self {
            config,
            oracle,
            consensus,
            resolver,
            ledger: Ledger::new(),
            supply: SupplyConservation::default(),
            eliminations: EliminationRegister::new(),
            tournament,
            last_round: None,
            last_pot: Chips::zero(),
            rounds_settled: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register participants once. The status is derived immediately, so a
    /// registration with a single funded participant is already finished.
    ///
    /// # Errors
    /// `AlreadyInitialized`, `LengthMismatch`, `BalanceOverflow`.
    pub fn initialize(&mut self, balances: Vec<Chips>, addresses: Vec<Address>) -> Result<()> {
        let mut ledger = self.ledger.clone();
        ledger.initialize(balances, addresses)?;
        let supply = SupplyConservation::from_registration(ledger.balances())?;

        self.ledger = ledger;
        self.supply = supply;
        let status = self.tournament.recompute(self.ledger.balances());

        tracing::info!(
            participants = self.ledger.participant_count(),
            supply = %self.supply.expected_supply(),
            %status,
            "Tournament initialized"
        );
        Ok(())
    }

    /// [`Self::initialize`] from a signed wire request.
    ///
    /// # Errors
    /// `InvalidBalance` / `InvalidAddress` for bad wire values, plus
    /// everything [`Self::initialize`] returns.
    pub fn initialize_request(&mut self, request: InitializeRequest) -> Result<()> {
        let registration = Registration::try_from(request)?;
        self.initialize(registration.balances, registration.addresses)
    }

    // -----------------------------------------------------------------------
    // Settlement
    // -----------------------------------------------------------------------

    /// Settle one round.
    ///
    /// # Errors
    /// - `AlreadyFinished` / `NotInitialized` before anything else is looked at
    /// - `InvalidBoard`, `TooFewHands`, `LengthMismatch`, `InvalidBet`,
    ///   `InsufficientBalance` for bad input
    /// - `ConsensusFailure`, `MalformedOracleResponse`, `OracleUnavailable`,
    ///   `OracleTimeout` from resolution
    /// - `SupplyInvariantViolation` / `BalanceOverflow` / `Internal` if the
    ///   arithmetic does not add up
    ///
    /// On every error the engine state is unchanged.
    pub fn settle_round(&mut self, input: RoundInput) -> Result<RoundResult> {
        let staged = self.stage(&input).inspect_err(|err| {
            tracing::warn!(
                round = %RoundId(self.rounds_settled).next(),
                error = %err,
                disposition = ?err.disposition(),
                "Round rejected"
            );
        })?;
        Ok(self.commit(input, staged))
    }

    /// [`Self::settle_round`] from a signed wire request.
    ///
    /// # Errors
    /// `AlreadyFinished` / `NotInitialized` first, then `InvalidBet` for a
    /// negative bet, plus everything [`Self::settle_round`] returns.
    pub fn settle_round_request(&mut self, request: SettleRoundRequest) -> Result<RoundResult> {
        // Lifecycle gates win over wire decoding errors.
        self.ensure_accepting()?;
        let input = RoundInput::try_from(request)?;
        self.settle_round(input)
    }

    fn ensure_accepting(&self) -> Result<()> {
        self.tournament.ensure_open()?;
        if !self.ledger.is_initialized() {
            return Err(ShowdownError::NotInitialized);
        }
        Ok(())
    }

    fn stage(&self, input: &RoundInput) -> Result<StagedRound> {
        self.ensure_accepting()?;
        input.validate_shape(self.config.min_participants)?;

        let round = RoundId(self.rounds_settled).next();
        let mut ledger = self.ledger.clone();
        let debit = ledger.validate_and_debit(&input.bets)?;

        let resolution =
            self.resolver
                .resolve(&self.oracle, &self.consensus, &input.hands, &input.board)?;

        let distribution = ledger.distribute_pot(debit.pot, &resolution.outcome)?;
        self.supply.verify(ledger.balances())?;
        tracing::debug!(%round, pot = %debit.pot, ?distribution, "Pot distributed");

        let eliminations = self.eliminations.detect(&RoundTransition {
            round,
            pre_balances: &debit.pre_balances,
            post_balances: ledger.balances(),
            hands: &input.hands,
            board: &input.board,
            outcome: &resolution.outcome,
            addresses: ledger.addresses(),
        })?;

        let mut tournament = self.tournament;
        tournament.recompute(ledger.balances());

        Ok(StagedRound {
            round,
            ledger,
            pot: debit.pot,
            distribution,
            resolution,
            eliminations,
            tournament,
        })
    }

    fn commit(&mut self, input: RoundInput, staged: StagedRound) -> RoundResult {
        let StagedRound {
            round,
            ledger,
            pot,
            distribution,
            resolution,
            eliminations,
            tournament,
        } = staged;

        self.ledger = ledger;
        self.eliminations.append(eliminations.clone());
        self.tournament = tournament;
        self.last_pot = pot;
        self.rounds_settled = round.0;
        self.last_round = Some(LastRound {
            round,
            hands: input.hands,
            board: input.board,
            outcome: resolution.outcome.clone(),
        });

        let status = self.tournament.status();
        tracing::info!(
            %round,
            outcome = %resolution.outcome,
            %pot,
            digest = %resolution.digest,
            eliminated = eliminations.len(),
            %status,
            "Round settled"
        );

        RoundResult {
            round,
            outcome: resolution.outcome,
            pot,
            distribution,
            balances: self.ledger.balances().to_vec(),
            eliminations,
            status,
            judgment_digest: resolution.digest,
            settled_at: Utc::now(),
        }
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn state(&self) -> EngineState {
        let outcome = self.last_round.as_ref().map(|last| &last.outcome);
        let status = self.tournament.status();
        EngineState {
            initialized: self.ledger.is_initialized(),
            balances: self.ledger.balances().to_vec(),
            addresses: self.ledger.addresses().to_vec(),
            hands: self
                .last_round
                .as_ref()
                .map(|last| last.hands.clone())
                .unwrap_or_default(),
            board: self
                .last_round
                .as_ref()
                .map(|last| last.board.clone())
                .unwrap_or_default(),
            pot: self.last_pot,
            last_winner: outcome.and_then(Outcome::winner_index),
            tie_players: outcome.map(Outcome::tied_indices).unwrap_or_default(),
            is_tie: outcome.is_some_and(Outcome::is_tie),
            last_distribution: self.ledger.last_distribution().to_vec(),
            finished: status.is_finished(),
            winner_index: status.winner_index(),
            rounds_settled: self.rounds_settled,
        }
    }

    #[must_use]
    pub fn eliminations(&self) -> &[EliminationRecord] {
        self.eliminations.all()
    }

    #[must_use]
    pub fn elimination_for(&self, address: &Address) -> Option<&EliminationRecord> {
        self.eliminations.for_address(address)
    }

    /// Outcome, hands and board of the most recent round.
    #[must_use]
    pub fn last_winner(&self) -> Option<&LastRound> {
        self.last_round.as_ref()
    }

    #[must_use]
    pub fn status(&self) -> TournamentStatus {
        self.tournament.status()
    }

    /// Address of the tournament winner, once there is one.
    #[must_use]
    pub fn tournament_winner_address(&self) -> Option<Address> {
        self.tournament
            .status()
            .winner_index()
            .and_then(|index| self.ledger.address(index))
    }

    #[must_use]
    pub fn balances(&self) -> &[Chips] {
        self.ledger.balances()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }
}

impl<O: Oracle> TournamentEngine<O, StrictConsensus> {
    /// Engine whose consensus runs `config.consensus.evaluators` evaluations
    /// within `config.oracle.timeout_ms`.
    ///
    /// # Errors
    /// `Configuration` if `config` does not validate.
    pub fn with_strict_consensus(config: EngineConfig, oracle: O) -> Result<Self> {
        config.validate()?;
        let consensus = StrictConsensus::new(config.consensus.evaluators, config.oracle.timeout());
        Self::with_config(config, oracle, consensus)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use showdown_oracle::testing::{FixedOracle, ScriptedOracle, judgment_json};
    use showdown_types::chips;

    use super::*;

    fn amounts(values: &[u64]) -> Vec<Chips> {
        values.iter().map(|v| chips(*v)).collect()
    }

    fn hands(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("♠{}♥{}", i + 2, i + 3)).collect()
    }

    fn engine<O: Oracle>(oracle: O, balances: &[u64]) -> TournamentEngine<O, StrictConsensus> {
        let mut engine =
            TournamentEngine::new(oracle, StrictConsensus::new(3, Duration::from_secs(5)));
        let addresses = (0..balances.len())
            .map(|i| Address::dummy(u8::try_from(i).unwrap()))
            .collect();
        engine.initialize(amounts(balances), addresses).unwrap();
        engine
    }

    #[test]
    fn settle_before_initialize() {
        let mut engine = TournamentEngine::new(
            FixedOracle::new(judgment_json(0, &[])),
            StrictConsensus::new(1, Duration::from_secs(1)),
        );
        let err = engine
            .settle_round(RoundInput::new(hands(2), "", amounts(&[0, 0])))
            .unwrap_err();
        assert!(matches!(err, ShowdownError::NotInitialized));
        assert_eq!(engine.oracle().calls(), 0);
    }

    #[test]
    fn round_ids_count_committed_rounds_only() {
        let oracle = ScriptedOracle::new([
            judgment_json(0, &[]),
            judgment_json(0, &[]),
            judgment_json(0, &[]),
            "garbage".to_string(),
            judgment_json(1, &[]),
            judgment_json(1, &[]),
            judgment_json(1, &[]),
        ]);
        let mut engine = engine(oracle, &[100, 100]);

        let first = engine
            .settle_round(RoundInput::new(hands(2), "", amounts(&[10, 10])))
            .unwrap();
        assert_eq!(first.round, RoundId(1));

        assert!(
            engine
                .settle_round(RoundInput::new(hands(2), "", amounts(&[10, 10])))
                .is_err()
        );

        let second = engine
            .settle_round(RoundInput::new(hands(2), "", amounts(&[10, 10])))
            .unwrap();
        assert_eq!(second.round, RoundId(2));
        assert_eq!(engine.state().rounds_settled, 2);
        assert_eq!(engine.balances(), amounts(&[100, 100]).as_slice());
    }

    #[test]
    fn state_reflects_last_tie() {
        let mut engine = engine(FixedOracle::new(judgment_json(-1, &[0, 1])), &[50, 50, 50]);
        let result = engine
            .settle_round(RoundInput::new(hands(3), "", amounts(&[5, 5, 5])))
            .unwrap();
        assert!(result.is_tie());

        let state = engine.state();
        assert!(state.is_tie);
        assert_eq!(state.last_winner, None);
        assert_eq!(state.tie_players, vec![0, 1]);
        assert_eq!(state.pot, chips(15));
        assert_eq!(state.last_distribution, amounts(&[8, 7, 0]));
        assert_eq!(state.balances, amounts(&[53, 52, 45]));
        assert_eq!(state.hands, hands(3));
    }

    #[test]
    fn rejected_config() {
        let config = EngineConfig {
            min_participants: 1,
            ..EngineConfig::default()
        };
        let result = TournamentEngine::with_strict_consensus(config, FixedOracle::new("{}"));
        assert!(matches!(result, Err(ShowdownError::Configuration(_))));
    }

    #[test]
    fn winner_address_once_finished() {
        let mut engine = engine(FixedOracle::new(judgment_json(1, &[])), &[100, 100]);
        assert_eq!(engine.tournament_winner_address(), None);
        engine
            .settle_round(RoundInput::new(hands(2), "", amounts(&[100, 100])))
            .unwrap();
        assert_eq!(engine.tournament_winner_address(), Some(Address::dummy(1)));
        assert_eq!(engine.last_winner().unwrap().outcome, Outcome::Winner(1));
    }
}
