//! Elimination register: at most one record per address, ever.
//!
//! Records are appended in the order they are detected and never removed or
//! rewritten. A participant whose address already holds a record is skipped,
//! as is anyone who entered the round with nothing (they cannot be
//! eliminated twice).

use std::collections::{HashMap, HashSet};

use showdown_types::{Address, Chips, EliminationRecord, Outcome, Result, RoundId, ShowdownError};

/// Everything the tracker needs to know about one settled round.
#[derive(Debug, Clone, Copy)]
pub struct RoundTransition<'a> {
    pub round: RoundId,
    pub pre_balances: &'a [Chips],
    pub post_balances: &'a [Chips],
    pub hands: &'a [String],
    pub board: &'a str,
    pub outcome: &'a Outcome,
    pub addresses: &'a [Address],
}

/// Append-only elimination records keyed by address.
#[derive(Debug, Clone, Default)]
pub struct EliminationRegister {
    /// Records in detection order.
    records: Vec<EliminationRecord>,
    /// Address -> position in `records`.
    by_address: HashMap<Address, usize>,
}

impl EliminationRegister {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every participant this round took from positive to zero.
    ///
    /// Returns only the records added by this call.
    ///
    /// # Errors
    /// `Internal` if the snapshots, hands and addresses are not aligned, or
    /// the outcome points outside `hands`. Nothing is recorded on error.
    pub fn detect_and_record(
        &mut self,
        transition: &RoundTransition<'_>,
    ) -> Result<Vec<EliminationRecord>> {
        let added = self.detect(transition)?;
        self.append(added.clone());
        Ok(added)
    }

    /// The records [`Self::detect_and_record`] would add, without adding them.
    pub fn detect(&self, transition: &RoundTransition<'_>) -> Result<Vec<EliminationRecord>> {
        let participants = transition.pre_balances.len();
        if transition.post_balances.len() != participants
            || transition.hands.len() != participants
            || transition.addresses.len() != participants
        {
            return Err(ShowdownError::Internal(format!(
                "misaligned round transition: pre={participants} post={} hands={} addresses={}",
                transition.post_balances.len(),
                transition.hands.len(),
                transition.addresses.len()
            )));
        }

        let winning_hand = transition
            .outcome
            .reference_index()
            .and_then(|index| transition.hands.get(index))
            .ok_or_else(|| {
                ShowdownError::Internal(format!(
                    "outcome {} has no hand among {participants}",
                    transition.outcome
                ))
            })?;

        let mut seen = HashSet::new();
        let mut detected = Vec::new();
        for index in 0..participants {
            let was_funded = !transition.pre_balances[index].is_zero();
            let is_empty = transition.post_balances[index].is_zero();
            if !(was_funded && is_empty) {
                continue;
            }
            let address = transition.addresses[index];
            if self.by_address.contains_key(&address) || !seen.insert(address) {
                continue;
            }

            detected.push(EliminationRecord {
                participant_index: index,
                participant_address: address,
                losing_hand: transition.hands[index].clone(),
                winning_hand: winning_hand.clone(),
                board: transition.board.to_string(),
                round: transition.round,
            });
        }

        Ok(detected)
    }

    /// Append records produced by [`Self::detect`]. Addresses that already
    /// hold a record are skipped.
    pub fn append(&mut self, records: Vec<EliminationRecord>) {
        for record in records {
            if self.by_address.contains_key(&record.participant_address) {
                continue;
            }
            tracing::info!(
                round = %record.round,
                index = record.participant_index,
                address = %record.participant_address,
                "Participant eliminated"
            );
            self.by_address
                .insert(record.participant_address, self.records.len());
            self.records.push(record);
        }
    }

    /// All records, in the order they were made.
    #[must_use]
    pub fn all(&self) -> &[EliminationRecord] {
        &self.records
    }

    #[must_use]
    pub fn for_address(&self, address: &Address) -> Option<&EliminationRecord> {
        self.by_address.get(address).map(|i| &self.records[*i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_types::chips;

    fn amounts(values: &[u64]) -> Vec<Chips> {
        values.iter().map(|v| chips(*v)).collect()
    }

    fn addresses(n: u8) -> Vec<Address> {
        (0..n).map(Address::dummy).collect()
    }

    fn hands(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("hand-{i}")).collect()
    }

    #[test]
    fn records_positive_to_zero() {
        let mut register = EliminationRegister::new();
        let (pre, post) = (amounts(&[100, 100]), amounts(&[200, 0]));
        let (hands, addresses) = (hands(2), addresses(2));
        let added = register
            .detect_and_record(&RoundTransition {
                round: RoundId(1),
                pre_balances: &pre,
                post_balances: &post,
                hands: &hands,
                board: "",
                outcome: &Outcome::Winner(0),
                addresses: &addresses,
            })
            .unwrap();

        assert_eq!(added.len(), 1);
        let record = register.for_address(&Address::dummy(1)).unwrap();
        assert_eq!(record.participant_index, 1);
        assert_eq!(record.losing_hand, "hand-1");
        assert_eq!(record.winning_hand, "hand-0");
        assert_eq!(record.round, RoundId(1));
        assert!(register.for_address(&Address::dummy(0)).is_none());
    }

    #[test]
    fn already_empty_is_not_recorded_again() {
        let mut register = EliminationRegister::new();
        let (hands, addresses) = (hands(3), addresses(3));
        let first = (amounts(&[100, 100, 100]), amounts(&[200, 100, 0]));
        let later = (amounts(&[200, 100, 0]), amounts(&[300, 0, 0]));

        for (round, (pre, post)) in [(1, first), (2, later)] {
            register
                .detect_and_record(&RoundTransition {
                    round: RoundId(round),
                    pre_balances: &pre,
                    post_balances: &post,
                    hands: &hands,
                    board: "",
                    outcome: &Outcome::Winner(0),
                    addresses: &addresses,
                })
                .unwrap();
        }

        assert_eq!(register.len(), 2);
        assert_eq!(register.all()[0].participant_index, 2);
        assert_eq!(register.all()[0].round, RoundId(1));
        assert_eq!(register.all()[1].participant_index, 1);
    }

    #[test]
    fn tie_uses_lowest_tied_hand() {
        let mut register = EliminationRegister::new();
        let (pre, post) = (amounts(&[10, 10, 10]), amounts(&[0, 15, 15]));
        let (hands, addresses) = (hands(3), addresses(3));
        register
            .detect_and_record(&RoundTransition {
                round: RoundId(4),
                pre_balances: &pre,
                post_balances: &post,
                hands: &hands,
                board: "♠K♥Q♦K♣J♠2",
                outcome: &Outcome::Tie([2, 1].into_iter().collect()),
                addresses: &addresses,
            })
            .unwrap();
        let record = register.for_address(&Address::dummy(0)).unwrap();
        assert_eq!(record.winning_hand, "hand-1");
        assert_eq!(record.board, "♠K♥Q♦K♣J♠2");
    }

    #[test]
    fn duplicate_address_keeps_first_record() {
        let mut register = EliminationRegister::new();
        let (pre, post) = (amounts(&[10, 10, 10]), amounts(&[0, 0, 30]));
        let hands = hands(3);
        let shared = vec![Address::dummy(7), Address::dummy(7), Address::dummy(8)];
        let added = register
            .detect_and_record(&RoundTransition {
                round: RoundId(1),
                pre_balances: &pre,
                post_balances: &post,
                hands: &hands,
                board: "",
                outcome: &Outcome::Winner(2),
                addresses: &shared,
            })
            .unwrap();
        assert_eq!(added.len(), 1);
        assert_eq!(
            register.for_address(&Address::dummy(7)).unwrap().participant_index,
            0
        );
    }

    #[test]
    fn detect_alone_records_nothing() {
        let register = EliminationRegister::new();
        let (pre, post) = (amounts(&[5, 5]), amounts(&[10, 0]));
        let (hands, addresses) = (hands(2), addresses(2));
        let detected = register
            .detect(&RoundTransition {
                round: RoundId(1),
                pre_balances: &pre,
                post_balances: &post,
                hands: &hands,
                board: "",
                outcome: &Outcome::Winner(0),
                addresses: &addresses,
            })
            .unwrap();
        assert_eq!(detected.len(), 1);
        assert!(register.is_empty());
    }

    #[test]
    fn misaligned_inputs_rejected() {
        let mut register = EliminationRegister::new();
        let (pre, post) = (amounts(&[10, 10]), amounts(&[20]));
        let (hands, addresses) = (hands(2), addresses(2));
        let err = register
            .detect_and_record(&RoundTransition {
                round: RoundId(1),
                pre_balances: &pre,
                post_balances: &post,
                hands: &hands,
                board: "",
                outcome: &Outcome::Winner(0),
                addresses: &addresses,
            })
            .unwrap_err();
        assert!(matches!(err, ShowdownError::Internal(_)));
        assert!(register.is_empty());
    }
}
