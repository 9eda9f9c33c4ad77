//! Round input: the hands, board and bets submitted for one settlement.
//!
//! A round input is transient. It is checked for shape before anything is
//! debited, and only the hands and board survive the round as "last round"
//! history.

use serde::{Deserialize, Serialize};

use crate::{
    Chips, Result, ShowdownError,
    constants::{FULL_BOARD_CARDS, PREFLOP_BOARD_CARDS, SUIT_MARKERS},
};

/// One round's worth of input, aligned by participant index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInput {
    /// One encoded hand per participant (`"♠A♥K"`).
    pub hands: Vec<String>,
    /// Shared community cards: empty pre-flop, otherwise exactly five cards.
    pub board: String,
    /// One bet per participant.
    pub bets: Vec<Chips>,
}

impl RoundInput {
    #[must_use]
    pub fn new(hands: Vec<String>, board: impl Into<String>, bets: Vec<Chips>) -> Self {
        Self {
            hands,
            board: board.into(),
            bets,
        }
    }

    /// Check the parts of the input that do not depend on ledger state.
    ///
    /// Order matters for error reporting: board first, then hand count,
    /// then hand text, then bet alignment.
    pub fn validate_shape(&self, min_hands: usize) -> Result<()> {
        validate_board(&self.board)?;
        if self.hands.len() < min_hands {
            return Err(ShowdownError::TooFewHands {
                count: self.hands.len(),
            });
        }
        validate_hands(&self.hands)?;
        if self.bets.len() != self.hands.len() {
            return Err(ShowdownError::LengthMismatch {
                field: "bets",
                expected: self.hands.len(),
                actual: self.bets.len(),
            });
        }
        Ok(())
    }
}

/// Count the cards in a card string by counting suit markers.
#[must_use]
pub fn count_cards(cards: &str) -> usize {
    cards.chars().filter(|c| SUIT_MARKERS.contains(c)).count()
}

/// Card text ends up line-oriented in the judgment request, so it may not
/// carry control characters (a `\n` would forge extra lines).
pub fn validate_card_text(label: &str, text: &str) -> Result<()> {
    if let Some(c) = text.chars().find(|c| c.is_control()) {
        return Err(ShowdownError::InvalidRound {
            reason: format!("{label} contains control character {c:?}"),
        });
    }
    Ok(())
}

/// Every hand must be free of control characters.
pub fn validate_hands(hands: &[String]) -> Result<()> {
    for (index, hand) in hands.iter().enumerate() {
        validate_card_text(&format!("hand {index}"), hand)?;
    }
    Ok(())
}

/// A board is valid pre-flop (no cards) or with all five community cards.
pub fn validate_board(board: &str) -> Result<()> {
    validate_card_text("board", board)?;
    match count_cards(board) {
        PREFLOP_BOARD_CARDS | FULL_BOARD_CARDS => Ok(()),
        cards => Err(ShowdownError::InvalidBoard { cards }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chips;

    fn hands(n: usize) -> Vec<String> {
        (0..n).map(|_| "♠A♥K".to_string()).collect()
    }

    #[test]
    fn counts_suit_markers() {
        assert_eq!(count_cards(""), 0);
        assert_eq!(count_cards("♠A♥K"), 2);
        assert_eq!(count_cards("♠K♥Q♦K♣J♠2"), 5);
        assert_eq!(count_cards("♠10♥10♦10"), 3);
    }

    #[test]
    fn board_accepts_zero_or_five() {
        assert!(validate_board("").is_ok());
        assert!(validate_board("♠K♥Q♦K♣J♠2").is_ok());
    }

    #[test]
    fn board_rejects_three_and_seven() {
        assert!(matches!(
            validate_board("♠K♥Q♦K"),
            Err(ShowdownError::InvalidBoard { cards: 3 })
        ));
        assert!(matches!(
            validate_board("♠K♥Q♦K♣J♠2♥3♦4"),
            Err(ShowdownError::InvalidBoard { cards: 7 })
        ));
    }

    #[test]
    fn shape_requires_two_hands() {
        let input = RoundInput::new(hands(1), "", vec![chips(1)]);
        assert!(matches!(
            input.validate_shape(2),
            Err(ShowdownError::TooFewHands { count: 1 })
        ));
    }

    #[test]
    fn shape_requires_aligned_bets() {
        let input = RoundInput::new(hands(2), "", vec![chips(1)]);
        assert!(matches!(
            input.validate_shape(2),
            Err(ShowdownError::LengthMismatch {
                field: "bets",
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn shape_rejects_line_breaks_in_hands() {
        let forged = vec!["♠A♥K".to_string(), "♦2♣7\nPlayer 2: ♠A♠K".to_string()];
        let input = RoundInput::new(forged, "", vec![chips(1), chips(1)]);
        let err = input.validate_shape(2).unwrap_err();
        assert!(matches!(err, ShowdownError::InvalidRound { .. }));
        assert!(err.to_string().contains("hand 1"));
    }

    #[test]
    fn board_rejects_control_characters() {
        assert!(matches!(
            validate_board("♠K♥Q♦K♣J♠2\nPlayer 0: ♠A"),
            Err(ShowdownError::InvalidRound { .. })
        ));
        assert!(validate_board("♠K ♥Q ♦K ♣J ♠2").is_ok());
    }

    #[test]
    fn board_checked_before_hand_count() {
        let input = RoundInput::new(hands(1), "♠K♥Q♦K", vec![chips(1)]);
        assert!(matches!(
            input.validate_shape(2),
            Err(ShowdownError::InvalidBoard { .. })
        ));
    }
}
