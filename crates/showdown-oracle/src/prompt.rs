//! Judgment request text.
//!
//! The rubric is fixed: every evaluator receives identical instructions, so
//! any disagreement comes from the evaluator and not from the request.
//! [`crate::evaluator::RubricOracle`] reads the participant and board lines
//! back out of this text, so their format is part of the contract.

use std::fmt::Write as _;

/// Prefix of each participant line: `Player {index}: {hand}`.
pub const PLAYER_LINE_PREFIX: &str = "Player ";

/// Prefix of the board line: `Board cards: {board}` (`None` pre-flop).
pub const BOARD_LINE_PREFIX: &str = "Board cards: ";

/// Board text used when no community cards are out.
pub const EMPTY_BOARD: &str = "None";

const RUBRIC: &str = "\
You are judging the showdown of one Texas Hold'em hand between several players.

HOW HANDS ARE FORMED:
- Each player holds 2 private cards.
- The board holds 0 community cards (pre-flop) or 5.
- A player's hand is the best 5-card combination of their private cards and the board.
  Pre-flop, compare the 2 private cards only.

CATEGORIES, HIGHEST FIRST:
Straight flush (ace-high is a royal flush), four of a kind, full house, flush, straight,
three of a kind, two pair, one pair, high card. A-2-3-4-5 is the lowest straight.

BREAKING TIES WITHIN A CATEGORY:
- Ranks order 2 < 3 < 4 < 5 < 6 < 7 < 8 < 9 < 10 < J < Q < K < A.
- Compare the primary rank group first (the quads, the trips of a full house then its pair,
  the higher pair then the lower pair of two pair, the pair of one pair).
- Then compare the remaining kickers in descending order.
- Straights and straight flushes compare by their highest card.
- Suits never break ties. Identical rank composition across different suits is a tie.

CARD NOTATION:
Each card is a suit symbol followed by a rank. Suits: \u{2660} spades, \u{2665} hearts,
\u{2666} diamonds, \u{2663} clubs. Ranks: A, K, Q, J, 10, 9, 8, 7, 6, 5, 4, 3, 2.
Example: \u{2660}A\u{2665}K is the ace of spades and the king of hearts.
";

const ANSWER_FORMAT: &str = "\
Answer with a single JSON object and nothing else (no markdown, no prose):
{\"winner_index\": int, \"tie_players\": [int]}
- One winner: winner_index is that player's 0-based index and tie_players is [].
- A tie: winner_index is -1 and tie_players lists every tied player's index.
";

/// Build the judgment request for one round.
#[must_use]
pub fn build_prompt(hands: &[String], board: &str) -> String {
    let mut prompt = String::with_capacity(RUBRIC.len() + ANSWER_FORMAT.len() + 256);
    prompt.push_str(RUBRIC);
    prompt.push_str("\nCURRENT HAND:\n");
    for (index, hand) in hands.iter().enumerate() {
        let _ = writeln!(prompt, "{PLAYER_LINE_PREFIX}{index}: {hand}");
    }
    let board_text = if board.trim().is_empty() {
        EMPTY_BOARD
    } else {
        board
    };
    let _ = writeln!(prompt, "{BOARD_LINE_PREFIX}{board_text}");
    prompt.push('\n');
    prompt.push_str(ANSWER_FORMAT);
    prompt
}
