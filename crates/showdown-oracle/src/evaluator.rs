//! Deterministic reference evaluator for the judgment rubric.
//!
//! [`RubricOracle`] answers the same prompt a natural-language evaluator
//! receives, applying the rubric mechanically: category first, then the
//! primary rank groups, then kickers in descending order. Suits never break
//! ties. It is useful offline and wherever a reproducible oracle is needed.

use std::{cmp::Ordering, collections::HashMap, fmt};

use showdown_types::{Result, ShowdownError};

use crate::{
    cards::{Card, Rank, parse_cards},
    oracle::{Oracle, OracleRequest},
    prompt::{BOARD_LINE_PREFIX, EMPTY_BOARD, PLAYER_LINE_PREFIX},
    response::WireJudgment,
};

/// Hand categories, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

/// Comparable strength of a hand. Derived ordering compares the category,
/// then `ranks` lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandRank {
    pub category: HandCategory,
    /// Rank groups by size then rank, descending; for straights the top card.
    pub ranks: Vec<Rank>,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.category {
            HandCategory::StraightFlush if self.ranks.first() == Some(&Rank::ACE) => {
                "Royal Flush"
            }
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::FullHouse => "Full House",
            HandCategory::Flush => "Flush",
            HandCategory::Straight => "Straight",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::OnePair => "One Pair",
            HandCategory::HighCard => "High Card",
        };
        let ranks: Vec<String> = self.ranks.iter().map(ToString::to_string).collect();
        write!(f, "{name} [{}]", ranks.join(" "))
    }
}

/// Top card of a straight made by five distinct `ranks` (descending), if any.
fn straight_high(ranks: &[Rank]) -> Option<Rank> {
    if ranks.len() != 5 {
        return None;
    }
    let consecutive = ranks.windows(2).all(|w| w[0].0 == w[1].0 + 1);
    if consecutive {
        return Some(ranks[0]);
    }
    // A-5-4-3-2 plays the ace low.
    let wheel = [Rank::ACE, Rank::FIVE, Rank(4), Rank(3), Rank(2)];
    (ranks == wheel.as_slice()).then_some(Rank::FIVE)
}

/// Rank at most five cards as they are.
fn rank_exact(cards: &[Card]) -> HandRank {
    let mut counts: HashMap<Rank, usize> = HashMap::new();
    for card in cards {
        *counts.entry(card.rank).or_default() += 1;
    }
    let mut groups: Vec<(usize, Rank)> = counts.into_iter().map(|(r, n)| (n, r)).collect();
    groups.sort_by(|a, b| b.cmp(a));
    let ranks: Vec<Rank> = groups.iter().map(|(_, r)| *r).collect();

    let flush = cards.len() == 5 && cards.iter().all(|c| c.suit == cards[0].suit);
    let straight = if groups.len() == 5 {
        straight_high(&ranks)
    } else {
        None
    };

    let shape: Vec<usize> = groups.iter().map(|(n, _)| *n).collect();
    let category = match (straight, flush) {
        (Some(_), true) => HandCategory::StraightFlush,
        _ if shape[0] >= 4 => HandCategory::FourOfAKind,
        _ if shape[0] == 3 && shape.get(1).is_some_and(|n| *n >= 2) => HandCategory::FullHouse,
        (_, true) => HandCategory::Flush,
        (Some(_), false) => HandCategory::Straight,
        _ if shape[0] == 3 => HandCategory::ThreeOfAKind,
        _ if shape[0] == 2 && shape.get(1) == Some(&2) => HandCategory::TwoPair,
        _ if shape[0] == 2 => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    let ranks = match (category, straight) {
        (HandCategory::StraightFlush | HandCategory::Straight, Some(high)) => vec![high],
        _ => ranks,
    };
    HandRank { category, ranks }
}

/// Every `k`-card subset of `cards`.
fn combinations(cards: &[Card], k: usize) -> Vec<Vec<Card>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if cards.len() < k {
        return Vec::new();
    }
    let (first, rest) = (cards[0], &cards[1..]);
    let mut with_first = combinations(rest, k - 1);
    for combo in &mut with_first {
        combo.insert(0, first);
    }
    with_first.extend(combinations(rest, k));
    with_first
}

/// Best hand available from private cards plus board.
///
/// With five or fewer cards in total (pre-flop) the cards are ranked as
/// they are; otherwise the strongest five-card subset wins.
///
/// # Panics
/// Panics if `cards` is empty.
#[must_use]
pub fn best_hand(cards: &[Card]) -> HandRank {
    assert!(!cards.is_empty(), "best_hand needs at least one card");
    if cards.len() <= 5 {
        return rank_exact(cards);
    }
    combinations(cards, 5)
        .iter()
        .map(|combo| rank_exact(combo))
        .max()
        .unwrap_or_else(|| rank_exact(&cards[..5]))
}

/// Decide a round: every index holding the strongest hand.
pub fn judge(hands: &[String], board: &str) -> Result<WireJudgment> {
    let board_cards = parse_cards(board)?;
    let mut best: Option<HandRank> = None;
    let mut leaders: Vec<i64> = Vec::new();

    for (index, hand) in hands.iter().enumerate() {
        let mut cards = parse_cards(hand)?;
        if cards.is_empty() {
            return Err(ShowdownError::InvalidRound {
                reason: format!("player {index} has no cards"),
            });
        }
        cards.extend_from_slice(&board_cards);
        let rank = best_hand(&cards);
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        match best.as_ref().map(|b| rank.cmp(b)) {
            None | Some(Ordering::Greater) => {
                best = Some(rank);
                leaders = vec![index];
            }
            Some(Ordering::Equal) => leaders.push(index),
            Some(Ordering::Less) => {}
        }
    }

    Ok(match leaders.as_slice() {
        [only] => WireJudgment {
            winner_index: *only,
            tie_players: Vec::new(),
        },
        _ => WireJudgment {
            winner_index: showdown_types::constants::TIE_WINNER_INDEX,
            tie_players: leaders,
        },
    })
}

/// Read the participant hands and board back out of a rubric prompt.
fn read_prompt(prompt: &str) -> Result<(Vec<String>, String)> {
    let mut hands: Vec<(usize, String)> = Vec::new();
    let mut board = None;

    for line in prompt.lines() {
        if let Some(rest) = line.strip_prefix(BOARD_LINE_PREFIX) {
            let rest = rest.trim();
            board = Some(if rest == EMPTY_BOARD {
                String::new()
            } else {
                rest.to_string()
            });
        } else if let Some(rest) = line.strip_prefix(PLAYER_LINE_PREFIX) {
            let Some((index, hand)) = rest.split_once(": ") else {
                continue;
            };
            let Ok(index) = index.parse::<usize>() else {
                continue;
            };
            hands.push((index, hand.trim().to_string()));
        }
    }

    hands.sort_by_key(|(index, _)| *index);
    let in_order = hands.iter().enumerate().all(|(pos, (index, _))| pos == *index);
    match board {
        Some(board) if !hands.is_empty() && in_order => {
            Ok((hands.into_iter().map(|(_, hand)| hand).collect(), board))
        }
        _ => Err(ShowdownError::OracleUnavailable {
            reason: "prompt does not list the players and board".into(),
        }),
    }
}

/// An [`Oracle`] that applies the rubric deterministically.
#[derive(Debug, Default, Clone, Copy)]
pub struct RubricOracle;

impl Oracle for RubricOracle {
    fn query(&self, request: &OracleRequest) -> Result<String> {
        let (hands, board) = read_prompt(&request.prompt)?;
        // Undecodable cards are the caller's input fault and stay `InvalidRound`.
        let judgment = judge(&hands, &board)?;
        serde_json::to_string(&judgment).map_err(|e| ShowdownError::Serialization(e.to_string()))
    }
}
