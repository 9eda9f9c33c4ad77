//! Card notation: a suit symbol followed by a rank (`♠A`, `♥10`).

use std::fmt;

use showdown_types::{Result, ShowdownError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '♠' => Some(Self::Spades),
            '♥' => Some(Self::Hearts),
            '♦' => Some(Self::Diamonds),
            '♣' => Some(Self::Clubs),
            _ => None,
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Spades => '♠',
            Self::Hearts => '♥',
            Self::Diamonds => '♦',
            Self::Clubs => '♣',
        }
    }
}

/// Card rank, 2 (lowest) to 14 (ace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rank(pub u8);

impl Rank {
    pub const ACE: Self = Self(14);
    pub const FIVE: Self = Self(5);

    fn from_token(token: &str) -> Option<Self> {
        let value = match token {
            "A" => 14,
            "K" => 13,
            "Q" => 12,
            "J" => 11,
            "10" | "T" => 10,
            digit if digit.len() == 1 => {
                let d = digit.parse::<u8>().ok()?;
                if !(2..=9).contains(&d) {
                    return None;
                }
                d
            }
            _ => return None,
        };
        Some(Self(value))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            14 => write!(f, "A"),
            13 => write!(f, "K"),
            12 => write!(f, "Q"),
            11 => write!(f, "J"),
            n => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.suit.symbol(), self.rank)
    }
}

/// Parse a run of cards such as `♠K♥Q♦K♣J♠2`. Whitespace is ignored.
pub fn parse_cards(text: &str) -> Result<Vec<Card>> {
    let invalid = |reason: String| ShowdownError::InvalidRound { reason };
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut cards = Vec::new();
    let mut chars = compact.chars().peekable();

    while let Some(symbol) = chars.next() {
        let suit = Suit::from_symbol(symbol)
            .ok_or_else(|| invalid(format!("expected a suit symbol in {text:?}, found {symbol:?}")))?;
        let mut token = String::new();
        while let Some(next) = chars.peek() {
            if Suit::from_symbol(*next).is_some() {
                break;
            }
            token.push(*next);
            chars.next();
        }
        let rank = Rank::from_token(&token)
            .ok_or_else(|| invalid(format!("unknown rank {token:?} in {text:?}")))?;
        cards.push(Card { suit, rank });
    }

    Ok(cards)
}
