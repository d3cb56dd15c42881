use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use std::cmp::Ordering;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("card token must be two characters, got {0:?}")]
    BadLength(String),
    #[error("unknown rank symbol {0:?}")]
    BadRank(char),
    #[error("unknown suit symbol {0:?}")]
    BadSuit(char),
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Parses a two-character rank+suit token such as `TS` or `4H`.
    pub fn parse(token: &str) -> Result<Self, CardParseError> {
        let mut chars = token.chars();
        let (rank, suit) = match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => (rank, suit),
            _ => return Err(CardParseError::BadLength(token.to_string())),
        };
        let rank = Rank::from_char(rank).ok_or(CardParseError::BadRank(rank))?;
        let suit = Suit::from_char(suit).ok_or(CardParseError::BadSuit(suit))?;
        Ok(Self { rank, suit })
    }

    /// Rank-major ordering, suits (bid order) breaking ties.
    pub fn cmp_rank(self, other: Card) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then(self.suit.bid_index().cmp(&other.suit.bid_index()))
    }

    /// Suit-major ordering used to present a hand. Ascending order is
    /// `H < D < C < S`; callers sort descending so spades come first.
    pub fn cmp_display(self, other: Card) -> Ordering {
        self.suit
            .display_index()
            .cmp(&other.suit.display_index())
            .then(self.rank.cmp(&other.rank))
    }

    /// Trick ordering: trump beats any non-trump, then the lead suit
    /// beats the rest, then rank decides. Total over distinct cards.
    pub fn trick_cmp(self, other: Card, trump: Suit, lead: Suit) -> Ordering {
        match (self.suit == trump, other.suit == trump) {
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            _ => {}
        }
        match (self.suit == lead, other.suit == lead) {
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            _ => {}
        }
        self.cmp_rank(other)
    }
}

/// Sorts cards into presentation order: spades, clubs, diamonds,
/// hearts, ranks descending within each suit.
pub fn sort_for_display(cards: &mut [Card]) {
    cards.sort_by(|a, b| b.cmp_display(*a));
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
