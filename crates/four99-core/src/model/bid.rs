use crate::model::suit::Suit;
use core::fmt;
use thiserror::Error;

/// Only ranks 4 through 9 may be bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum BidRank {
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
}

impl BidRank {
    pub const fn from_char(symbol: char) -> Option<Self> {
        match symbol {
            '4' => Some(BidRank::Four),
            '5' => Some(BidRank::Five),
            '6' => Some(BidRank::Six),
            '7' => Some(BidRank::Seven),
            '8' => Some(BidRank::Eight),
            '9' => Some(BidRank::Nine),
            _ => None,
        }
    }

    pub const fn to_char(self) -> char {
        (b'0' + self as u8) as char
    }

    /// Tricks the bidding team must take to make the bid.
    pub const fn tricks_required(self) -> u8 {
        self as u8
    }

    const fn index(self) -> i32 {
        self as i32 - 4
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bid {
    pub rank: BidRank,
    pub suit: Suit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BidParseError {
    #[error("bid token must be two characters, got {0:?}")]
    BadLength(String),
    #[error("bid rank must be 4-9, got {0:?}")]
    BadRank(char),
    #[error("unknown suit symbol {0:?}")]
    BadSuit(char),
}

impl Bid {
    /// `9H`, the bid nothing can beat; it ends bidding on the spot.
    pub const MAXIMUM: Bid = Bid {
        rank: BidRank::Nine,
        suit: Suit::Hearts,
    };

    pub const fn new(rank: BidRank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn parse(token: &str) -> Result<Self, BidParseError> {
        let mut chars = token.chars();
        let (rank, suit) = match (chars.next(), chars.next(), chars.next()) {
            (Some(rank), Some(suit), None) => (rank, suit),
            _ => return Err(BidParseError::BadLength(token.to_string())),
        };
        let rank = BidRank::from_char(rank).ok_or(BidParseError::BadRank(rank))?;
        let suit = Suit::from_char(suit).ok_or(BidParseError::BadSuit(suit))?;
        Ok(Self { rank, suit })
    }

    /// `value = suit * 10 + 20 + rank * 50` over the S/C/D/H and 4..9
    /// indices; a strict total-order surrogate for bid comparison.
    pub const fn value(self) -> i32 {
        self.suit.bid_index() * 10 + 20 + self.rank.index() * 50
    }

    /// A new bid stands only if it strictly exceeds the old one.
    pub fn beats(self, standing: Bid) -> bool {
        self.value() > standing.value()
    }

    pub fn is_maximum(self) -> bool {
        self == Self::MAXIMUM
    }
}

impl fmt::Display for Bid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::{Bid, BidParseError};

    fn bid(token: &str) -> Bid {
        Bid::parse(token).unwrap()
    }

    #[test]
    fn values_follow_the_table() {
        assert_eq!(bid("4S").value(), 20);
        assert_eq!(bid("6S").value(), 120);
        assert_eq!(bid("6C").value(), 130);
        assert_eq!(bid("7S").value(), 170);
        assert_eq!(bid("9H").value(), 300);
    }

    #[test]
    fn acceptance_is_strict_exceed() {
        let standing = bid("6S");
        assert!(bid("7S").beats(standing));
        assert!(bid("6C").beats(standing));
        assert!(!bid("6S").beats(standing));
        assert!(!bid("5H").beats(bid("9S")));
    }

    #[test]
    fn nine_hearts_is_the_maximum() {
        assert!(bid("9H").is_maximum());
        assert!(!bid("9D").is_maximum());
        for token in ["4S", "8H", "9D", "9C"] {
            assert!(bid("9H").beats(bid(token)));
        }
    }

    #[test]
    fn parse_rejects_out_of_range_ranks() {
        assert!(matches!(Bid::parse("3S"), Err(BidParseError::BadRank('3'))));
        assert!(matches!(Bid::parse("TS"), Err(BidParseError::BadRank('T'))));
        assert!(matches!(Bid::parse("4X"), Err(BidParseError::BadSuit('X'))));
        assert!(matches!(Bid::parse("4"), Err(BidParseError::BadLength(_))));
    }

    #[test]
    fn display_matches_wire_token() {
        assert_eq!(bid("8D").to_string(), "8D");
        assert_eq!(bid("8D").rank.tricks_required(), 8);
    }
}
