use crate::model::card::{Card, CardParseError};
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use thiserror::Error;

pub const DECK_SIZE: usize = 52;

/// One pre-arranged deal: 52 distinct cards in dealing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: [Card; DECK_SIZE],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("deck file contains no decks")]
    Empty,
    #[error("deck line {line} must be exactly 104 characters, got {len}")]
    BadLine { line: usize, len: usize },
    #[error("deck line {line}: {source}")]
    BadCard {
        line: usize,
        #[source]
        source: CardParseError,
    },
    #[error("deck line {line} repeats {card}")]
    DuplicateCard { line: usize, card: Card },
}

impl Deck {
    /// Parses one deck-file line: 52 back-to-back rank+suit tokens.
    pub fn parse(text: &str, line: usize) -> Result<Self, DeckError> {
        if text.len() != DECK_SIZE * 2 || !text.is_ascii() {
            return Err(DeckError::BadLine {
                line,
                len: text.len(),
            });
        }
        let mut cards = [Card::new(Rank::Two, Suit::Spades); DECK_SIZE];
        for slot in 0..DECK_SIZE {
            let token = &text[slot * 2..slot * 2 + 2];
            let card = Card::parse(token).map_err(|source| DeckError::BadCard { line, source })?;
            if cards[..slot].contains(&card) {
                return Err(DeckError::DuplicateCard { line, card });
            }
            cards[slot] = card;
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card; DECK_SIZE] {
        &self.cards
    }
}

/// All decks loaded at startup. Read-only afterwards; sessions walk it
/// with their own cursor and never contend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckPool {
    decks: Vec<Deck>,
}

impl DeckPool {
    pub fn parse(text: &str) -> Result<Self, DeckError> {
        let mut decks = Vec::new();
        for (index, line) in text.lines().enumerate() {
            decks.push(Deck::parse(line, index + 1)?);
        }
        if decks.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Self { decks })
    }

    pub fn len(&self) -> usize {
        self.decks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decks.is_empty()
    }

    pub fn deck(&self, cursor: usize) -> &Deck {
        &self.decks[cursor % self.decks.len()]
    }

    pub fn advance(&self, cursor: usize) -> usize {
        (cursor + 1) % self.decks.len()
    }
}
