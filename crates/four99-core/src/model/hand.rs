use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::suit::Suit;
use std::array;
use thiserror::Error;

pub const HAND_SIZE: usize = 13;

/// The thirteen cards dealt to one seat, with per-card played flags.
/// Flags only ever go false to true; a fresh deal makes a fresh hand.
#[derive(Debug, Clone)]
pub struct HandCards {
    slots: [Slot; HAND_SIZE],
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    card: Card,
    played: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayRejection {
    #[error("card is not in this hand")]
    NotHeld,
    #[error("card was already played this hand")]
    AlreadyPlayed,
    #[error("must follow {0} while the hand holds one")]
    MustFollowSuit(Suit),
}

impl HandCards {
    pub fn new(cards: [Card; HAND_SIZE]) -> Self {
        Self {
            slots: cards.map(|card| Slot {
                card,
                played: false,
            }),
        }
    }

    /// Distributes a deck four cards at a time in seat order: seat `s`
    /// receives deck positions `s, s + 4, ..., s + 48`.
    pub fn deal(deck: &Deck) -> [HandCards; 4] {
        let cards = deck.cards();
        array::from_fn(|seat| HandCards::new(array::from_fn(|slot| cards[slot * 4 + seat])))
    }

    /// The cards in dealt order, regardless of played state.
    pub fn dealt(&self) -> [Card; HAND_SIZE] {
        self.slots.map(|slot| slot.card)
    }

    pub fn unplayed(&self) -> impl Iterator<Item = Card> + '_ {
        self.slots
            .iter()
            .filter(|slot| !slot.played)
            .map(|slot| slot.card)
    }

    pub fn can_follow(&self, suit: Suit) -> bool {
        self.unplayed().any(|card| card.suit == suit)
    }

    /// Validates a play without mutating anything; rejected plays
    /// leave the hand exactly as it was.
    pub fn check_play(&self, card: Card, lead: Option<Suit>) -> Result<(), PlayRejection> {
        let slot = self
            .slots
            .iter()
            .find(|slot| slot.card == card)
            .ok_or(PlayRejection::NotHeld)?;
        if slot.played {
            return Err(PlayRejection::AlreadyPlayed);
        }
        if let Some(lead) = lead {
            if card.suit != lead && self.can_follow(lead) {
                return Err(PlayRejection::MustFollowSuit(lead));
            }
        }
        Ok(())
    }

    /// Returns false if the card is not held or was already played.
    pub fn mark_played(&mut self, card: Card) -> bool {
        match self
            .slots
            .iter_mut()
            .find(|slot| slot.card == card && !slot.played)
        {
            Some(slot) => {
                slot.played = true;
                true
            }
            None => false,
        }
    }
}
