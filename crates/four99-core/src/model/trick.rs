use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;

/// One round of four plays. Seats are assigned in order from the
/// leader; the session only feeds plays it has already validated.
#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    trump: Suit,
    plays: Vec<TrickPlay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickPlay {
    pub seat: Seat,
    pub card: Card,
}

impl Trick {
    pub fn new(leader: Seat, trump: Suit) -> Self {
        Self {
            leader,
            trump,
            plays: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn trump(&self) -> Suit {
        self.trump
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn plays(&self) -> &[TrickPlay] {
        &self.plays
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    /// Records the next play and returns the seat it came from.
    pub fn record(&mut self, card: Card) -> Seat {
        debug_assert!(!self.is_complete());
        let seat = self.leader.offset(self.plays.len());
        self.plays.push(TrickPlay { seat, card });
        seat
    }

    /// The winning seat once all four cards are down: the best card
    /// under trump > lead suit > rank. Unique since cards are distinct.
    pub fn winner(&self) -> Option<Seat> {
        if !self.is_complete() {
            return None;
        }
        let lead = self.lead_suit()?;
        self.plays
            .iter()
            .max_by(|a, b| a.card.trick_cmp(b.card, self.trump, lead))
            .map(|play| play.seat)
    }
}

#[cfg(test)]
mod tests {
    use super::Trick;
    use crate::model::card::Card;
    use crate::model::seat::Seat;
    use crate::model::suit::Suit;

    fn card(token: &str) -> Card {
        Card::parse(token).unwrap()
    }

    #[test]
    fn seats_rotate_from_the_leader() {
        let mut trick = Trick::new(Seat::South, Suit::Hearts);
        assert_eq!(trick.record(card("2C")), Seat::South);
        assert_eq!(trick.record(card("3C")), Seat::West);
        assert_eq!(trick.record(card("4C")), Seat::North);
        assert_eq!(trick.record(card("5C")), Seat::East);
        assert!(trick.is_complete());
        assert_eq!(trick.lead_suit(), Some(Suit::Clubs));
    }

    #[test]
    fn trump_wins_regardless_of_rank() {
        let mut trick = Trick::new(Seat::North, Suit::Hearts);
        trick.record(card("KS"));
        trick.record(card("2H"));
        trick.record(card("AS"));
        trick.record(card("QC"));
        assert_eq!(trick.winner(), Some(Seat::East));
    }

    #[test]
    fn lead_suit_wins_when_no_trump_played() {
        let mut trick = Trick::new(Seat::North, Suit::Hearts);
        trick.record(card("5D"));
        trick.record(card("AC"));
        trick.record(card("TD"));
        trick.record(card("AS"));
        assert_eq!(trick.winner(), Some(Seat::South));
    }

    #[test]
    fn highest_rank_wins_within_the_lead_suit() {
        let mut trick = Trick::new(Seat::West, Suit::Spades);
        trick.record(card("4D"));
        trick.record(card("JD"));
        trick.record(card("9D"));
        trick.record(card("6D"));
        assert_eq!(trick.winner(), Some(Seat::North));
    }

    #[test]
    fn incomplete_trick_has_no_winner() {
        let mut trick = Trick::new(Seat::North, Suit::Spades);
        trick.record(card("4D"));
        assert_eq!(trick.winner(), None);
    }
}
