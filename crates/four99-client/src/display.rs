use four99_core::model::card::{Card, sort_for_display};
use four99_core::model::hand::HandCards;
use four99_core::model::suit::Suit;

/// The hand as four suit rows, unplayed cards only, highest rank
/// first. Shown after every deal and before every play prompt.
pub fn format_hand(hand: &HandCards) -> String {
    let mut cards: Vec<Card> = hand.unplayed().collect();
    sort_for_display(&mut cards);
    let mut cards = cards.into_iter().peekable();
    let mut out = String::new();
    for suit in Suit::ALL {
        out.push(suit.to_char());
        out.push(':');
        while let Some(card) = cards.peek().copied().filter(|card| card.suit == suit) {
            out.push(' ');
            out.push(card.rank.to_char());
            cards.next();
        }
        out.push('\n');
    }
    out
}
