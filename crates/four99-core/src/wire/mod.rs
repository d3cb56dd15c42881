//! Line-oriented protocol codec shared by the server and the client.
//! Every message is one line; the first character is the tag.

use crate::game::bidding::BidAction;
use crate::model::bid::Bid;
use crate::model::card::Card;
use crate::model::hand::HAND_SIZE;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    /// `M<text>`: informational broadcast.
    Info(String),
    /// `O`: game over; the client must close.
    GameOver,
    /// `H` + 26 chars: the full dealt hand, two characters per card.
    DealtHand([Card; HAND_SIZE]),
    /// `B` or `B<bid>`: bid prompt showing the standing bid.
    BidPrompt(Option<Bid>),
    /// `T<bid>`: bidding result announcement.
    BidWon(Bid),
    /// `L`: lead-play prompt, no suit constraint.
    LeadPrompt,
    /// `P<suit>`: follow-play prompt.
    FollowPrompt(Suit),
    /// `A`: play accepted acknowledgement.
    PlayAccepted,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("empty message line")]
    Empty,
    #[error("unknown message tag {0:?}")]
    UnknownTag(char),
    #[error("unexpected payload after tag {0:?}")]
    UnexpectedPayload(char),
    #[error("dealt hand payload must be 26 characters, got {0}")]
    BadHandLength(usize),
    #[error("malformed card token {0:?}")]
    BadCard(String),
    #[error("malformed bid token {0:?}")]
    BadBid(String),
    #[error("malformed suit {0:?}")]
    BadSuit(String),
}

impl ServerMessage {
    /// The message as a wire line, without the trailing newline; the
    /// channel owns line termination.
    pub fn encode(&self) -> String {
        match self {
            ServerMessage::Info(text) => format!("M{text}"),
            ServerMessage::GameOver => "O".to_string(),
            ServerMessage::DealtHand(cards) => {
                let mut line = String::with_capacity(1 + HAND_SIZE * 2);
                line.push('H');
                for card in cards {
                    line.push(card.rank.to_char());
                    line.push(card.suit.to_char());
                }
                line
            }
            ServerMessage::BidPrompt(None) => "B".to_string(),
            ServerMessage::BidPrompt(Some(bid)) => format!("B{bid}"),
            ServerMessage::BidWon(bid) => format!("T{bid}"),
            ServerMessage::LeadPrompt => "L".to_string(),
            ServerMessage::FollowPrompt(suit) => format!("P{suit}"),
            ServerMessage::PlayAccepted => "A".to_string(),
        }
    }

    pub fn decode(line: &str) -> Result<Self, WireError> {
        let tag = line.chars().next().ok_or(WireError::Empty)?;
        let payload = &line[tag.len_utf8()..];
        match tag {
            'M' => Ok(ServerMessage::Info(payload.to_string())),
            'O' | 'L' | 'A' => {
                if !payload.is_empty() {
                    return Err(WireError::UnexpectedPayload(tag));
                }
                Ok(match tag {
                    'O' => ServerMessage::GameOver,
                    'L' => ServerMessage::LeadPrompt,
                    _ => ServerMessage::PlayAccepted,
                })
            }
            'H' => {
                if payload.len() != HAND_SIZE * 2 || !payload.is_ascii() {
                    return Err(WireError::BadHandLength(payload.len()));
                }
                let mut cards = [Card::new(Rank::Two, Suit::Spades); HAND_SIZE];
                for (slot, card) in cards.iter_mut().enumerate() {
                    let token = &payload[slot * 2..slot * 2 + 2];
                    *card =
                        Card::parse(token).map_err(|_| WireError::BadCard(token.to_string()))?;
                }
                Ok(ServerMessage::DealtHand(cards))
            }
            'B' => {
                if payload.is_empty() {
                    return Ok(ServerMessage::BidPrompt(None));
                }
                Bid::parse(payload)
                    .map(|bid| ServerMessage::BidPrompt(Some(bid)))
                    .map_err(|_| WireError::BadBid(payload.to_string()))
            }
            'T' => Bid::parse(payload)
                .map(ServerMessage::BidWon)
                .map_err(|_| WireError::BadBid(payload.to_string())),
            'P' => {
                let mut chars = payload.chars();
                match (chars.next().and_then(Suit::from_char), chars.next()) {
                    (Some(suit), None) => Ok(ServerMessage::FollowPrompt(suit)),
                    _ => Err(WireError::BadSuit(payload.to_string())),
                }
            }
            _ => Err(WireError::UnknownTag(tag)),
        }
    }
}

/// Parses a client's bid response: `PP` to pass or a two-character bid.
pub fn parse_bid_action(line: &str) -> Result<BidAction, WireError> {
    if line == "PP" {
        return Ok(BidAction::Pass);
    }
    Bid::parse(line)
        .map(BidAction::Bid)
        .map_err(|_| WireError::BadBid(line.to_string()))
}

/// Parses a client's play response: a two-character card token.
pub fn parse_play(line: &str) -> Result<Card, WireError> {
    Card::parse(line).map_err(|_| WireError::BadCard(line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{ServerMessage, WireError, parse_bid_action, parse_play};
    use crate::game::bidding::BidAction;
    use crate::model::bid::Bid;
    use crate::model::card::Card;
    use crate::model::deck::Deck;
    use crate::model::hand::HandCards;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn simple_tags_roundtrip() {
        for message in [
            ServerMessage::Info("welcome".to_string()),
            ServerMessage::GameOver,
            ServerMessage::BidPrompt(None),
            ServerMessage::BidPrompt(Some(Bid::parse("6S").unwrap())),
            ServerMessage::BidWon(Bid::parse("9H").unwrap()),
            ServerMessage::LeadPrompt,
            ServerMessage::FollowPrompt(Suit::Diamonds),
            ServerMessage::PlayAccepted,
        ] {
            assert_eq!(ServerMessage::decode(&message.encode()), Ok(message));
        }
    }

    #[test]
    fn dealt_hand_roundtrips_in_dealt_order() {
        let mut line = String::new();
        for suit in Suit::ALL {
            for rank in Rank::ORDERED {
                line.push(rank.to_char());
                line.push(suit.to_char());
            }
        }
        let deck = Deck::parse(&line, 1).unwrap();
        let hand = HandCards::deal(&deck).into_iter().next().unwrap();
        let message = ServerMessage::DealtHand(hand.dealt());
        let encoded = message.encode();
        assert_eq!(encoded.len(), 27);
        assert_eq!(ServerMessage::decode(&encoded), Ok(message));
    }

    #[test]
    fn hand_payload_length_is_enforced() {
        assert_eq!(
            ServerMessage::decode("H2S3S"),
            Err(WireError::BadHandLength(4))
        );
    }

    #[test]
    fn empty_and_unknown_lines_are_errors() {
        assert_eq!(ServerMessage::decode(""), Err(WireError::Empty));
        assert_eq!(ServerMessage::decode("Zfoo"), Err(WireError::UnknownTag('Z')));
        assert_eq!(
            ServerMessage::decode("Lx"),
            Err(WireError::UnexpectedPayload('L'))
        );
    }

    #[test]
    fn bid_actions_parse_pass_and_bids() {
        assert_eq!(parse_bid_action("PP"), Ok(BidAction::Pass));
        assert_eq!(
            parse_bid_action("7C"),
            Ok(BidAction::Bid(Bid::parse("7C").unwrap()))
        );
        assert!(matches!(parse_bid_action("pp"), Err(WireError::BadBid(_))));
        assert!(matches!(parse_bid_action("3S"), Err(WireError::BadBid(_))));
    }

    #[test]
    fn plays_parse_card_tokens() {
        assert_eq!(parse_play("TS"), Ok(Card::parse("TS").unwrap()));
        assert!(matches!(parse_play("T"), Err(WireError::BadCard(_))));
        assert!(matches!(parse_play("XX"), Err(WireError::BadCard(_))));
    }
}
