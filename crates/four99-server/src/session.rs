use crate::connection::{ChannelError, Player};
use four99_core::game::bidding::{BidAction, BiddingError, BiddingState};
use four99_core::model::bid::Bid;
use four99_core::model::deck::DeckPool;
use four99_core::model::hand::{HAND_SIZE, HandCards};
use four99_core::model::score::TeamScores;
use four99_core::model::seat::{Seat, Team};
use four99_core::model::trick::Trick;
use four99_core::wire::{self, ServerMessage, WireError};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("{name} disconnected early")]
    Disconnected { name: String },
    #[error("{name} sent a malformed response: {source}")]
    Protocol {
        name: String,
        #[source]
        source: WireError,
    },
    #[error(transparent)]
    Bidding(#[from] BiddingError),
}

/// One table of four players. Owns its sockets outright; nothing else
/// touches them once the registry hands the table over.
pub struct GameSession {
    name: String,
    players: [Player; 4],
    decks: Arc<DeckPool>,
    deck_cursor: usize,
    scores: TeamScores,
}

impl GameSession {
    /// Seats the four players in sorted-name order: first name north,
    /// then clockwise.
    pub fn new(name: String, mut players: [Player; 4], decks: Arc<DeckPool>) -> Self {
        players.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            name,
            players,
            decks,
            deck_cursor: 0,
            scores: TeamScores::new(),
        }
    }

    pub fn game_name(&self) -> &str {
        &self.name
    }

    /// Drives the session to completion on the current thread and
    /// consumes it. Errors end the game for everyone at the table.
    pub fn run(mut self) {
        info!(
            game = %self.name,
            players = ?self.players.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            "session starting"
        );
        match self.play() {
            Ok(winner) => info!(game = %self.name, %winner, "session finished"),
            Err(err) => {
                warn!(game = %self.name, %err, "session aborted");
                // The survivors hear why their game ended.
                self.broadcast(&ServerMessage::Info(err.to_string()));
                self.broadcast(&ServerMessage::GameOver);
            }
        }
    }

    fn play(&mut self) -> Result<Team, SessionError> {
        for team in [Team::One, Team::Two] {
            let [a, b] = team.seats();
            let text = format!(
                "{}: {}, {}",
                match team {
                    Team::One => "Team1",
                    Team::Two => "Team2",
                },
                self.players[a.index()].name,
                self.players[b.index()].name
            );
            self.broadcast(&ServerMessage::Info(text));
        }
        while !self.scores.game_over() {
            self.play_hand()?;
        }
        let winner = self
            .scores
            .winner()
            .expect("game over implies a winner");
        self.broadcast(&ServerMessage::Info(format!("Winner is {winner}")));
        self.broadcast(&ServerMessage::GameOver);
        Ok(winner)
    }

    fn play_hand(&mut self) -> Result<(), SessionError> {
        let mut hands = self.deal()?;
        let (bidder, bid) = self.run_bidding()?;
        debug!(game = %self.name, %bid, bidder = %self.players[bidder.index()].name, "bidding won");

        let mut tricks_won = [0u8; 2];
        let mut leader = bidder;
        for _ in 0..HAND_SIZE {
            let winner = self.play_trick(&mut hands, leader, bid)?;
            tricks_won[match winner.team() {
                Team::One => 0,
                Team::Two => 1,
            }] += 1;
            self.broadcast(&ServerMessage::Info(format!(
                "{} won",
                self.players[winner.index()].name
            )));
            leader = winner;
        }

        let bidding_team = bidder.team();
        let bidding_tricks = tricks_won[match bidding_team {
            Team::One => 0,
            Team::Two => 1,
        }];
        self.scores.apply_hand(bid, bidding_team, bidding_tricks);
        self.broadcast(&ServerMessage::Info(format!(
            "Team 1={}, Team 2={}",
            self.scores.team_one(),
            self.scores.team_two()
        )));
        Ok(())
    }

    /// Deals the next deck from the pool and sends each seat its hand.
    fn deal(&mut self) -> Result<[HandCards; 4], SessionError> {
        let hands = HandCards::deal(self.decks.deck(self.deck_cursor));
        self.deck_cursor = self.decks.advance(self.deck_cursor);
        for seat in Seat::LOOP {
            let message = ServerMessage::DealtHand(hands[seat.index()].dealt());
            self.send_to(seat, &message)?;
        }
        Ok(hands)
    }

    /// Runs bidding to completion. Underbids and premature passes are
    /// re-prompted; a response that does not even parse ends the
    /// session.
    fn run_bidding(&mut self) -> Result<(Seat, Bid), SessionError> {
        let mut bidding = BiddingState::new();
        while !bidding.is_finished() {
            let seat = bidding.turn();
            loop {
                self.send_to(seat, &ServerMessage::BidPrompt(bidding.standing()))?;
                let line = self.recv_from(seat)?;
                let action = match wire::parse_bid_action(&line) {
                    Ok(action) => action,
                    Err(source) => {
                        return Err(SessionError::Protocol {
                            name: self.players[seat.index()].name.clone(),
                            source,
                        });
                    }
                };
                match bidding.respond(action) {
                    Ok(()) => {
                        let name = &self.players[seat.index()].name;
                        let text = match action {
                            BidAction::Pass => format!("{name} passes"),
                            BidAction::Bid(bid) => format!("{name} bids {bid}"),
                        };
                        self.broadcast_except(seat, &ServerMessage::Info(text));
                        break;
                    }
                    Err(rejection) => {
                        debug!(
                            game = %self.name,
                            seat = %seat,
                            %rejection,
                            "bid rejected, prompting again"
                        );
                    }
                }
            }
        }
        let (bidder, bid) = bidding.outcome()?;
        self.broadcast(&ServerMessage::BidWon(bid));
        Ok((bidder, bid))
    }

    /// Plays one trick and returns its winner. Illegal plays from a
    /// hand that still parses as a card are re-prompted.
    fn play_trick(
        &mut self,
        hands: &mut [HandCards; 4],
        leader: Seat,
        bid: Bid,
    ) -> Result<Seat, SessionError> {
        let mut trick = Trick::new(leader, bid.suit);
        while !trick.is_complete() {
            let seat = leader.offset(trick.plays().len());
            let prompt = match trick.lead_suit() {
                None => ServerMessage::LeadPrompt,
                Some(suit) => ServerMessage::FollowPrompt(suit),
            };
            let card = loop {
                self.send_to(seat, &prompt)?;
                let line = self.recv_from(seat)?;
                let card = match wire::parse_play(&line) {
                    Ok(card) => card,
                    Err(source) => {
                        return Err(SessionError::Protocol {
                            name: self.players[seat.index()].name.clone(),
                            source,
                        });
                    }
                };
                match hands[seat.index()].check_play(card, trick.lead_suit()) {
                    Ok(()) => break card,
                    Err(rejection) => {
                        debug!(
                            game = %self.name,
                            seat = %seat,
                            %card,
                            %rejection,
                            "play rejected, prompting again"
                        );
                    }
                }
            };
            let marked = hands[seat.index()].mark_played(card);
            debug_assert!(marked);
            trick.record(card);
            self.send_to(seat, &ServerMessage::PlayAccepted)?;
            self.broadcast_except(
                seat,
                &ServerMessage::Info(format!(
                    "{} plays {}",
                    self.players[seat.index()].name,
                    card
                )),
            );
        }
        Ok(trick.winner().expect("complete trick has a winner"))
    }

    fn send_to(&mut self, seat: Seat, message: &ServerMessage) -> Result<(), SessionError> {
        let player = &mut self.players[seat.index()];
        player.channel.send(message).map_err(|err| match err {
            ChannelError::Disconnected | ChannelError::Io(_) => SessionError::Disconnected {
                name: player.name.clone(),
            },
        })
    }

    fn recv_from(&mut self, seat: Seat) -> Result<String, SessionError> {
        let player = &mut self.players[seat.index()];
        player.channel.recv().map_err(|err| match err {
            ChannelError::Disconnected | ChannelError::Io(_) => SessionError::Disconnected {
                name: player.name.clone(),
            },
        })
    }

    /// Best effort: a seat that has gone away stops receiving
    /// broadcasts but does not end the game until its own turn.
    fn broadcast(&mut self, message: &ServerMessage) {
        for player in &mut self.players {
            let _ = player.channel.send(message);
        }
    }

    /// The acting seat already knows what it did; only the other three
    /// hear about it.
    fn broadcast_except(&mut self, actor: Seat, message: &ServerMessage) {
        for (index, player) in self.players.iter_mut().enumerate() {
            if index != actor.index() {
                let _ = player.channel.send(message);
            }
        }
    }
}
