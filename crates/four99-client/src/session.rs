use crate::display::format_hand;
use crate::error::ClientError;
use four99_core::game::bidding::BidAction;
use four99_core::model::bid::Bid;
use four99_core::model::card::Card;
use four99_core::model::hand::HandCards;
use four99_core::model::suit::Suit;
use four99_core::wire::{self, ServerMessage};
use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;

/// Where the hand currently stands; server lines that do not fit the
/// phase are protocol errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    AwaitingHand,
    Bidding,
    Playing,
}

/// Interactive game client: prints server traffic, prompts on the
/// terminal, and screens responses locally so only well-formed, legal
/// lines ever reach the server.
pub struct ClientSession<I: BufRead, O: Write> {
    net_reader: BufReader<TcpStream>,
    net_writer: TcpStream,
    input: I,
    output: O,
    phase: Phase,
    hand: Option<HandCards>,
    pending: Option<Card>,
}

impl<I: BufRead, O: Write> ClientSession<I, O> {
    /// Connects, performs the joining handshake, and returns a session
    /// ready to run.
    pub fn connect(
        host: &str,
        port: u16,
        name: &str,
        game: &str,
        input: I,
        output: O,
    ) -> Result<Self, ClientError> {
        let stream = TcpStream::connect((host, port)).map_err(ClientError::Connect)?;
        let net_writer = stream.try_clone().map_err(ClientError::System)?;
        let mut session = Self {
            net_reader: BufReader::new(stream),
            net_writer,
            input,
            output,
            phase: Phase::AwaitingHand,
            hand: None,
            pending: None,
        };
        session.send(name)?;
        session.send(game)?;
        Ok(session)
    }

    /// Processes server messages until the game-over line. Any line
    /// that does not decode, arrives out of phase, or any loss of the
    /// server, is fatal.
    pub fn run(&mut self) -> Result<(), ClientError> {
        loop {
            let line = self.recv()?;
            match ServerMessage::decode(&line).map_err(|_| ClientError::Protocol)? {
                ServerMessage::Info(text) => self.show(&format!("Info: {text}\n"))?,
                ServerMessage::GameOver => return Ok(()),
                ServerMessage::DealtHand(cards) if self.phase == Phase::AwaitingHand => {
                    let hand = HandCards::new(cards);
                    self.show(&format_hand(&hand))?;
                    self.hand = Some(hand);
                    self.phase = Phase::Bidding;
                }
                ServerMessage::BidPrompt(standing) if self.phase == Phase::Bidding => {
                    self.prompt_bid(standing)?
                }
                ServerMessage::BidWon(bid) if self.phase == Phase::Bidding => {
                    self.show(&format!("Bid won: {bid}\n"))?;
                    self.phase = Phase::Playing;
                }
                ServerMessage::LeadPrompt if self.phase == Phase::Playing => {
                    self.prompt_play(None)?
                }
                ServerMessage::FollowPrompt(suit) if self.phase == Phase::Playing => {
                    self.prompt_play(Some(suit))?
                }
                ServerMessage::PlayAccepted if self.phase == Phase::Playing => {
                    self.confirm_play()?
                }
                _ => return Err(ClientError::Protocol),
            }
        }
    }

    /// The server accepted the last-sent card. A stray acknowledgement
    /// with nothing pending means the two sides have lost step.
    fn confirm_play(&mut self) -> Result<(), ClientError> {
        let card = self.pending.take().ok_or(ClientError::Protocol)?;
        let hand = self.hand.as_mut().ok_or(ClientError::Protocol)?;
        if !hand.mark_played(card) {
            return Err(ClientError::Protocol);
        }
        if hand.unplayed().next().is_none() {
            self.hand = None;
            self.phase = Phase::AwaitingHand;
        }
        Ok(())
    }

    /// Prompts until the entry is a bid the server would accept: the
    /// opener may not pass, and a bid must beat the standing one.
    fn prompt_bid(&mut self, standing: Option<Bid>) -> Result<(), ClientError> {
        loop {
            match standing {
                None => self.show("Bid> ")?,
                Some(bid) => self.show(&format!("[{bid}] - Bid (or pass)> "))?,
            }
            let entry = self.read_entry()?;
            match wire::parse_bid_action(&entry) {
                Err(_) => self.show("Not a bid. Enter rank then suit, or PP to pass.\n")?,
                Ok(BidAction::Pass) if standing.is_none() => {
                    self.show("You must open the bidding.\n")?
                }
                Ok(BidAction::Bid(bid)) if standing.is_some_and(|held| !bid.beats(held)) => {
                    self.show("Bid too low.\n")?
                }
                Ok(_) => return self.send(&entry),
            }
        }
    }

    /// Prompts until the entry names a card this hand can legally play
    /// right now, then sends it and remembers it for the accept line.
    fn prompt_play(&mut self, lead: Option<Suit>) -> Result<(), ClientError> {
        let rows = self.hand.as_ref().map(format_hand);
        if let Some(rows) = rows {
            self.show(&rows)?;
        }
        loop {
            match lead {
                None => self.show("Lead> ")?,
                Some(suit) => self.show(&format!("[{suit}] play> "))?,
            }
            let entry = self.read_entry()?;
            let Ok(card) = wire::parse_play(&entry) else {
                self.show("Not a card. Enter rank then suit.\n")?;
                continue;
            };
            let check = match self.hand.as_ref() {
                Some(hand) => hand.check_play(card, lead),
                None => return Err(ClientError::Protocol),
            };
            match check {
                Ok(()) => {
                    self.pending = Some(card);
                    return self.send(&entry);
                }
                Err(rejection) => self.show(&format!("{rejection}.\n"))?,
            }
        }
    }

    fn send(&mut self, line: &str) -> Result<(), ClientError> {
        self.net_writer
            .write_all(line.as_bytes())
            .and_then(|_| self.net_writer.write_all(b"\n"))
            .and_then(|_| self.net_writer.flush())
            .map_err(|_| ClientError::Protocol)
    }

    fn recv(&mut self) -> Result<String, ClientError> {
        let mut line = String::new();
        let read = self
            .net_reader
            .read_line(&mut line)
            .map_err(|_| ClientError::Protocol)?;
        if read == 0 {
            return Err(ClientError::Protocol);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    /// One trimmed line from the terminal; EOF means the user quit.
    fn read_entry(&mut self) -> Result<String, ClientError> {
        let mut entry = String::new();
        let read = self
            .input
            .read_line(&mut entry)
            .map_err(ClientError::System)?;
        if read == 0 {
            return Err(ClientError::UserQuit);
        }
        Ok(entry.trim().to_string())
    }

    fn show(&mut self, text: &str) -> Result<(), ClientError> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|_| self.output.flush())
            .map_err(ClientError::System)
    }
}
