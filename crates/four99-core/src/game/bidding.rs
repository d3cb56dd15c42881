use crate::model::bid::Bid;
use crate::model::seat::Seat;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidAction {
    Pass,
    Bid(Bid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BidRejection {
    #[error("cannot pass before any bid has been made")]
    PassBeforeBid,
    #[error("bid does not beat the standing bid")]
    TooLow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BiddingError {
    #[error("bidding is still in progress")]
    Unfinished,
    #[error("bidding finished without a standing bid")]
    NoStandingBid,
}

/// Turn-by-turn bidding for one hand. North opens; the turn rotates
/// past seats that have passed. Bidding ends when three seats have
/// passed or the maximum bid lands.
///
/// A pass with no standing bid is rejected, so the all-pass hand is
/// unreachable through `respond`; `outcome` still refuses to invent a
/// default bid if that state is ever reached another way.
#[derive(Debug, Clone)]
pub struct BiddingState {
    turn: Seat,
    passed: [bool; 4],
    standing: Option<(Seat, Bid)>,
    finished: bool,
}

impl BiddingState {
    pub fn new() -> Self {
        Self {
            turn: Seat::North,
            passed: [false; 4],
            standing: None,
            finished: false,
        }
    }

    pub fn turn(&self) -> Seat {
        self.turn
    }

    /// The bid a prompt should show, if any bid stands yet.
    pub fn standing(&self) -> Option<Bid> {
        self.standing.map(|(_, bid)| bid)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Applies the current seat's response. On rejection nothing
    /// changes and the same seat stays on turn.
    pub fn respond(&mut self, action: BidAction) -> Result<(), BidRejection> {
        debug_assert!(!self.finished);
        match action {
            BidAction::Pass => {
                if self.standing.is_none() {
                    return Err(BidRejection::PassBeforeBid);
                }
                self.passed[self.turn.index()] = true;
                if self.passed.iter().filter(|passed| **passed).count() == 3 {
                    self.finished = true;
                    return Ok(());
                }
            }
            BidAction::Bid(bid) => {
                if let Some((_, standing)) = self.standing {
                    if !bid.beats(standing) {
                        return Err(BidRejection::TooLow);
                    }
                }
                self.standing = Some((self.turn, bid));
                if bid.is_maximum() {
                    self.finished = true;
                    return Ok(());
                }
            }
        }
        self.advance();
        Ok(())
    }

    fn advance(&mut self) {
        loop {
            self.turn = self.turn.next();
            if !self.passed[self.turn.index()] {
                break;
            }
        }
    }

    /// The winning seat and bid once bidding has finished.
    pub fn outcome(&self) -> Result<(Seat, Bid), BiddingError> {
        if !self.finished {
            return Err(BiddingError::Unfinished);
        }
        self.standing.ok_or(BiddingError::NoStandingBid)
    }
}

impl Default for BiddingState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{BidAction, BidRejection, BiddingError, BiddingState};
    use crate::model::bid::Bid;
    use crate::model::seat::Seat;

    fn bid(token: &str) -> BidAction {
        BidAction::Bid(Bid::parse(token).unwrap())
    }

    #[test]
    fn first_bidder_cannot_pass() {
        let mut bidding = BiddingState::new();
        assert_eq!(
            bidding.respond(BidAction::Pass),
            Err(BidRejection::PassBeforeBid)
        );
        assert_eq!(bidding.turn(), Seat::North);
        assert_eq!(bidding.standing(), None);
    }

    #[test]
    fn underbids_are_rejected_without_advancing_the_turn() {
        let mut bidding = BiddingState::new();
        bidding.respond(bid("6S")).unwrap();
        assert_eq!(bidding.turn(), Seat::East);
        assert_eq!(bidding.respond(bid("6S")), Err(BidRejection::TooLow));
        assert_eq!(bidding.respond(bid("5H")), Err(BidRejection::TooLow));
        assert_eq!(bidding.turn(), Seat::East);
        bidding.respond(bid("6C")).unwrap();
        assert_eq!(bidding.standing(), Some(Bid::parse("6C").unwrap()));
    }

    #[test]
    fn three_passes_end_bidding_with_the_standing_bidder() {
        let mut bidding = BiddingState::new();
        bidding.respond(bid("7D")).unwrap();
        bidding.respond(BidAction::Pass).unwrap();
        bidding.respond(BidAction::Pass).unwrap();
        assert!(!bidding.is_finished());
        bidding.respond(BidAction::Pass).unwrap();
        assert!(bidding.is_finished());
        assert_eq!(
            bidding.outcome(),
            Ok((Seat::North, Bid::parse("7D").unwrap()))
        );
    }

    #[test]
    fn maximum_bid_ends_bidding_immediately() {
        let mut bidding = BiddingState::new();
        bidding.respond(bid("4S")).unwrap();
        bidding.respond(bid("9H")).unwrap();
        assert!(bidding.is_finished());
        assert_eq!(
            bidding.outcome(),
            Ok((Seat::East, Bid::parse("9H").unwrap()))
        );
    }

    #[test]
    fn turn_skips_passed_seats() {
        let mut bidding = BiddingState::new();
        bidding.respond(bid("4S")).unwrap();
        bidding.respond(BidAction::Pass).unwrap();
        assert_eq!(bidding.turn(), Seat::South);
        bidding.respond(bid("4C")).unwrap();
        assert_eq!(bidding.turn(), Seat::West);
        bidding.respond(bid("4D")).unwrap();
        // East passed, so the rotation lands back on North.
        assert_eq!(bidding.turn(), Seat::North);
    }

    #[test]
    fn outcome_before_finishing_is_an_error() {
        let mut bidding = BiddingState::new();
        bidding.respond(bid("4S")).unwrap();
        assert_eq!(bidding.outcome(), Err(BiddingError::Unfinished));
    }
}
