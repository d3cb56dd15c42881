use crate::model::bid::Bid;
use crate::model::seat::Team;

/// A match ends once either team's score magnitude reaches this.
pub const WIN_THRESHOLD: i32 = 499;

/// Running match scores. Unbounded in both directions; a team that
/// keeps failing its bids can win by driving the other side to -499.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamScores {
    team_one: i32,
    team_two: i32,
}

impl TeamScores {
    pub const fn new() -> Self {
        Self {
            team_one: 0,
            team_two: 0,
        }
    }

    pub const fn team_one(&self) -> i32 {
        self.team_one
    }

    pub const fn team_two(&self) -> i32 {
        self.team_two
    }

    pub const fn get(&self, team: Team) -> i32 {
        match team {
            Team::One => self.team_one,
            Team::Two => self.team_two,
        }
    }

    /// Applies one hand's result: the bidding team gains the bid value
    /// if its trick total met the bid's rank, and loses it otherwise.
    /// Always applied in full, even when it pushes a score past the
    /// winning threshold.
    pub fn apply_hand(&mut self, bid: Bid, bidding_team: Team, tricks_won: u8) {
        let mut value = bid.value();
        if tricks_won < bid.rank.tricks_required() {
            value = -value;
        }
        match bidding_team {
            Team::One => self.team_one += value,
            Team::Two => self.team_two += value,
        }
    }

    pub const fn game_over(&self) -> bool {
        self.team_one.abs() >= WIN_THRESHOLD || self.team_two.abs() >= WIN_THRESHOLD
    }

    /// The winner once the game is over: Team 1 on its own high score
    /// or on Team 2's collapse, Team 2 in the remaining cases.
    pub const fn winner(&self) -> Option<Team> {
        if !self.game_over() {
            return None;
        }
        if self.team_one >= WIN_THRESHOLD || self.team_two <= -WIN_THRESHOLD {
            Some(Team::One)
        } else {
            Some(Team::Two)
        }
    }
}
