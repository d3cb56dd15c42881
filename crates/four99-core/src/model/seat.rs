use core::fmt;

/// The four table positions, filled in sorted-name order when a
/// session starts. North opens the bidding for every hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Seat {
    pub const LOOP: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::East),
            2 => Some(Seat::South),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    /// The seat `steps` places clockwise from this one.
    pub fn offset(self, steps: usize) -> Seat {
        Seat::from_index((self.index() + steps) % 4).expect("seat index in range")
    }

    /// North and South play together against East and West.
    pub const fn team(self) -> Team {
        match self {
            Seat::North | Seat::South => Team::One,
            Seat::East | Seat::West => Team::Two,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Seat::North => "North",
            Seat::East => "East",
            Seat::South => "South",
            Seat::West => "West",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    One,
    Two,
}

impl Team {
    pub const fn seats(self) -> [Seat; 2] {
        match self {
            Team::One => [Seat::North, Seat::South],
            Team::Two => [Seat::East, Seat::West],
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::One => "Team 1",
            Team::Two => "Team 2",
        };
        f.write_str(label)
    }
}
