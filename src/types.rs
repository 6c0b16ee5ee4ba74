use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Heading of a snake. Encoded 0..=3 clockwise from Up,
/// so opposite directions are always 2 apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Direction {
    /// Neighbour scan order used when hydrating a snake
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Down,
            _ => Direction::Left,
        }
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// (dcol, drow); rows grow downwards
    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        Direction::from_index(self.index() + 2)
    }

    /// 90° clockwise
    pub fn clockwise(self) -> Self {
        Direction::from_index(self.index() + 1)
    }

    /// Uniformly pick a direction that is not in `forbidden`.
    ///
    /// At most two directions are ever forbidden by callers, so the allowed
    /// set is never empty; `Up` is returned if it somehow is.
    pub fn random_except(rng: &mut impl Rng, forbidden: &[Direction]) -> Self {
        let allowed: Vec<Direction> = Direction::ALL
            .iter()
            .copied()
            .filter(|d| !forbidden.contains(d))
            .collect();
        allowed.choose(rng).copied().unwrap_or(Direction::Up)
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Direction::from_index(rng.gen_range(0..4))
    }
}

/// Grid coordinate (column, row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The cell one step away in `direction`
    pub fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.to_delta();
        Self::new(self.col + dc, self.row + dr)
    }
}

/// Presentation hint for a ring; never used for collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RingTag {
    Head,
    Body,
    Tail,
}

/// One segment of a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ring {
    pub pos: Position,
    pub tag: RingTag,
}

impl Ring {
    pub fn new(pos: Position, tag: RingTag) -> Self {
        Self { pos, tag }
    }
}

/// Who steers a snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeKind {
    Player,
    Agent,
}
