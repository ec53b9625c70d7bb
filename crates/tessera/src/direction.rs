//! Cardinal directions on the grid.
//!
//! Screen convention: `y` grows downwards, so `Up` is `(0, -1)`.

use std::fmt;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One of the four unit steps an agent can take per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `(0, -1)`
    Up,
    /// `(0, 1)`
    Down,
    /// `(-1, 0)`
    Left,
    /// `(1, 0)`
    Right,
}

impl Direction {
    /// All four directions, in declaration order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Fixed last-resort order used when every preferred move is rejected.
    pub const FALLBACK_ORDER: [Direction; 4] =
        [Direction::Right, Direction::Left, Direction::Down, Direction::Up];

    /// The unit vector for this direction.
    #[must_use]
    pub const fn vector(self) -> IVec2 {
        match self {
            Self::Up => IVec2::new(0, -1),
            Self::Down => IVec2::new(0, 1),
            Self::Left => IVec2::new(-1, 0),
            Self::Right => IVec2::new(1, 0),
        }
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// True if `other` is the exact reversal of `self`.
    #[must_use]
    pub fn is_opposite(self, other: Self) -> bool {
        self.opposite() == other
    }

    /// Parse a raw vector. Anything other than a cardinal unit vector is `None`.
    #[must_use]
    pub fn from_vector(v: IVec2) -> Option<Self> {
        match (v.x, v.y) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }

    /// Unit step along x towards `delta`, if `delta` is nonzero.
    #[must_use]
    pub fn horizontal_towards(delta: i32) -> Option<Self> {
        match delta.signum() {
            1 => Some(Self::Right),
            -1 => Some(Self::Left),
            _ => None,
        }
    }

    /// Unit step along y towards `delta`, if `delta` is nonzero.
    #[must_use]
    pub fn vertical_towards(delta: i32) -> Option<Self> {
        match delta.signum() {
            1 => Some(Self::Down),
            -1 => Some(Self::Up),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "Up"),
            Self::Down => write!(f, "Down"),
            Self::Left => write!(f, "Left"),
            Self::Right => write!(f, "Right"),
        }
    }
}
