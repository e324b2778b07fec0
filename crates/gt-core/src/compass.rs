//! Compass directions and the fixed turn tables.
//!
//! Grid coordinates are `(row, col)` with row counted from the top and col
//! from the left, so `N` is `(-1, 0)` and `E` is `(0, 1)`.
//!
//! A node's direction is the compass side of its intersection it sits on.
//! Vehicles arriving at an incoming node on side `d` travel towards
//! `d.opposite()`; from there a left turn leaves through side `d.left()`,
//! straight through `d.opposite()` and a right turn through `d.right()`.

use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    E,
    N,
    W,
    S,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::E, Direction::N, Direction::W, Direction::S];

    /// Position in [`Direction::ALL`]; used to index static tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// `(d_row, d_col)` unit step towards this side.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::E => (0, 1),
            Direction::N => (-1, 0),
            Direction::W => (0, -1),
            Direction::S => (1, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::E => Direction::W,
            Direction::N => Direction::S,
            Direction::W => Direction::E,
            Direction::S => Direction::N,
        }
    }

    /// Exit side for a left turn made by a vehicle arriving from this side.
    #[inline]
    pub fn left(self) -> Direction {
        match self {
            Direction::E => Direction::S,
            Direction::N => Direction::E,
            Direction::W => Direction::N,
            Direction::S => Direction::W,
        }
    }

    /// Exit side for a right turn made by a vehicle arriving from this side.
    #[inline]
    pub fn right(self) -> Direction {
        match self {
            Direction::E => Direction::N,
            Direction::N => Direction::W,
            Direction::W => Direction::S,
            Direction::S => Direction::E,
        }
    }

    /// Exit side for `turn` made by a vehicle arriving from this side.
    #[inline]
    pub fn exit(self, turn: Turn) -> Direction {
        match turn {
            Turn::Left => self.left(),
            Turn::Straight => self.opposite(),
            Turn::Right => self.right(),
        }
    }

    /// The turn that takes a vehicle arriving from this side out through
    /// `exit`, or `None` for a U-turn.
    pub fn turn_towards(self, exit: Direction) -> Option<Turn> {
        Turn::ALL.into_iter().find(|&t| self.exit(t) == exit)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::E => "E",
            Direction::N => "N",
            Direction::W => "W",
            Direction::S => "S",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A movement through an interior intersection.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Turn {
    Left,
    Straight,
    Right,
}

impl Turn {
    pub const ALL: [Turn; 3] = [Turn::Left, Turn::Straight, Turn::Right];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Right turns are never held by the signal.
    #[inline]
    pub fn is_signalled(self) -> bool {
        !matches!(self, Turn::Right)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Turn::Left => "left",
            Turn::Straight => "straight",
            Turn::Right => "right",
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
