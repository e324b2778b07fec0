//! The eight-phase movement table.
//!
//! | Phase | Permitted (side × turn)          |
//! |-------|----------------------------------|
//! | 0     | E, W × straight                  |
//! | 1     | E, W × left                      |
//! | 2     | N, S × straight                  |
//! | 3     | N, S × left                      |
//! | 4     | E × left, straight               |
//! | 5     | N × left, straight               |
//! | 6     | W × left, straight               |
//! | 7     | S × left, straight               |
//!
//! Sides are the side of the intersection a vehicle arrives on.

use std::fmt;

use gt_core::{Direction, Turn};

/// One of the eight signal phases.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Phase(u8);

impl Phase {
    pub const COUNT: u8 = 8;

    /// `None` if `index >= 8`.
    pub fn new(index: u8) -> Option<Phase> {
        (index < Self::COUNT).then_some(Phase(index))
    }

    /// The scheduled phase of an intersection that is `age` ticks old.
    #[inline]
    pub fn at(age: u64, phase_ticks: u64) -> Phase {
        Phase(((age / phase_ticks.max(1)) % Self::COUNT as u64) as u8)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = Phase> {
        (0..Self::COUNT).map(Phase)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

// [left, straight] per side, sides in `Direction::ALL` order (E, N, W, S).
const NONE: [bool; 2] = [false, false];
const LEFT: [bool; 2] = [true, false];
const THRU: [bool; 2] = [false, true];
const BOTH: [bool; 2] = [true, true];

/// Static lookup of permitted signalled movements per phase.
pub struct PhaseTable([[[bool; 2]; 4]; Phase::COUNT as usize]);

/// The process-wide phase table.
pub static PHASE_TABLE: PhaseTable = PhaseTable([
    [THRU, NONE, THRU, NONE],
    [LEFT, NONE, LEFT, NONE],
    [NONE, THRU, NONE, THRU],
    [NONE, LEFT, NONE, LEFT],
    [BOTH, NONE, NONE, NONE],
    [NONE, BOTH, NONE, NONE],
    [NONE, NONE, BOTH, NONE],
    [NONE, NONE, NONE, BOTH],
]);

impl PhaseTable {
    /// Whether a vehicle arriving on side `side` may make `turn` during `phase`.
    #[inline]
    pub fn permits(&self, phase: Phase, side: Direction, turn: Turn) -> bool {
        match turn {
            Turn::Right => true,
            Turn::Left => self.0[phase.index()][side.index()][0],
            Turn::Straight => self.0[phase.index()][side.index()][1],
        }
    }

    /// All signalled `(side, turn)` movements open during `phase`.
    pub fn movements(&self, phase: Phase) -> impl Iterator<Item = (Direction, Turn)> + '_ {
        Direction::ALL.into_iter().flat_map(move |side| {
            [Turn::Left, Turn::Straight]
                .into_iter()
                .filter(move |&turn| self.permits(phase, side, turn))
                .map(move |turn| (side, turn))
        })
    }
}
