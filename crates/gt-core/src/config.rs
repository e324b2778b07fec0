//! Top-level simulation configuration.

use crate::{CoreError, CoreResult};

/// Release order of a node's turn queues.
///
/// `Fifo` releases the vehicle that has waited longest.  `Lifo` releases the
/// most recent arrival first and exists only to compare against that
/// ordering; it is never the default.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QueueDiscipline {
    #[default]
    Fifo,
    Lifo,
}

/// Every construction parameter of a run.
///
/// Typically built with struct-update syntax over [`GridConfig::default`], or
/// loaded from JSON by the application when the `serde` feature is on.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Rows of interior (signalled) intersections.
    pub height: u32,

    /// Columns of interior intersections.
    pub width: u32,

    /// Maximum vehicles released per queue (left, straight) per node per tick.
    pub release_capacity: u32,

    /// Length of one signal phase in ticks.  The full cycle is eight phases.
    pub phase_ticks: u64,

    /// Total ticks to simulate.  Statistics are taken at this tick.
    pub horizon_ticks: u64,

    /// Transit ticks of a link between adjacent intersections.
    pub link_ticks: u64,

    /// Transit ticks of a maneuver edge inside an intersection.
    pub turn_ticks: u64,

    /// Vehicles spawned per tick by the default uniform spawner.
    pub spawn_per_tick: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Emit a render snapshot every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    pub queue_discipline: QueueDiscipline,
}

impl GridConfig {
    /// Number of phases in a signal cycle.
    pub const PHASE_COUNT: u64 = 8;

    /// Ticks in one full signal cycle.
    #[inline]
    pub fn cycle_ticks(&self) -> u64 {
        self.phase_ticks * Self::PHASE_COUNT
    }

    /// Reject parameters the engine cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        let checks: [(&str, bool); 6] = [
            ("height", self.height == 0),
            ("width", self.width == 0),
            ("release_capacity", self.release_capacity == 0),
            ("phase_ticks", self.phase_ticks == 0),
            ("link_ticks", self.link_ticks == 0),
            ("turn_ticks", self.turn_ticks == 0),
        ];
        match checks.iter().find(|(_, bad)| *bad) {
            Some((field, _)) => Err(CoreError::Config(format!("`{field}` must be at least 1"))),
            None => Ok(()),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            height:                  3,
            width:                   3,
            release_capacity:        2,
            phase_ticks:             30,
            horizon_ticks:           1_800,
            link_ticks:              150,
            turn_ticks:              15,
            spawn_per_tick:          1,
            seed:                    42,
            snapshot_interval_ticks: 0,
            queue_discipline:        QueueDiscipline::Fifo,
        }
    }
}
