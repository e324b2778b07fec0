//! Per-intersection phase state.

use gt_core::{Direction, IntersectionId, Turn};

use crate::{PHASE_TABLE, Phase};

/// Phase clock of one interior intersection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignalController {
    /// Ticks this intersection has been stepped.
    pub age: u64,
    /// The phase in force for the current tick.
    pub phase: Phase,
    /// Whether `phase` came from an override rather than the schedule.
    pub overridden: bool,
    phase_ticks: u64,
}

impl SignalController {
    pub fn new(phase_ticks: u64) -> Self {
        Self {
            age:        0,
            phase:      Phase::default(),
            overridden: false,
            phase_ticks,
        }
    }

    /// Set this tick's phase, then age by one tick.
    ///
    /// With no override the phase follows the fixed schedule of the
    /// intersection's own age.
    pub fn step(&mut self, phase_override: Option<Phase>) {
        self.overridden = phase_override.is_some();
        self.phase = phase_override.unwrap_or_else(|| Phase::at(self.age, self.phase_ticks));
        self.age += 1;
    }

    #[inline]
    pub fn permits(&self, side: Direction, turn: Turn) -> bool {
        PHASE_TABLE.permits(self.phase, side, turn)
    }
}

/// Controllers for every interior intersection, indexed by `IntersectionId`.
///
/// Fringe intersections have no controller.
#[derive(Clone, Debug, Default)]
pub struct SignalBank {
    controllers: Vec<Option<SignalController>>,
}

impl SignalBank {
    /// One controller per ID in `interior`; `intersection_count` sizes the
    /// index space.
    pub fn new(intersection_count: usize, interior: &[IntersectionId], phase_ticks: u64) -> Self {
        let mut controllers = vec![None; intersection_count];
        for id in interior {
            controllers[id.index()] = Some(SignalController::new(phase_ticks));
        }
        Self { controllers }
    }

    /// Step every controller in ascending ID order.  `phase_override` is
    /// consulted once per interior intersection.
    pub fn step(&mut self, mut phase_override: impl FnMut(IntersectionId) -> Option<Phase>) {
        for (i, slot) in self.controllers.iter_mut().enumerate() {
            if let Some(ctrl) = slot {
                ctrl.step(phase_override(IntersectionId(i as u32)));
            }
        }
    }

    #[inline]
    pub fn get(&self, id: IntersectionId) -> Option<&SignalController> {
        self.controllers.get(id.index()).and_then(Option::as_ref)
    }

    /// Current phase, or `None` for a fringe intersection.
    #[inline]
    pub fn phase(&self, id: IntersectionId) -> Option<Phase> {
        self.get(id).map(|c| c.phase)
    }

    /// Whether `turn` from `side` may proceed at `id` this tick.
    ///
    /// Unsignalled (fringe) intersections permit everything.
    #[inline]
    pub fn permits(&self, id: IntersectionId, side: Direction, turn: Turn) -> bool {
        self.get(id).is_none_or(|c| c.permits(side, turn))
    }

    pub fn len(&self) -> usize {
        self.controllers.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
