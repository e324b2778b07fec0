//! Pluggable spawn and signal policies.

use gt_core::{IntersectionId, NodeId, SimRng, Tick};
use gt_network::GridTopology;
use gt_signal::Phase;
use log::warn;
use rustc_hash::FxHashMap;

// ── SpawnPolicy ───────────────────────────────────────────────────────────────

/// Decides which vehicles enter the grid each tick.
///
/// Returned pairs are `(outgoing fringe origin, incoming fringe destination)`
/// and are spawned in order.  Any randomness must come from `rng`.
pub trait SpawnPolicy: Send + 'static {
    fn spawn(
        &mut self,
        tick:     Tick,
        topology: &GridTopology,
        rng:      &mut SimRng,
    ) -> Vec<(NodeId, NodeId)>;
}

/// `per_tick` vehicles every tick, each between a uniformly random outgoing
/// fringe node and a uniformly random incoming fringe node on a different
/// intersection.
#[derive(Copy, Clone, Debug)]
pub struct UniformSpawner {
    pub per_tick: u32,
}

impl UniformSpawner {
    pub fn new(per_tick: u32) -> Self {
        Self { per_tick }
    }
}

impl SpawnPolicy for UniformSpawner {
    fn spawn(
        &mut self,
        tick:     Tick,
        topology: &GridTopology,
        rng:      &mut SimRng,
    ) -> Vec<(NodeId, NodeId)> {
        let mut pairs = Vec::with_capacity(self.per_tick as usize);
        for _ in 0..self.per_tick {
            let Some(&origin) = rng.choose(topology.outgoing_fringe_nodes()) else {
                warn!("{tick}: grid has no outgoing fringe nodes, nothing spawned");
                break;
            };
            let from = topology.node(origin).intersection;
            let candidates: Vec<NodeId> = topology
                .incoming_fringe_nodes()
                .iter()
                .copied()
                .filter(|&n| topology.node(n).intersection != from)
                .collect();
            match rng.choose(&candidates) {
                Some(&dest) => pairs.push((origin, dest)),
                None => warn!("{tick}: no destination for {origin}, skipped"),
            }
        }
        pairs
    }
}

/// Replays a fixed list of `(tick, origin, destination)` spawns.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSpawner {
    by_tick: FxHashMap<Tick, Vec<(NodeId, NodeId)>>,
}

impl ScriptedSpawner {
    pub fn new(script: impl IntoIterator<Item = (Tick, NodeId, NodeId)>) -> Self {
        let mut by_tick: FxHashMap<Tick, Vec<(NodeId, NodeId)>> = FxHashMap::default();
        for (tick, origin, dest) in script {
            by_tick.entry(tick).or_default().push((origin, dest));
        }
        Self { by_tick }
    }

    /// Spawns not yet replayed.
    pub fn pending(&self) -> usize {
        self.by_tick.values().map(Vec::len).sum()
    }
}

impl SpawnPolicy for ScriptedSpawner {
    fn spawn(&mut self, tick: Tick, _: &GridTopology, _: &mut SimRng) -> Vec<(NodeId, NodeId)> {
        self.by_tick.remove(&tick).unwrap_or_default()
    }
}

// ── SignalPolicy ──────────────────────────────────────────────────────────────

/// External control of signal phases.
///
/// Consulted once per interior intersection per tick, before queues are
/// released.  `None` lets the intersection follow its fixed schedule.
pub trait SignalPolicy: Send + 'static {
    fn phase_override(&self, intersection: IntersectionId, tick: Tick) -> Option<Phase>;
}

/// The fixed cyclic schedule with no overrides.
#[derive(Copy, Clone, Debug, Default)]
pub struct FixedSchedule;

impl SignalPolicy for FixedSchedule {
    #[inline]
    fn phase_override(&self, _: IntersectionId, _: Tick) -> Option<Phase> {
        None
    }
}

/// Standing per-intersection overrides, held until cleared.
#[derive(Clone, Debug, Default)]
pub struct ManualOverrides {
    phases: FxHashMap<IntersectionId, Phase>,
}

impl ManualOverrides {
    /// Pin `intersection` to `phase`, or release it back to its schedule
    /// with `None`.
    pub fn set(&mut self, intersection: IntersectionId, phase: Option<Phase>) {
        match phase {
            Some(p) => self.phases.insert(intersection, p),
            None    => self.phases.remove(&intersection),
        };
    }

    pub fn get(&self, intersection: IntersectionId) -> Option<Phase> {
        self.phases.get(&intersection).copied()
    }
}

impl SignalPolicy for ManualOverrides {
    #[inline]
    fn phase_override(&self, intersection: IntersectionId, _: Tick) -> Option<Phase> {
        self.get(intersection)
    }
}
