//! Per-tick traffic passes: queue release, then vehicle motion.

use gt_core::{QueueDiscipline, Tick, Turn, VehicleId};
use gt_network::GridTopology;
use gt_signal::SignalBank;
use log::{debug, trace};

use crate::{Motion, QueueStore, TrafficError, TrafficResult, Vehicle, VehicleStore};

/// Vehicles released by one [`TrafficEngine::release`] pass.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct ReleaseCount {
    pub left:     usize,
    pub straight: usize,
}

impl ReleaseCount {
    #[inline]
    pub fn total(self) -> usize {
        self.left + self.straight
    }
}

/// Owns every vehicle and every turn queue.
///
/// The orchestrator calls [`release`](Self::release) once per tick after the
/// signals have stepped and before [`advance`](Self::advance).
pub struct TrafficEngine {
    pub vehicles:     VehicleStore,
    pub queues:       QueueStore,
    release_capacity: u32,
}

impl TrafficEngine {
    pub fn new(topology: &GridTopology, release_capacity: u32, discipline: QueueDiscipline) -> Self {
        Self {
            vehicles: VehicleStore::new(),
            queues:   QueueStore::new(topology, discipline),
            release_capacity,
        }
    }

    #[inline]
    pub fn release_capacity(&self) -> u32 {
        self.release_capacity
    }

    #[inline]
    pub fn next_vehicle_id(&self) -> VehicleId {
        self.vehicles.next_id()
    }

    pub fn insert(&mut self, vehicle: Vehicle) -> VehicleId {
        self.vehicles.insert(vehicle)
    }

    /// Release queued vehicles whose movement the current phase permits.
    ///
    /// Each signalled node releases at most `release_capacity` vehicles from
    /// its left queue and, independently, at most `release_capacity` from its
    /// straight queue.  Released vehicles go straight onto their next route
    /// edge and cannot re-enter a queue until the motion pass.
    pub fn release(
        &mut self,
        topology: &GridTopology,
        signals:  &SignalBank,
    ) -> TrafficResult<ReleaseCount> {
        let mut count = ReleaseCount::default();
        for &node_id in topology.signalled_nodes() {
            let node = topology.node(node_id);
            for turn in [Turn::Left, Turn::Straight] {
                if !signals.permits(node.intersection, node.direction(), turn) {
                    continue;
                }
                for _ in 0..self.release_capacity {
                    let Some(vid) = self.queues.pop(node_id, turn) else { break };
                    self.vehicles
                        .get_mut(vid)
                        .ok_or(TrafficError::NotQueuedAt { vehicle: vid, node: node_id })?
                        .depart(node_id)?;
                    trace!("{vid} released {turn} at {node_id}");
                    match turn {
                        Turn::Left => count.left += 1,
                        _          => count.straight += 1,
                    }
                }
            }
        }
        Ok(count)
    }

    /// Step every active vehicle in ID order, queueing arrivals.
    ///
    /// Returns the vehicles that finished during tick `now`.
    pub fn advance(&mut self, topology: &GridTopology, now: Tick) -> TrafficResult<Vec<VehicleId>> {
        let mut finished = Vec::new();
        for i in 0..self.vehicles.active_count() {
            let id = self.vehicles.active()[i];
            let vehicle = self.vehicles.get_mut(id).ok_or(TrafficError::UnknownVehicle(id))?;
            match vehicle.advance(topology, now)? {
                Motion::Arrived { node, turn } => self.queues.enqueue(node, turn, id)?,
                Motion::Finished => {
                    debug!(
                        "{id} finished at {} after {} ticks (min {}, waited {})",
                        now + 1,
                        vehicle.travel_ticks().unwrap_or_default(),
                        vehicle.min_travel_ticks,
                        vehicle.cumulative_wait,
                    );
                    finished.push(id);
                }
                Motion::Moving | Motion::Waiting | Motion::Idle => {}
            }
        }
        if !finished.is_empty() {
            self.vehicles.prune_active();
        }
        Ok(finished)
    }

    /// Vehicles currently waiting in any queue.
    pub fn queued_count(&self) -> usize {
        self.queues.total_queued()
    }
}
