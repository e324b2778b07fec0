//! Per-tick summaries, per-trip records, and end-of-run statistics.

use gt_core::{NodeId, Tick, VehicleId};
use gt_traffic::{Vehicle, VehicleStore};

/// Counts for one completed tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    pub tick:     Tick,
    pub spawned:  usize,
    pub released: usize,
    pub finished: usize,
    /// Vehicles waiting in a queue at the end of the tick.
    pub queued:   usize,
    /// Unfinished vehicles at the end of the tick, queued ones included.
    pub active:   usize,
}

/// One completed trip.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TripRecord {
    pub vehicle:          VehicleId,
    pub origin:           NodeId,
    pub destination:      NodeId,
    pub spawn_tick:       Tick,
    pub finish_tick:      Tick,
    pub travel_ticks:     u64,
    pub min_travel_ticks: u64,
    pub wait_ticks:       u64,
}

impl TripRecord {
    /// `None` while `vehicle` is still travelling.
    pub fn from_vehicle(vehicle: &Vehicle) -> Option<Self> {
        let finish_tick = vehicle.finish_tick?;
        Some(Self {
            vehicle:          vehicle.id,
            origin:           vehicle.origin,
            destination:      vehicle.destination,
            spawn_tick:       vehicle.spawn_tick,
            finish_tick,
            travel_ticks:     finish_tick.since(vehicle.spawn_tick),
            min_travel_ticks: vehicle.min_travel_ticks,
            wait_ticks:       vehicle.cumulative_wait,
        })
    }

    /// Realized minus minimum travel time.
    #[inline]
    pub fn deviation(&self) -> i64 {
        self.travel_ticks as i64 - self.min_travel_ticks as i64
    }
}

/// Statistics reported when the run reaches its horizon.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimStats {
    /// Mean cumulative queue wait over finished vehicles.
    pub mean_wait:      f64,
    /// Mean of realized minus minimum travel time over finished vehicles.
    pub mean_deviation: f64,
    pub unfinished:     usize,
    pub finished:       usize,
    pub spawned:        usize,
}

impl SimStats {
    /// Means are `0.0` when no vehicle has finished.
    pub fn collect(vehicles: &VehicleStore) -> Self {
        let (mut finished, mut wait, mut deviation) = (0usize, 0u64, 0i64);
        for trip in vehicles.finished().filter_map(TripRecord::from_vehicle) {
            finished += 1;
            wait += trip.wait_ticks;
            deviation += trip.deviation();
        }
        let mean = |total: f64| if finished == 0 { 0.0 } else { total / finished as f64 };
        Self {
            mean_wait:      mean(wait as f64),
            mean_deviation: mean(deviation as f64),
            unfinished:     vehicles.len() - finished,
            finished,
            spawned:        vehicles.len(),
        }
    }
}

impl std::fmt::Display for SimStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} spawned, {} finished, {} unfinished; mean wait {:.2} ticks, mean deviation {:.2} ticks",
            self.spawned, self.finished, self.unfinished, self.mean_wait, self.mean_deviation,
        )
    }
}
