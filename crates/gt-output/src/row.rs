//! Plain data row types written by output backends.

use gt_sim::{TickSummary, TripRecord, VehicleView};

/// One finished trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripRow {
    pub vehicle_id:       u32,
    pub origin_node:      u32,
    pub destination_node: u32,
    pub spawn_tick:       u64,
    pub finish_tick:      u64,
    pub travel_ticks:     u64,
    pub min_travel_ticks: u64,
    pub wait_ticks:       u64,
}

impl From<&TripRecord> for TripRow {
    fn from(t: &TripRecord) -> Self {
        Self {
            vehicle_id:       t.vehicle.0,
            origin_node:      t.origin.0,
            destination_node: t.destination.0,
            spawn_tick:       t.spawn_tick.0,
            finish_tick:      t.finish_tick.0,
            travel_ticks:     t.travel_ticks,
            min_travel_ticks: t.min_travel_ticks,
            wait_ticks:       t.wait_ticks,
        }
    }
}

/// Counts for one simulated tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:     u64,
    pub spawned:  u64,
    pub released: u64,
    pub finished: u64,
    pub queued:   u64,
    pub active:   u64,
}

impl From<&TickSummary> for TickSummaryRow {
    fn from(s: &TickSummary) -> Self {
        Self {
            tick:     s.tick.0,
            spawned:  s.spawned as u64,
            released: s.released as u64,
            finished: s.finished as u64,
            queued:   s.queued as u64,
            active:   s.active as u64,
        }
    }
}

/// Position of one active vehicle at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub vehicle_id: u32,
    pub tick:       u64,
    pub x:          f32,
    pub y:          f32,
    pub heading:    f32,
    /// `on_edge` or `queued`.
    pub state:      &'static str,
}

impl VehicleSnapshotRow {
    pub fn new(tick: u64, v: &VehicleView) -> Self {
        Self {
            vehicle_id: v.id.0,
            tick,
            x:          v.location.x,
            y:          v.location.y,
            heading:    v.heading,
            state:      v.state.as_str(),
        }
    }
}
