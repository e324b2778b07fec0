//! Simulation observer trait for progress reporting and data collection.

use gt_core::Tick;

use crate::{SimStats, Snapshot, TickSummary, TripRecord};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress { interval: u64 }
///
/// impl SimObserver for Progress {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} active, {} queued", summary.active, summary.queued);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick's last vehicle has moved.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called once for each vehicle that leaves the grid, in vehicle ID order,
    /// before `on_tick_end` of the same tick.
    fn on_vehicle_finished(&mut self, _trip: &TripRecord) {}

    /// Called every `snapshot_interval_ticks` ticks, after `on_tick_end`.
    fn on_snapshot(&mut self, _tick: Tick, _snapshot: &Snapshot) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _stats: &SimStats) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
