//! The `Sim` struct and its tick loop.

use gt_core::{GridConfig, IntersectionId, NodeId, SimClock, SimRng, Tick, VehicleId};
use gt_network::{GridTopology, RouteSynthesizer, check_endpoints};
use gt_signal::{Phase, SignalBank};
use gt_traffic::{TrafficEngine, Vehicle};
use log::{debug, info};

use crate::{
    ManualOverrides, SignalPolicy, SimObserver, SimResult, SimStats, Snapshot, SpawnPolicy,
    TickSummary, TripRecord,
};

/// The main simulation runner.
///
/// Each tick runs five passes in a fixed order:
///
/// 1. **Signals**: every interior intersection sets its phase (override or
///    schedule) and ages by one tick.
/// 2. **Release**: every signalled node releases permitted queued vehicles,
///    up to `release_capacity` per queue.
/// 3. **Edges**: nothing to do; edges hold no state of their own.
/// 4. **Spawn**: the spawn policy's endpoint pairs become new vehicles at the
///    start of their origin link.
/// 5. **Motion**: every unfinished vehicle advances in ID order, including
///    those spawned this tick.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: SpawnPolicy, P: SignalPolicy, R: RouteSynthesizer> {
    pub config:        GridConfig,
    pub clock:         SimClock,
    /// The run's only randomness source; spawning and route shuffling draw
    /// from it in tick order.
    pub rng:           SimRng,
    pub topology:      GridTopology,
    pub signals:       SignalBank,
    pub traffic:       TrafficEngine,
    pub spawner:       S,
    pub signal_policy: P,
    pub router:        R,
    pub(crate) overrides: ManualOverrides,
}

impl<S: SpawnPolicy, P: SignalPolicy, R: RouteSynthesizer> Sim<S, P, R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the clock reaches the horizon and return the final
    /// statistics.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimStats> {
        while !self.clock.at_horizon() {
            self.observed_tick(observer)?;
        }
        let stats = self.stats();
        info!("{}: {stats}", self.clock.current_tick);
        observer.on_sim_end(self.clock.current_tick, &stats);
        Ok(stats)
    }

    /// Run exactly `n` ticks from the current position, ignoring the horizon.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_tick(observer)?;
        }
        Ok(())
    }

    /// Run one tick with no observer.
    pub fn step(&mut self) -> SimResult<TickSummary> {
        let (summary, _) = self.process_tick(self.clock.current_tick)?;
        self.clock.advance();
        Ok(summary)
    }

    /// Insert a vehicle travelling from `origin` to `destination`, starting
    /// on the origin link at the current tick.
    ///
    /// Endpoints are validated before anything is drawn from the RNG, so a
    /// rejected spawn leaves the simulation untouched.
    pub fn spawn_vehicle(&mut self, origin: NodeId, destination: NodeId) -> SimResult<VehicleId> {
        check_endpoints(&self.topology, origin, destination)?;
        let route = self
            .router
            .synthesize(&self.topology, origin, destination, &mut self.rng)?;
        let id = self.traffic.next_vehicle_id();
        let vehicle = Vehicle::new(id, self.clock.current_tick, route)?;
        debug!(
            "{}: spawned {id} {origin} -> {destination} (min {} ticks)",
            self.clock.current_tick, vehicle.min_travel_ticks,
        );
        Ok(self.traffic.insert(vehicle))
    }

    /// Pin `intersection` to `phase` from the next tick on, or hand it back
    /// to its schedule with `None`.  Takes precedence over the signal policy.
    pub fn set_phase_override(&mut self, intersection: IntersectionId, phase: Option<Phase>) {
        self.overrides.set(intersection, phase);
    }

    /// Statistics over every vehicle spawned so far.
    pub fn stats(&self) -> SimStats {
        SimStats::collect(&self.traffic.vehicles)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.clock.current_tick, &self.topology, &self.signals, &self.traffic)
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.traffic.vehicles.get(id)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn observed_tick<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let (summary, finished) = self.process_tick(now)?;
        for id in finished {
            if let Some(trip) = self.vehicle(id).and_then(TripRecord::from_vehicle) {
                observer.on_vehicle_finished(&trip);
            }
        }
        observer.on_tick_end(now, &summary);
        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.snapshot());
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<(TickSummary, Vec<VehicleId>)> {
        // ── Signals ───────────────────────────────────────────────────────
        let (overrides, policy) = (&self.overrides, &self.signal_policy);
        self.signals.step(|id| {
            overrides
                .phase_override(id, now)
                .or_else(|| policy.phase_override(id, now))
        });

        // ── Queue release ─────────────────────────────────────────────────
        let released = self.traffic.release(&self.topology, &self.signals)?;

        // ── Spawn ─────────────────────────────────────────────────────────
        let pairs = self.spawner.spawn(now, &self.topology, &mut self.rng);
        let spawned = pairs.len();
        for (origin, destination) in pairs {
            self.spawn_vehicle(origin, destination)?;
        }

        // ── Motion ────────────────────────────────────────────────────────
        let finished = self.traffic.advance(&self.topology, now)?;

        let summary = TickSummary {
            tick:     now,
            spawned,
            released: released.total(),
            finished: finished.len(),
            queued:   self.traffic.queued_count(),
            active:   self.traffic.vehicles.active_count(),
        };
        Ok((summary, finished))
    }
}
