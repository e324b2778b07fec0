//! Fluent builder for constructing a [`Sim`].

use gt_core::{GridConfig, SimClock, SimRng};
use gt_network::{MonotoneRouter, RouteSynthesizer, TopologyBuilder};
use gt_signal::SignalBank;
use gt_traffic::TrafficEngine;

use crate::{FixedSchedule, ManualOverrides, Sim, SimResult, SignalPolicy, SpawnPolicy, UniformSpawner};

/// Fluent builder for [`Sim<S, P, R>`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                   |
/// |-------------------|-------------------------------------------|
/// | `.spawner(s)`     | `UniformSpawner::new(config.spawn_per_tick)` |
/// | `.signals(p)`     | `FixedSchedule`                           |
/// | `.router(r)`      | `MonotoneRouter`                          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(GridConfig::default()).build()?;
/// let stats = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<S = UniformSpawner, P = FixedSchedule, R = MonotoneRouter> {
    config:  GridConfig,
    spawner: S,
    signals: P,
    router:  R,
}

impl SimBuilder {
    pub fn new(config: GridConfig) -> Self {
        Self {
            spawner: UniformSpawner::new(config.spawn_per_tick),
            signals: FixedSchedule,
            router:  MonotoneRouter,
            config,
        }
    }
}

impl<S: SpawnPolicy, P: SignalPolicy, R: RouteSynthesizer> SimBuilder<S, P, R> {
    /// Replace the spawn policy.
    pub fn spawner<S2: SpawnPolicy>(self, spawner: S2) -> SimBuilder<S2, P, R> {
        SimBuilder { config: self.config, spawner, signals: self.signals, router: self.router }
    }

    /// Replace the signal override policy.
    pub fn signals<P2: SignalPolicy>(self, signals: P2) -> SimBuilder<S, P2, R> {
        SimBuilder { config: self.config, spawner: self.spawner, signals, router: self.router }
    }

    /// Replace the route synthesizer.
    pub fn router<R2: RouteSynthesizer>(self, router: R2) -> SimBuilder<S, P, R2> {
        SimBuilder { config: self.config, spawner: self.spawner, signals: self.signals, router }
    }

    /// Validate the config, build the grid, and return a ready-to-run
    /// [`Sim`] at tick 0.
    pub fn build(self) -> SimResult<Sim<S, P, R>> {
        self.config.validate()?;
        let topology = TopologyBuilder::from_config(&self.config).build()?;
        let signals = SignalBank::new(
            topology.intersection_count(),
            topology.interior_intersections(),
            self.config.phase_ticks,
        );
        let traffic = TrafficEngine::new(
            &topology,
            self.config.release_capacity,
            self.config.queue_discipline,
        );

        Ok(Sim {
            clock:         SimClock::new(self.config.horizon_ticks),
            rng:           SimRng::new(self.config.seed),
            config:        self.config,
            topology,
            signals,
            traffic,
            spawner:       self.spawner,
            signal_policy: self.signals,
            overrides:     ManualOverrides::default(),
            router:        self.router,
        })
    }
}
