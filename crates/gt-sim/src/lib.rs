//! `gt-sim`: tick loop orchestrator for the gridtraffic simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.horizon_ticks:
//!   ① Signals: each interior intersection takes its override or scheduled
//!              phase, then ages one tick.
//!   ② Release: each signalled node frees up to v* left and v* straight
//!              vehicles whose movement the phase permits.
//!   ③ Spawn:   SpawnPolicy pairs become vehicles on their origin links.
//!   ④ Motion:  every unfinished vehicle advances in ID order.
//! ```
//!
//! The horizon is reached after `horizon_ticks` ticks; [`Sim::run`] then
//! returns [`SimStats`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gt_core::GridConfig;
//! use gt_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(GridConfig::default()).build()?;
//! let stats = sim.run(&mut NoopObserver)?;
//! println!("{stats}");
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod policy;
pub mod sim;
pub mod snapshot;
pub mod stats;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use policy::{FixedSchedule, ManualOverrides, ScriptedSpawner, SignalPolicy, SpawnPolicy, UniformSpawner};
pub use sim::Sim;
pub use snapshot::{EdgeView, IntersectionView, NodeView, Snapshot, VehicleView};
pub use stats::{SimStats, TickSummary, TripRecord};
