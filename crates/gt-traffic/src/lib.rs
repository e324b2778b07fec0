//! `gt-traffic`: vehicles, turn queues, and the per-tick movement rules.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`vehicle`] | `Vehicle`, `VehicleState`, `Motion`: one vehicle's state machine |
//! | [`queue`]   | `TurnQueues`, `QueueStore`: left/straight queues per node      |
//! | [`store`]   | `VehicleStore`: all vehicles plus the active list              |
//! | [`engine`]  | `TrafficEngine`: queue release and motion passes               |
//! | [`error`]   | `TrafficError`, `TrafficResult<T>`                             |
//!
//! # Movement model
//!
//! ```text
//!           timer == transit, next is left/straight
//!  ON_EDGE ───────────────────────────────────────► QUEUED
//!     ▲  │                                            │
//!     │  │ timer == transit, end is fringe            │ released by
//!     │  ▼                                            │ signal phase
//!  FINISHED                                           │
//!     └───────────────────────────────────────────────┘
//! ```
//!
//! Right turns and links out of an intersection are taken without queueing.
//! Each tick the release pass runs before the motion pass, so a vehicle that
//! reaches a queue this tick can leave it next tick at the earliest.

pub mod engine;
pub mod error;
pub mod queue;
pub mod store;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use engine::{ReleaseCount, TrafficEngine};
pub use error::{TrafficError, TrafficResult};
pub use queue::{QueueStore, TurnQueues};
pub use store::VehicleStore;
pub use vehicle::{Motion, Vehicle, VehicleState};
