//! `gt-core`: foundational types for the gridtraffic simulator.
//!
//! This crate is a dependency of every other `gt-*` crate.  It has no `gt-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `IntersectionId`, `NodeId`, `EdgeId`, `VehicleId`         |
//! | [`compass`] | `Direction`, `Turn`, rotation tables                      |
//! | [`geo`]     | `Point`: unit-grid screen location                        |
//! | [`time`]    | `Tick`, `SimClock`                                        |
//! | [`config`]  | `GridConfig`, `QueueDiscipline`                           |
//! | [`rng`]     | `SimRng`: the single seeded randomness source             |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod compass;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use compass::{Direction, Turn};
pub use config::{GridConfig, QueueDiscipline};
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{EdgeId, IntersectionId, NodeId, VehicleId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
