//! `gt-signal`: signal phases for interior intersections.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`phase`]      | `Phase`, `PhaseTable`, the static `PHASE_TABLE`          |
//! | [`controller`] | `SignalController` (one intersection), `SignalBank` (all)|
//!
//! # Phase cycle
//!
//! Each interior intersection cycles through eight phases of `phase_ticks`
//! ticks each, counted from its own age:
//!
//! ```text
//! phase = (age / phase_ticks) mod 8
//! ```
//!
//! An external override supplied for a tick replaces the scheduled phase
//! for that tick only.  Right turns are never gated.

pub mod controller;
pub mod phase;

#[cfg(test)]
mod tests;

pub use controller::{SignalBank, SignalController};
pub use phase::{PHASE_TABLE, Phase, PhaseTable};
