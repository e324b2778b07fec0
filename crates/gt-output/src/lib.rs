//! `gt-output`: CSV output for the gridtraffic simulator.
//!
//! [`CsvWriter`] creates three files in its output directory:
//!
//! | File                    | One row per                               |
//! |-------------------------|-------------------------------------------|
//! | `trips.csv`             | finished vehicle                          |
//! | `tick_summaries.csv`    | simulated tick                            |
//! | `vehicle_snapshots.csv` | active vehicle at each snapshot tick      |
//!
//! Writers implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `gt_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gt_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{TickSummaryRow, TripRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
