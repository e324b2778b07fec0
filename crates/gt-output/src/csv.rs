//! CSV output backend.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, TripRow, VehicleSnapshotRow};

pub const TRIPS_FILE: &str = "trips.csv";
pub const SUMMARIES_FILE: &str = "tick_summaries.csv";
pub const SNAPSHOTS_FILE: &str = "vehicle_snapshots.csv";

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    trips:     Writer<File>,
    summaries: Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three files in it, and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut trips = Writer::from_path(dir.join(TRIPS_FILE))?;
        trips.write_record([
            "vehicle_id",
            "origin_node",
            "destination_node",
            "spawn_tick",
            "finish_tick",
            "travel_ticks",
            "min_travel_ticks",
            "wait_ticks",
        ])?;

        let mut summaries = Writer::from_path(dir.join(SUMMARIES_FILE))?;
        summaries.write_record(["tick", "spawned", "released", "finished", "queued", "active"])?;

        let mut snapshots = Writer::from_path(dir.join(SNAPSHOTS_FILE))?;
        snapshots.write_record(["vehicle_id", "tick", "x", "y", "heading", "state"])?;

        Ok(Self { trips, summaries, snapshots, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_trip(&mut self, row: &TripRow) -> OutputResult<()> {
        self.trips.write_record(&[
            row.vehicle_id.to_string(),
            row.origin_node.to_string(),
            row.destination_node.to_string(),
            row.spawn_tick.to_string(),
            row.finish_tick.to_string(),
            row.travel_ticks.to_string(),
            row.min_travel_ticks.to_string(),
            row.wait_ticks.to_string(),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.spawned.to_string(),
            row.released.to_string(),
            row.finished.to_string(),
            row.queued.to_string(),
            row.active.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.vehicle_id.to_string(),
                row.tick.to_string(),
                format!("{:.4}", row.x),
                format!("{:.4}", row.y),
                format!("{:.4}", row.heading),
                row.state.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trips.flush()?;
        self.summaries.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
