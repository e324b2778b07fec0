//! Integration tests for gt-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{TickSummaryRow, TripRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(dir: &TempDir, file: &str) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn records(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
        let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
        rdr.records().map(|r| r.unwrap()).collect()
    }

    fn trip_row(vehicle_id: u32) -> TripRow {
        TripRow {
            vehicle_id,
            origin_node:      4,
            destination_node: 9,
            spawn_tick:       10,
            finish_tick:      200,
            travel_ticks:     190,
            min_travel_ticks: 165,
            wait_ticks:       25,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("trips.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("vehicle_snapshots.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("run").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("trips.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir, "trips.csv"),
            [
                "vehicle_id",
                "origin_node",
                "destination_node",
                "spawn_tick",
                "finish_tick",
                "travel_ticks",
                "min_travel_ticks",
                "wait_ticks",
            ]
        );
        assert_eq!(
            headers(&dir, "tick_summaries.csv"),
            ["tick", "spawned", "released", "finished", "queued", "active"]
        );
        assert_eq!(
            headers(&dir, "vehicle_snapshots.csv"),
            ["vehicle_id", "tick", "x", "y", "heading", "state"]
        );
    }

    #[test]
    fn csv_trip_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_trip(&trip_row(0)).unwrap();
        w.write_trip(&trip_row(7)).unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "trips.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "0");
        assert_eq!(&rows[1][0], "7");
        assert_eq!(&rows[1][5], "190"); // travel_ticks
        assert_eq!(&rows[1][7], "25");  // wait_ticks
    }

    #[test]
    fn csv_tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick: 3, spawned: 1, released: 4, finished: 2, queued: 6, active: 11,
        })
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "tick_summaries.csv");
        assert_eq!(rows.len(), 1);
        let fields: Vec<_> = rows[0].iter().collect();
        assert_eq!(fields, ["3", "1", "4", "2", "6", "11"]);
    }

    #[test]
    fn csv_snapshot_precision() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[VehicleSnapshotRow {
            vehicle_id: 2, tick: 40, x: 1.5, y: 0.25, heading: 0.0, state: "queued",
        }])
        .unwrap();
        w.finish().unwrap();

        let rows = records(&dir, "vehicle_snapshots.csv");
        let fields: Vec<_> = rows[0].iter().collect();
        assert_eq!(fields, ["2", "40", "1.5000", "0.2500", "0.0000", "queued"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use gt_core::{GridConfig, Tick};
    use gt_sim::{SimBuilder, SimObserver, TickSummary};
    use tempfile::TempDir;

    use crate::row::{TickSummaryRow, TripRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;
    use crate::{CsvWriter, OutputError, OutputResult, SimOutputObserver};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    /// Fails every summary write with a distinct message.
    #[derive(Default)]
    struct FailingWriter {
        attempts: usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_trip(&mut self, _: &TripRow) -> OutputResult<()> {
            Ok(())
        }
        fn write_tick_summary(&mut self, _: &TickSummaryRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other(format!("failure {}", self.attempts))))
        }
        fn write_snapshots(&mut self, _: &[VehicleSnapshotRow]) -> OutputResult<()> {
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = SimOutputObserver::new(FailingWriter::default());
        obs.on_tick_end(Tick(0), &TickSummary::default());
        obs.on_tick_end(Tick(1), &TickSummary::default());
        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("failure 1"), "{err}");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().attempts, 2);
    }

    #[test]
    fn integration_csv() {
        let config = GridConfig {
            height:                  2,
            width:                   2,
            horizon_ticks:           120,
            link_ticks:              8,
            turn_ticks:              2,
            phase_ticks:             6,
            snapshot_interval_ticks: 40,
            ..GridConfig::default()
        };
        let mut sim = SimBuilder::new(config).build().unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        let stats = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let count = |file: &str| {
            csv::Reader::from_path(dir.path().join(file)).unwrap().records().count()
        };
        assert_eq!(count("tick_summaries.csv"), 120);
        assert_eq!(count("trips.csv"), stats.finished);
        assert!(stats.finished > 0);

        // Snapshots at ticks 0, 40 and 80, one row per active vehicle.
        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let ticks: std::collections::BTreeSet<String> =
            rdr.records().map(|r| r.unwrap()[1].to_owned()).collect();
        let ticks: Vec<_> = ticks.into_iter().collect();
        assert_eq!(ticks, ["0", "40", "80"]);
    }
}
