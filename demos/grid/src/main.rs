//! grid: headless run of the signalled grid traffic simulator.
//!
//! Builds an H×L grid, spawns vehicles every tick between random fringe
//! endpoints, runs to the horizon, and prints the wait and delay statistics.
//!
//! ```text
//! RUST_LOG=debug cargo run -p grid -- --height 4 --width 5 --output output/grid
//! cargo run -p grid -- --config run.json --seed 7
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use gt_core::{GridConfig, QueueDiscipline, Tick};
use gt_output::{CsvWriter, SimOutputObserver};
use gt_sim::{NoopObserver, SimBuilder, SimObserver, SimStats, Snapshot, TickSummary, TripRecord};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "grid")]
#[command(about = "Signalled grid traffic simulation")]
struct Cli {
    /// JSON file with a GridConfig; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows of signalled intersections
    #[arg(long)]
    height: Option<u32>,

    /// Columns of signalled intersections
    #[arg(long)]
    width: Option<u32>,

    /// Ticks to simulate
    #[arg(long)]
    horizon: Option<u64>,

    /// Vehicles released per queue per tick
    #[arg(long)]
    capacity: Option<u32>,

    /// Ticks each signal phase lasts
    #[arg(long)]
    phase_ticks: Option<u64>,

    /// Transit ticks of a link between intersections
    #[arg(long)]
    link_ticks: Option<u64>,

    /// Transit ticks of a turn inside an intersection
    #[arg(long)]
    turn_ticks: Option<u64>,

    /// Vehicles spawned per tick
    #[arg(long)]
    spawn_per_tick: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Release the newest queued vehicle first
    #[arg(long)]
    lifo: bool,

    /// Write trips, tick summaries and vehicle snapshots as CSV into this directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Ticks between vehicle snapshots (0 = none)
    #[arg(long)]
    snapshot_interval: Option<u64>,
}

impl Cli {
    fn grid_config(&self) -> Result<GridConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GridConfig::default(),
        };
        macro_rules! apply {
            ($($flag:ident => $field:ident),* $(,)?) => {
                $(if let Some(v) = self.$flag { config.$field = v; })*
            };
        }
        apply! {
            height            => height,
            width             => width,
            horizon           => horizon_ticks,
            capacity          => release_capacity,
            phase_ticks       => phase_ticks,
            link_ticks        => link_ticks,
            turn_ticks        => turn_ticks,
            spawn_per_tick    => spawn_per_tick,
            seed              => seed,
            snapshot_interval => snapshot_interval_ticks,
        }
        if self.lifo {
            config.queue_discipline = QueueDiscipline::Lifo;
        }
        config.validate()?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<GridConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ── Observer wrapper for progress and row counts ─────────────────────────────

struct ProgressObserver<O: SimObserver> {
    inner:        O,
    report_every: u64,
    trips:        usize,
    snapshots:    usize,
}

impl<O: SimObserver> ProgressObserver<O> {
    fn new(inner: O, report_every: u64) -> Self {
        Self { inner, report_every: report_every.max(1), trips: 0, snapshots: 0 }
    }
}

impl<O: SimObserver> SimObserver for ProgressObserver<O> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        if (tick.0 + 1).is_multiple_of(self.report_every) {
            info!(
                "{}: {} active, {} queued, {} finished so far",
                tick + 1,
                summary.active,
                summary.queued,
                self.trips,
            );
        }
        self.inner.on_tick_end(tick, summary);
    }

    fn on_vehicle_finished(&mut self, trip: &TripRecord) {
        self.trips += 1;
        self.inner.on_vehicle_finished(trip);
    }

    fn on_snapshot(&mut self, tick: Tick, snapshot: &Snapshot) {
        self.snapshots += 1;
        self.inner.on_snapshot(tick, snapshot);
    }

    fn on_sim_end(&mut self, final_tick: Tick, stats: &SimStats) {
        self.inner.on_sim_end(final_tick, stats);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = cli.grid_config()?;

    println!("=== grid: signalled grid traffic ===");
    println!(
        "Grid: {}x{}  |  Horizon: {} ticks  |  Seed: {}  |  v* = {}  |  {:?}",
        config.height,
        config.width,
        config.horizon_ticks,
        config.seed,
        config.release_capacity,
        config.queue_discipline,
    );
    println!();

    let mut sim = SimBuilder::new(config.clone()).build()?;
    println!(
        "Topology: {} intersections, {} nodes, {} edges",
        sim.topology.intersection_count(),
        sim.topology.node_count(),
        sim.topology.edge_count(),
    );

    let t0 = Instant::now();
    let stats = match &cli.output {
        Some(dir) => {
            let writer = CsvWriter::new(dir)?;
            let mut obs = ProgressObserver::new(SimOutputObserver::new(writer), config.cycle_ticks());
            let stats = sim.run(&mut obs)?;
            if let Some(e) = obs.inner.take_error() {
                return Err(e).context("writing CSV output");
            }
            println!("Wrote {} trips and {} snapshots to {}", obs.trips, obs.snapshots, dir.display());
            stats
        }
        None => sim.run(&mut ProgressObserver::new(NoopObserver, config.cycle_ticks()))?,
    };
    let elapsed = t0.elapsed();

    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!();
    println!("{:<28} {:>12}", "Statistic", "Value");
    println!("{}", "-".repeat(41));
    println!("{:<28} {:>12}", "vehicles spawned", stats.spawned);
    println!("{:<28} {:>12}", "vehicles finished", stats.finished);
    println!("{:<28} {:>12}", "vehicles unfinished", stats.unfinished);
    println!("{:<28} {:>12.2}", "mean wait (ticks)", stats.mean_wait);
    println!("{:<28} {:>12.2}", "mean deviation (ticks)", stats.mean_deviation);

    Ok(())
}
