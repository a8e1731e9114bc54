//! Hex Trail Simulation
//!
//! Runs one seeded foraging simulation, logs progress, and writes the CSV
//! export and run summary when the tick budget is spent.

use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

use trail_core::output::{self, CsvExporter, FrameWriter, FRAMES_FILE_NAME};
use trail_core::{SimConfig, SimulationClock, DEFAULT_TUNING_PATH};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "trail_sim")]
#[command(about = "Ant foraging on a hexagonal lattice with two pheromone trails")]
struct Args {
    /// Tuning file (defaults to tuning.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Number of ant slots
    #[arg(long)]
    ants: Option<usize>,

    /// Lattice radius
    #[arg(long)]
    radius: Option<u32>,

    /// Directory for the CSV export, stats, and frames
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Write a render frame every N ticks
    #[arg(long)]
    frames: Option<u64>,

    /// Ticks between progress lines (defaults to the energy budget)
    #[arg(long)]
    progress_interval: Option<u64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    fn apply(&self, config: &mut SimConfig) {
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(ticks) = self.ticks {
            config.simulation.tick_budget = ticks;
        }
        if let Some(ants) = self.ants {
            config.colony.population = ants;
        }
        if let Some(radius) = self.radius {
            config.lattice.radius = radius;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::load_or_default(DEFAULT_TUNING_PATH),
    };
    args.apply(&mut config);
    config.validate()?;

    if args.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let seed = config.resolve_seed();
    let mut clock = SimulationClock::new(&config, seed);

    let params = clock.parameters();
    info!(
        seed,
        radius = params.radius,
        ants = params.population,
        energy = params.energy_budget,
        release_lug = params.release_lug,
        ticks = params.tick_budget,
        food = params.food_count,
        surrounded = params.food_surrounded,
        "starting simulation"
    );
    for (i, point) in clock.food().points().iter().enumerate() {
        info!(index = i, q = point.q, r = point.r, "food");
    }

    let mut frames = match args.frames {
        Some(every) if every > 0 => {
            std::fs::create_dir_all(&args.output_dir)?;
            let path = args.output_dir.join(FRAMES_FILE_NAME);
            info!(path = %path.display(), every, "writing render frames");
            Some((FrameWriter::new(path)?, every))
        }
        _ => None,
    };

    let progress_interval = args
        .progress_interval
        .unwrap_or(u64::from(config.colony.energy_budget))
        .max(1);
    let started = Instant::now();

    while !clock.is_finished() {
        let record = clock.tick();
        let done = clock.current_tick();

        if let Some((writer, every)) = frames.as_mut() {
            if done % *every == 0 {
                writer.write(&clock.frame())?;
            }
        }

        if done % progress_interval == 0 {
            let remaining = estimate_remaining(started.elapsed(), done, clock.tick_budget());
            info!(
                tick = done,
                budget = clock.tick_budget(),
                homing = record.homing_probability.unwrap_or(0.0),
                returned = record.homing_count,
                spawned = record.spawned,
                explore = record.modes.explore,
                follow = record.modes.follow,
                returning = record.modes.returning,
                "~{}s left",
                remaining.as_secs()
            );
        }
    }

    if let Some((mut writer, _)) = frames.take() {
        writer.flush()?;
        info!(frames = writer.frame_count(), "frames written");
    }

    let exporter = CsvExporter::new(&args.output_dir);
    exporter.export(&clock.run_record())?;

    let summary = clock.statistics().summary(seed);
    let stats_path = output::stats_path(&args.output_dir, seed);
    output::write_stats(&summary, &stats_path)?;
    info!(path = %stats_path.display(), "wrote run summary");

    info!(
        "Simulation complete: {}/{} ants came back after {} ticks",
        summary.total_returned, summary.total_spawned, summary.ticks
    );
    Ok(())
}

/// Linear extrapolation of the time still needed
fn estimate_remaining(elapsed: Duration, done: u64, budget: u64) -> Duration {
    if done == 0 || done >= budget {
        return Duration::ZERO;
    }
    elapsed.mul_f64((budget - done) as f64 / done as f64)
}
