//! Hex Trail Simulation Library
//!
//! Ants forage on a hexagonal lattice, laying and following two pheromone
//! trails. The public API builds a run from a `SimConfig` and drives it
//! through `SimulationClock`.

pub mod components;
pub mod config;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::*;
pub use config::{ConfigError, SimConfig, DEFAULT_TUNING_PATH};
pub use output::{CsvExporter, FrameWriter, OutputError, StatsCollector};
pub use setup::place_food;
pub use systems::{DirectionPolicy, Population, SimulationClock};

pub use trail_events::{Mode, ModeCounts, RenderFrame, RunRecord, RunSummary, TickRecord};
