//! Components
//!
//! Lattice geometry, the pheromone field, food, and per-ant state.

pub mod agent;
pub mod food;
pub mod lattice;
pub mod pheromone;

pub use agent::{Agent, Sensitivity, ThresholdProfiles, Thresholds};
pub use food::FoodRegistry;
pub use lattice::{Direction, HexCell, Lattice};
pub use pheromone::{Channel, FieldParams, PheromoneField, SENTINEL};
