//! Systems
//!
//! Heading choice, per-ant movement, the population arena, and the clock
//! that drives them.

pub mod clock;
pub mod direction;
pub mod movement;
pub mod population;

// Re-export commonly used systems
pub use clock::{run_parameters, SimulationClock};
pub use direction::{DirectionPolicy, UNCONSTRAINED_INTEREST};
pub use movement::{
    explore, follow, return_home, step_agent, ReleaseAmounts, StepOutcome, Surroundings,
};
pub use population::{default_release_lug, Population};
