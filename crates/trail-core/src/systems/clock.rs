//! Simulation Clock
//!
//! Owns every piece of run state and advances it one tick at a time:
//! release, per-ant steps in slot order, one field update, one statistics
//! record.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use trail_events::{RenderFrame, RunParameters, RunRecord, TickRecord};

use crate::components::{FoodRegistry, Lattice, PheromoneField};
use crate::config::SimConfig;
use crate::output::{self, StatsCollector};
use crate::setup;

use super::direction::DirectionPolicy;
use super::movement::{step_agent, ReleaseAmounts, Surroundings};
use super::population::Population;

/// The whole simulation, driven tick by tick
#[derive(Debug, Clone)]
pub struct SimulationClock<R: Rng = SmallRng> {
    parameters: RunParameters,
    field: PheromoneField,
    food: FoodRegistry,
    population: Population,
    policy: DirectionPolicy,
    release: ReleaseAmounts,
    rng: R,
    tick: u64,
    tick_budget: u64,
    stats: StatsCollector,
}

impl SimulationClock<SmallRng> {
    /// Build a run from `config`, seeding a `SmallRng` with `seed`
    pub fn new(config: &SimConfig, seed: u64) -> Self {
        Self::with_rng(config, seed, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulationClock<R> {
    /// Build a run from `config` drawing from `rng`
    ///
    /// Food is placed first, then every population slot is spawned, so both
    /// consume the stream in that order. `seed` is only echoed in the
    /// run parameters.
    pub fn with_rng(config: &SimConfig, seed: u64, mut rng: R) -> Self {
        let lattice = Lattice::new(config.lattice.radius);
        let food = setup::place_food(&mut rng, &lattice, &config.food);
        let population = Population::new(
            &mut rng,
            config.colony.population,
            config.colony.energy_budget,
            config.threshold_profiles(),
            config.release_lug(),
        );
        let field = PheromoneField::new(lattice, config.field_params());

        let parameters = run_parameters(config, seed, population.release_lug(), &food);
        debug!(
            seed,
            radius = config.lattice.radius,
            cells = field.lattice().cell_count(),
            ants = population.capacity(),
            release_lug = population.release_lug(),
            "simulation initialized"
        );

        Self {
            parameters,
            field,
            food,
            population,
            policy: config.direction_policy(),
            release: config.release_amounts(),
            rng,
            tick: 0,
            tick_budget: config.simulation.tick_budget,
            stats: StatsCollector::new(),
        }
    }

    /// Advance one tick and return its statistics
    pub fn tick(&mut self) -> TickRecord {
        let tick = self.tick;
        self.population.release(tick);

        let Self {
            field,
            food,
            population,
            policy,
            release,
            rng,
            ..
        } = self;
        let mut world = Surroundings {
            field,
            food,
            policy,
            release,
        };

        for index in 0..population.active_count() {
            if population.slot(index).is_some_and(|ant| ant.is_spent()) {
                population.recycle(index, rng);
            }
            if let Some(ant) = population.slot_mut(index) {
                let outcome = step_agent(ant, &mut world, rng);
                if outcome.returned {
                    debug!(tick, slot = index, "ant returned home");
                }
            }
        }

        self.field.step();

        let record = TickRecord {
            tick,
            homing_probability: self.population.homing_probability(),
            homing_count: self.population.returned(),
            spawned: self.population.spawned(),
            modes: self.population.mode_counts(),
        };
        self.stats.record_tick(record.clone());
        self.tick += 1;
        record
    }

    /// Run the remaining tick budget
    pub fn run(&mut self) -> Option<TickRecord> {
        let mut last = None;
        while !self.is_finished() {
            last = Some(self.tick());
        }
        info!(
            ticks = self.tick,
            spawned = self.population.spawned(),
            returned = self.population.returned(),
            "run complete"
        );
        last
    }

    pub fn is_finished(&self) -> bool {
        self.tick >= self.tick_budget
    }

    /// Ticks completed so far
    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn tick_budget(&self) -> u64 {
        self.tick_budget
    }

    /// Completed ticks as a fraction of the budget
    pub fn progress(&self) -> f64 {
        if self.tick_budget == 0 {
            return 1.0;
        }
        self.tick as f64 / self.tick_budget as f64
    }

    /// Snapshot for renderers
    pub fn frame(&self) -> RenderFrame {
        output::capture(self)
    }

    pub fn statistics(&self) -> &StatsCollector {
        &self.stats
    }

    pub fn parameters(&self) -> &RunParameters {
        &self.parameters
    }

    /// Everything the exporter needs
    pub fn run_record(&self) -> RunRecord {
        RunRecord {
            parameters: self.parameters.clone(),
            series: self.stats.history().to_vec(),
            food_cells: self.food.cells().iter().map(|c| (c.q, c.r)).collect(),
        }
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Direct access for arranging scenarios before the first tick
    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub fn field(&self) -> &PheromoneField {
        &self.field
    }

    pub fn food(&self) -> &FoodRegistry {
        &self.food
    }

    pub fn lattice(&self) -> &Lattice {
        self.field.lattice()
    }
}

/// Flatten a config into the exported parameter echo
pub fn run_parameters(
    config: &SimConfig,
    seed: u64,
    release_lug: u64,
    food: &FoodRegistry,
) -> RunParameters {
    let colony = &config.colony;
    let pheromone = &config.pheromone;
    RunParameters {
        seed,
        radius: config.lattice.radius,
        population: colony.population,
        energy_budget: colony.energy_budget,
        release_lug,
        tick_budget: config.simulation.tick_budget,
        food_count: food.points().len(),
        food_surrounded: food.is_surrounded(),
        outbound_threshold_sensitive: colony.sensitive.outbound,
        outbound_threshold_insensitive: colony.insensitive.outbound,
        homeward_threshold_sensitive: colony.sensitive.homeward,
        homeward_threshold_insensitive: colony.insensitive.homeward,
        outbound_release: pheromone.outbound_release,
        homeward_release: pheromone.homeward_release,
        increment: config.policy.increment,
        scaling: config.policy.scaling,
        outbound_diffusion: pheromone.outbound_diffusion,
        outbound_evaporation: pheromone.outbound_evaporation,
        homeward_diffusion: pheromone.homeward_diffusion,
        homeward_evaporation: pheromone.homeward_evaporation,
        conserve_boundary_mass: pheromone.conserve_boundary_mass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::HexCell;
    use trail_events::Mode;

    fn small_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.lattice.radius = 6;
        config.colony.population = 8;
        config.colony.energy_budget = 12;
        config.simulation.tick_budget = 60;
        config.food.points = vec![[2, -1]];
        config
    }

    #[test]
    fn test_release_ramp() {
        let mut config = small_config();
        config.colony.release_lug = Some(3);
        let mut clock = SimulationClock::new(&config, 1);

        clock.tick();
        assert_eq!(clock.population().active_count(), 1);
        clock.tick();
        clock.tick();
        assert_eq!(clock.population().active_count(), 1);
        clock.tick();
        assert_eq!(clock.population().active_count(), 2);
    }

    #[test]
    fn test_tick_records_statistics() {
        let mut clock = SimulationClock::new(&small_config(), 3);
        let record = clock.tick();
        assert_eq!(record.tick, 0);
        assert_eq!(record.spawned, 8);
        assert_eq!(record.homing_probability, Some(0.0));
        assert_eq!(record.modes.total(), 1);
        assert_eq!(clock.current_tick(), 1);
        assert_eq!(clock.statistics().history().len(), 1);
    }

    #[test]
    fn test_run_to_budget() {
        let mut clock = SimulationClock::new(&small_config(), 4);
        let last = clock.run().unwrap();
        assert!(clock.is_finished());
        assert_eq!(last.tick, 59);
        assert_eq!(clock.progress(), 1.0);
        assert_eq!(clock.statistics().history().len(), 60);
        // nothing left to do
        assert!(clock.run().is_none());
    }

    #[test]
    fn test_exhausted_ants_are_recycled() {
        let mut config = small_config();
        config.colony.population = 1;
        config.colony.energy_budget = 2;
        config.food.points = vec![[6, 0]];
        let mut clock = SimulationClock::new(&config, 5);

        // a lifetime lasts at most energy + 1 active ticks before recycling
        for _ in 0..10 {
            clock.tick();
        }
        assert!(clock.population().spawned() > 1);
    }

    #[test]
    fn test_return_at_nest_counts_next_pass() {
        let mut config = small_config();
        config.colony.population = 1;
        let mut clock = SimulationClock::new(&config, 6);
        {
            let ant = clock.population_mut().slot_mut(0).unwrap();
            ant.mode = Mode::Return;
            ant.has_returned = true;
            ant.energy = 0;
        }

        let record = clock.tick();
        assert_eq!(record.homing_count, 1);
        assert_eq!(record.spawned, 2);
        let ant = clock.population().slot(0).unwrap();
        assert!(!ant.has_returned);
        assert_ne!(ant.position, HexCell::ORIGIN);
    }

    #[test]
    fn test_run_record_echoes_configuration() {
        let mut config = small_config();
        config.food.surrounded = true;
        let mut clock = SimulationClock::new(&config, 77);
        clock.tick();
        clock.tick();

        let record = clock.run_record();
        assert_eq!(record.parameters.seed, 77);
        assert_eq!(record.parameters.radius, 6);
        assert_eq!(record.parameters.food_count, 1);
        assert!(record.parameters.food_surrounded);
        assert_eq!(record.series.len(), 2);
        assert_eq!(record.food_cells.len(), 7);
        assert_eq!(record.food_cells[0], (2, -1));
    }
}
