//! Scenario tests
//!
//! Small hand-built runs checking heading choice, diffusion, food discovery,
//! and the invariants that must hold over a full run.

use trail_core::{
    Channel, Direction, FieldParams, HexCell, Lattice, Mode, PheromoneField, SimConfig,
    SimulationClock,
};

/// One ant, no trail dynamics, no food
fn lone_ant_config(radius: u32) -> SimConfig {
    let mut config = SimConfig::default();
    config.lattice.radius = radius;
    config.colony.population = 1;
    config.colony.energy_budget = 50;
    config.simulation.tick_budget = 100;
    config.food.count = 0;
    config.pheromone.outbound_release = 0.0;
    config.pheromone.homeward_release = 0.0;
    config.pheromone.outbound_diffusion = 0.0;
    config.pheromone.homeward_diffusion = 0.0;
    config.pheromone.outbound_evaporation = 0.0;
    config.pheromone.homeward_evaporation = 0.0;
    config
}

#[test]
fn test_explore_heading_is_uniform_over_fan() {
    let config = lone_ant_config(2);
    assert!(config.validate().is_ok());

    let mut counts = [0u32; 6];
    for seed in 0..10_000u64 {
        let mut clock = SimulationClock::new(&config, seed);
        clock.population_mut().slot_mut(0).unwrap().heading = Direction::Up;

        clock.tick();

        let ant = clock.population().slot(0).unwrap();
        assert_eq!(ant.energy, 49);
        assert_eq!(ant.mode, Mode::Explore);
        assert_eq!(ant.position, HexCell::ORIGIN.step(ant.heading));
        counts[ant.heading.index()] += 1;
    }

    assert_eq!(counts[Direction::DownRight.index()], 0);
    assert_eq!(counts[Direction::Down.index()], 0);
    assert_eq!(counts[Direction::DownLeft.index()], 0);
    for d in [Direction::UpLeft, Direction::Up, Direction::UpRight] {
        let n = counts[d.index()];
        assert!((3_033..3_633).contains(&n), "{d:?} chosen {n} times");
    }
}

#[test]
fn test_interior_diffusion_step() {
    let c = 0.01;
    let params = FieldParams {
        diffusion: [c, c],
        evaporation: [1.0, 1.0],
        conserve_boundary_mass: false,
    };
    let mut field = PheromoneField::new(Lattice::new(4), params);
    let source = HexCell::new(1, -1);
    field.set(source, Channel::Outbound, 100.0);

    field.step();

    assert!((field.get(source, Channel::Outbound) - (100.0 - 600.0 * c)).abs() < 1e-9);
    for d in Direction::ALL {
        let v = field.get(source.step(d), Channel::Outbound);
        assert!((v - 100.0 * c).abs() < 1e-9, "{d:?} got {v}");
    }
    assert_eq!(field.get(HexCell::new(-2, 0), Channel::Outbound), 0.0);
}

#[test]
fn test_entering_food_turns_ant_home() {
    let mut config = lone_ant_config(3);
    // the nest and all six cells around it hold food
    config.food.points = vec![[0, 0]];
    config.food.surrounded = true;
    let mut clock = SimulationClock::new(&config, 17);

    let record = clock.tick();

    let ant = clock.population().slot(0).unwrap();
    assert_ne!(ant.position, HexCell::ORIGIN);
    assert!(ant.has_food);
    assert_eq!(ant.mode, Mode::Return);
    assert_eq!(record.modes.returning, 1);
}

#[test]
fn test_run_invariants() {
    let mut config = SimConfig::default();
    config.lattice.radius = 8;
    config.colony.population = 40;
    config.colony.energy_budget = 30;
    config.simulation.tick_budget = 600;
    config.food.points = vec![[2, -2], [-3, 1]];
    config.food.surrounded = true;
    let budget = i64::from(config.colony.energy_budget);

    let mut clock = SimulationClock::new(&config, 314);
    let mut last_count = 0;

    while !clock.is_finished() {
        let record = clock.tick();

        assert!(record.homing_count >= last_count);
        last_count = record.homing_count;
        let p = record.homing_probability.unwrap();
        assert!((0.0..=1.0).contains(&p));

        for ant in clock.population().active_slots() {
            assert!(clock.lattice().is_valid(ant.position));
            assert!(ant.energy <= budget);
            if ant.has_returned {
                assert_eq!(ant.position, HexCell::ORIGIN);
                assert_eq!(ant.mode, Mode::Return);
            }
        }

        for cell in clock.lattice().cells() {
            for channel in Channel::ALL {
                assert!(clock.field().get(cell, channel) >= 0.0);
            }
        }
    }

    let summary = clock.statistics().summary(314);
    assert_eq!(summary.ticks, 600);
    assert_eq!(summary.total_returned, last_count);
    assert!(summary.total_spawned >= 40);
}

#[test]
fn test_energy_falls_each_active_tick() {
    let config = lone_ant_config(6);
    let mut clock = SimulationClock::new(&config, 8);

    let mut previous = i64::from(config.colony.energy_budget);
    for _ in 0..20 {
        clock.tick();
        let ant = clock.population().slot(0).unwrap();
        assert_eq!(ant.energy, previous - 1);
        previous = ant.energy;
    }
}
