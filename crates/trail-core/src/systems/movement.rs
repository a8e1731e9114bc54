//! Movement
//!
//! One tick of one ant: deposit, pick a heading, move, spend energy, and
//! settle the next mode. Each mode has its own rule; `step_agent` dispatches.

use rand::Rng;
use tracing::trace;

use trail_events::Mode;

use crate::components::{Agent, Channel, Direction, FoodRegistry, PheromoneField};

use super::direction::DirectionPolicy;

/// Pheromone laid per step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReleaseAmounts {
    /// Channel 0, laid while exploring or following
    pub outbound: f64,
    /// Channel 1, laid while returning
    pub homeward: f64,
}

impl Default for ReleaseAmounts {
    fn default() -> Self {
        Self {
            outbound: 2.0,
            homeward: 1.0,
        }
    }
}

/// Everything an ant reads or writes besides itself
pub struct Surroundings<'a> {
    pub field: &'a mut PheromoneField,
    pub food: &'a FoodRegistry,
    pub policy: &'a DirectionPolicy,
    pub release: &'a ReleaseAmounts,
}

/// What happened during one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Mode before the step
    pub from: Mode,
    /// Mode after the step
    pub to: Mode,
    /// False when the chosen cell was outside the lattice
    pub moved: bool,
    pub found_food: bool,
    pub returned: bool,
}

/// Run the rule for the ant's current mode
pub fn step_agent<R: Rng + ?Sized>(
    agent: &mut Agent,
    world: &mut Surroundings<'_>,
    rng: &mut R,
) -> StepOutcome {
    match agent.mode {
        Mode::Explore => explore(agent, world, rng),
        Mode::Follow => follow(agent, world, rng),
        Mode::Return => return_home(agent, world, rng),
    }
}

/// Random forward wander, laying outbound trail
pub fn explore<R: Rng + ?Sized>(
    agent: &mut Agent,
    world: &mut Surroundings<'_>,
    rng: &mut R,
) -> StepOutcome {
    world
        .field
        .deposit(agent.position, Channel::Outbound, world.release.outbound);
    let heading = DirectionPolicy::uniform_heading(rng, agent.heading);
    let moved = advance(agent, heading, world.field);
    agent.energy -= 1;

    let mut next = Mode::Explore;
    if trail_nearby(agent, world.field) {
        next = Mode::Follow;
    }
    settle(agent, world.food, Mode::Explore, next, moved)
}

/// Trail-biased wander, laying outbound trail and steering by homeward trail
pub fn follow<R: Rng + ?Sized>(
    agent: &mut Agent,
    world: &mut Surroundings<'_>,
    rng: &mut R,
) -> StepOutcome {
    world
        .field
        .deposit(agent.position, Channel::Outbound, world.release.outbound);
    let heading = world.policy.weighted_heading(
        rng,
        world.field,
        agent.position,
        agent.heading,
        Channel::Homeward,
    );
    let moved = advance(agent, heading, world.field);
    agent.energy -= 1;

    let mut next = Mode::Follow;
    if !trail_nearby(agent, world.field) {
        next = Mode::Explore;
    }
    settle(agent, world.food, Mode::Follow, next, moved)
}

/// Homing, laying homeward trail and steering by outbound trail
pub fn return_home<R: Rng + ?Sized>(
    agent: &mut Agent,
    world: &mut Surroundings<'_>,
    rng: &mut R,
) -> StepOutcome {
    world
        .field
        .deposit(agent.position, Channel::Homeward, world.release.homeward);
    let heading = world.policy.weighted_heading(
        rng,
        world.field,
        agent.position,
        agent.heading,
        Channel::Outbound,
    );
    let moved = advance(agent, heading, world.field);
    agent.energy -= 1;

    let mut returned = false;
    if agent.position.is_origin() && !agent.has_returned {
        agent.has_returned = true;
        agent.energy = 0;
        returned = true;
        trace!(has_food = agent.has_food, "ant reached the nest");
    }

    StepOutcome {
        from: Mode::Return,
        to: Mode::Return,
        moved,
        found_food: false,
        returned,
    }
}

/// Turn to `heading` and step forward if the target cell is on the lattice
fn advance(agent: &mut Agent, heading: Direction, field: &PheromoneField) -> bool {
    agent.heading = heading;
    let target = field.lattice().neighbor(agent.position, heading);
    if field.lattice().is_valid(target) {
        agent.position = target;
        true
    } else {
        false
    }
}

/// Outbound trail at or above this ant's detection threshold next door
fn trail_nearby(agent: &Agent, field: &PheromoneField) -> bool {
    field.neighbor_at_least(
        agent.position,
        Channel::Outbound,
        agent.threshold(Channel::Outbound),
    )
}

/// Apply exhaustion and food discovery on top of the sensed mode
fn settle(
    agent: &mut Agent,
    food: &FoodRegistry,
    from: Mode,
    sensed: Mode,
    moved: bool,
) -> StepOutcome {
    let mut next = sensed;
    if agent.energy < 0 {
        next = Mode::Return;
    }

    let found_food = food.is_food(agent.position);
    if found_food {
        agent.has_food = true;
        next = Mode::Return;
        trace!(q = agent.position.q, r = agent.position.r, "ant found food");
    }

    agent.mode = next;
    StepOutcome {
        from,
        to: next,
        moved,
        found_food,
        returned: false,
    }
}
