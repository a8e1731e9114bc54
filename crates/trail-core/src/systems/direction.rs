//! Direction Selection
//!
//! Picks the next heading from the three forward-facing candidates, either
//! uniformly or weighted by neighbouring pheromone.

use rand::Rng;

use crate::components::{Channel, Direction, HexCell, PheromoneField};

/// Raw interest given to a neighbour outside the lattice or holding a
/// negative concentration
pub const UNCONSTRAINED_INTEREST: f64 = 2_147_483_647.0;

/// Parameters of the weighted heading choice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionPolicy {
    /// Multiplier on neighbour concentration in the raw interest
    pub increment: f64,
    /// Exponent applied to normalized interest
    pub scaling: f64,
}

impl Default for DirectionPolicy {
    fn default() -> Self {
        Self {
            increment: 1.0,
            scaling: 16.0,
        }
    }
}

impl DirectionPolicy {
    pub fn new(increment: f64, scaling: f64) -> Self {
        Self { increment, scaling }
    }

    /// Equal odds over left, straight, right; ignores pheromone
    pub fn uniform_heading<R: Rng + ?Sized>(rng: &mut R, heading: Direction) -> Direction {
        heading.forward_fan()[rng.gen_range(0..3)]
    }

    /// Raw interest `1 + increment * concentration` toward each direction
    pub fn interest(&self, field: &PheromoneField, cell: HexCell, channel: Channel) -> [f64; 6] {
        let mut raw = [0.0; 6];
        for d in Direction::ALL {
            // cells off the lattice read as the negative sentinel
            let value = field.toward(cell, d, channel);
            raw[d.index()] = if value < 0.0 {
                UNCONSTRAINED_INTEREST
            } else {
                1.0 + self.increment * value
            };
        }
        raw
    }

    /// Integer weights `floor(exp(scaling * raw / max(raw)))`
    pub fn weights(&self, raw: [f64; 6]) -> [u64; 6] {
        let max = raw.iter().fold(0.0_f64, |acc, &v| acc.max(v));
        let mut weights = [1u64; 6];
        if max <= 0.0 {
            return weights;
        }
        for (w, &v) in weights.iter_mut().zip(raw.iter()) {
            *w = (self.scaling * (v / max)).exp() as u64;
        }
        weights
    }

    /// Weighted choice among left, straight, right
    ///
    /// Draws one integer in `[0, total)` and walks the fan in fixed order;
    /// right takes whatever falls past left and straight.
    pub fn choose<R: Rng + ?Sized>(
        rng: &mut R,
        heading: Direction,
        weights: &[u64; 6],
    ) -> Direction {
        let [left, straight, right] = heading.forward_fan();
        let w_left = weights[left.index()];
        let w_straight = weights[straight.index()];
        let total = w_left
            .saturating_add(w_straight)
            .saturating_add(weights[right.index()]);

        if total == 0 {
            return heading;
        }

        let roll = rng.gen_range(0..total);
        if roll < w_left {
            left
        } else if roll < w_left + w_straight {
            straight
        } else {
            right
        }
    }

    /// Full weighted pick for an ant at `cell` sensing `channel`
    pub fn weighted_heading<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        field: &PheromoneField,
        cell: HexCell,
        heading: Direction,
        channel: Channel,
    ) -> Direction {
        let weights = self.weights(self.interest(field, cell, channel));
        Self::choose(rng, heading, &weights)
    }
}
