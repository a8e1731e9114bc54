//! Food Placement
//!
//! Builds the food registry either from explicit points or by drawing random
//! points from the shared RNG.

use rand::Rng;
use tracing::debug;

use crate::components::{FoodRegistry, HexCell, Lattice};
use crate::config::FoodConfig;

/// Build the food registry for a run
///
/// Explicit points win over random placement. Random placement draws from
/// `rng` before anything else in the run does.
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    lattice: &Lattice,
    config: &FoodConfig,
) -> FoodRegistry {
    let points: Vec<HexCell> = if config.points.is_empty() {
        (0..config.count)
            .map(|_| random_food_point(rng, lattice))
            .collect()
    } else {
        config.points.iter().map(|&[q, r]| HexCell::new(q, r)).collect()
    };

    for (i, point) in points.iter().enumerate() {
        debug!(index = i, q = point.q, r = point.r, "placed food");
    }

    FoodRegistry::new(points, config.surrounded)
}

/// One random valid cell; `lattice` must have a positive radius
///
/// The first draw is biased toward one side of the lattice; any invalid
/// candidate is redrawn uniformly over the whole backing square.
pub fn random_food_point<R: Rng + ?Sized>(rng: &mut R, lattice: &Lattice) -> HexCell {
    let radius = lattice.radius() as i32;
    let half = radius / 2;

    let r = rng.gen_range((half - radius)..half);
    let q = rng.gen_range((half - radius)..half);
    let mut cell = HexCell::new(q, r);

    while !lattice.is_valid(cell) {
        let r = rng.gen_range(-radius..=radius);
        let q = rng.gen_range(-radius..=radius);
        cell = HexCell::new(q, r);
    }
    cell
}
