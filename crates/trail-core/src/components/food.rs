//! Food Registry
//!
//! Fixed set of food cells, optionally ringed by a one-cell halo.

use super::lattice::{Direction, HexCell};

/// Where food can be discovered; immutable once built
#[derive(Debug, Clone, Default)]
pub struct FoodRegistry {
    /// Placed food centres
    points: Vec<HexCell>,
    /// Every registered cell: each centre followed by its halo when surrounded
    cells: Vec<HexCell>,
    surrounded: bool,
}

impl FoodRegistry {
    pub fn new(points: Vec<HexCell>, surrounded: bool) -> Self {
        let mut cells = Vec::with_capacity(points.len() * if surrounded { 7 } else { 1 });
        for &point in &points {
            cells.push(point);
            if surrounded {
                cells.extend(Direction::ALL.iter().map(|&d| point.step(d)));
            }
        }

        Self {
            points,
            cells,
            surrounded,
        }
    }

    /// A registry with nothing to find
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_food(&self, cell: HexCell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn points(&self) -> &[HexCell] {
        &self.points
    }

    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    pub fn is_surrounded(&self) -> bool {
        self.surrounded
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
