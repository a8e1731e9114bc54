//! Render Frames
//!
//! Read-only snapshot handed to renderers after a tick: ant positions, both
//! pheromone channels normalized to [0, 1], and the progress scalars.

use serde::{Deserialize, Serialize};

use crate::record::{Mode, ModeCounts};

/// Value given to cells outside the lattice in normalized pheromone grids
pub const BELOW_RANGE_MARKER: f64 = -0.1;

/// One active ant as seen by a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMarker {
    pub slot: usize,
    /// Planar position, unit hex spacing, colony origin at (0, 0)
    pub x: f64,
    pub y: f64,
    pub mode: Mode,
    pub heading: u8,
    #[serde(default)]
    pub has_food: bool,
}

/// Snapshot of the simulation for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub tick: u64,
    pub tick_budget: u64,
    /// Completed ticks / tick budget
    pub progress: f64,
    pub radius: u32,
    /// Row length of the square pheromone grids (2 * radius + 1)
    pub grid_side: usize,
    pub agents: Vec<AgentMarker>,
    /// Channel 0, row-major over the grid, invalid cells at BELOW_RANGE_MARKER
    pub outbound: Vec<f64>,
    /// Channel 1, same layout as `outbound`
    pub homeward: Vec<f64>,
    pub modes: ModeCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homing_probability: Option<f64>,
    /// Planar positions of registered food cells
    #[serde(default)]
    pub food: Vec<(f64, f64)>,
}

impl RenderFrame {
    /// Normalized value of a grid cell, `None` if the index is out of range
    pub fn outbound_at(&self, row: usize, col: usize) -> Option<f64> {
        Self::grid_value(&self.outbound, self.grid_side, row, col)
    }

    pub fn homeward_at(&self, row: usize, col: usize) -> Option<f64> {
        Self::grid_value(&self.homeward, self.grid_side, row, col)
    }

    fn grid_value(grid: &[f64], side: usize, row: usize, col: usize) -> Option<f64> {
        if row >= side || col >= side {
            return None;
        }
        grid.get(row * side + col).copied()
    }
}
