//! Pheromone Field
//!
//! Two parallel concentration grids over the lattice with deposit, diffusion
//! and evaporation.

use serde::{Deserialize, Serialize};

use trail_events::BELOW_RANGE_MARKER;

use super::lattice::{Direction, HexCell, Lattice};

/// Concentration stored in cells outside the lattice
pub const SENTINEL: f64 = -1000.0;

/// One of the two independent trail fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Channel 0: laid by exploring and following ants
    Outbound,
    /// Channel 1: laid by returning ants
    Homeward,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Outbound, Channel::Homeward];

    pub fn index(self) -> usize {
        match self {
            Channel::Outbound => 0,
            Channel::Homeward => 1,
        }
    }
}

/// Per-channel diffusion and evaporation coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    pub diffusion: [f64; 2],
    pub evaporation: [f64; 2],
    /// Scale a source's loss by its number of valid neighbours instead of 6
    pub conserve_boundary_mass: bool,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            diffusion: [0.0; 2],
            evaporation: [1.0; 2],
            conserve_boundary_mass: false,
        }
    }
}

/// Both pheromone channels over one lattice
#[derive(Debug, Clone)]
pub struct PheromoneField {
    lattice: Lattice,
    params: FieldParams,
    /// Live concentrations per channel, laid out like `Lattice::grid_index`
    data: [Vec<f64>; 2],
    /// Diffusion scratch buffer, cleared at the start of every pass
    staging: [Vec<f64>; 2],
    /// Grid indices of valid neighbours per grid slot, fixed at construction
    links: Vec<Vec<usize>>,
}

impl PheromoneField {
    pub fn new(lattice: Lattice, params: FieldParams) -> Self {
        let len = lattice.grid_len();
        let mut grid = vec![SENTINEL; len];
        let mut links = vec![Vec::new(); len];

        for cell in lattice.cells() {
            let Some(i) = lattice.grid_index(cell) else {
                continue;
            };
            grid[i] = 0.0;
            links[i] = lattice
                .neighbors(cell)
                .filter_map(|(_, n)| lattice.grid_index(n))
                .collect();
        }

        Self {
            lattice,
            params,
            data: [grid.clone(), grid],
            staging: [vec![0.0; len], vec![0.0; len]],
            links,
        }
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    fn valid_index(&self, cell: HexCell) -> Option<usize> {
        if !self.lattice.is_valid(cell) {
            return None;
        }
        self.lattice.grid_index(cell)
    }

    /// Concentration at a cell, or `SENTINEL` outside the lattice
    pub fn get(&self, cell: HexCell, channel: Channel) -> f64 {
        self.lattice
            .grid_index(cell)
            .map(|i| self.data[channel.index()][i])
            .unwrap_or(SENTINEL)
    }

    /// Add `amount` to a valid cell; no-op outside the lattice
    pub fn deposit(&mut self, cell: HexCell, channel: Channel, amount: f64) {
        if let Some(i) = self.valid_index(cell) {
            self.data[channel.index()][i] += amount;
        }
    }

    /// Overwrite a valid cell's concentration (scenario setup)
    pub fn set(&mut self, cell: HexCell, channel: Channel, value: f64) {
        if let Some(i) = self.valid_index(cell) {
            self.data[channel.index()][i] = value;
        }
    }

    /// Concentration in the neighbour of `cell` toward `direction`
    pub fn toward(&self, cell: HexCell, direction: Direction, channel: Channel) -> f64 {
        self.get(self.lattice.neighbor(cell, direction), channel)
    }

    /// Whether any valid neighbour of `cell` holds at least `threshold`
    pub fn neighbor_at_least(&self, cell: HexCell, channel: Channel, threshold: f64) -> bool {
        self.lattice
            .neighbors(cell)
            .any(|(_, n)| self.get(n, channel) >= threshold)
    }

    /// One diffusion pass followed by one evaporation pass
    pub fn step(&mut self) {
        self.diffuse();
        self.evaporate();
    }

    /// Spread from every cell with positive outbound concentration
    ///
    /// Each valid neighbour receives the full `value * diffusion` per channel.
    /// The source loses six times that amount regardless of how many
    /// neighbours are valid, so edge cells leak mass out of the lattice.
    pub fn diffuse(&mut self) {
        for staged in self.staging.iter_mut() {
            staged.fill(0.0);
        }

        let coef = self.params.diffusion;
        for (i, targets) in self.links.iter().enumerate() {
            if self.data[0][i] <= 0.0 {
                continue;
            }
            for ch in 0..2 {
                let outflow = self.data[ch][i] * coef[ch];
                for &t in targets {
                    self.staging[ch][t] += outflow;
                }
            }
        }

        for (i, targets) in self.links.iter().enumerate() {
            let is_source = self.data[0][i] > 0.0;
            let loss_factor = if self.params.conserve_boundary_mass {
                targets.len() as f64
            } else {
                6.0
            };
            for ch in 0..2 {
                if is_source {
                    let outflow = self.data[ch][i] * coef[ch];
                    // clamp rounding residue at coefficient 1/6
                    self.data[ch][i] = (self.data[ch][i] - loss_factor * outflow).max(0.0);
                }
                self.data[ch][i] += self.staging[ch][i];
            }
        }
    }

    /// Multiply every gated cell by its channel's evaporation coefficient
    pub fn evaporate(&mut self) {
        let coef = self.params.evaporation;
        for i in 0..self.data[0].len() {
            if self.data[0][i] > 0.0 {
                self.data[0][i] *= coef[0];
                self.data[1][i] *= coef[1];
            }
        }
    }

    /// Largest concentration of a channel, never below zero
    pub fn max(&self, channel: Channel) -> f64 {
        self.data[channel.index()]
            .iter()
            .fold(0.0_f64, |acc, &v| acc.max(v))
    }

    /// Sum over valid cells
    pub fn total(&self, channel: Channel) -> f64 {
        self.lattice
            .cells()
            .map(|c| self.get(c, channel))
            .sum()
    }

    /// Channel divided by its maximum, invalid cells at `BELOW_RANGE_MARKER`
    pub fn normalized(&self, channel: Channel) -> Vec<f64> {
        let max = self.max(channel);
        self.data[channel.index()]
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                if !self.lattice.is_valid(self.lattice.cell_at(i)) {
                    BELOW_RANGE_MARKER
                } else if max > 0.0 {
                    v / max
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Raw grid of one channel, sentinels included
    pub fn grid(&self, channel: Channel) -> &[f64] {
        &self.data[channel.index()]
    }
}
