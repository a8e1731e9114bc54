//! Run Records
//!
//! End-of-run data handed to exporters: the parameter echo, the per-tick
//! homing series, and the food layout.

use serde::{Deserialize, Serialize};

use crate::record::{ModeCounts, TickRecord};

/// Every parameter that shaped a run, flattened for tabular export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    pub seed: u64,
    pub radius: u32,
    pub population: usize,
    pub energy_budget: u32,
    pub release_lug: u64,
    pub tick_budget: u64,
    pub food_count: usize,
    pub food_surrounded: bool,
    pub outbound_threshold_sensitive: f64,
    pub outbound_threshold_insensitive: f64,
    pub homeward_threshold_sensitive: f64,
    pub homeward_threshold_insensitive: f64,
    pub outbound_release: f64,
    pub homeward_release: f64,
    pub increment: f64,
    pub scaling: f64,
    pub outbound_diffusion: f64,
    pub outbound_evaporation: f64,
    pub homeward_diffusion: f64,
    pub homeward_evaporation: f64,
    #[serde(default)]
    pub conserve_boundary_mass: bool,
}

impl RunParameters {
    /// Column names in export order
    pub const COLUMNS: [&'static str; 21] = [
        "seed",
        "radius",
        "population",
        "energy_budget",
        "release_lug",
        "tick_budget",
        "food_count",
        "food_surrounded",
        "outbound_threshold_sensitive",
        "outbound_threshold_insensitive",
        "homeward_threshold_sensitive",
        "homeward_threshold_insensitive",
        "outbound_release",
        "homeward_release",
        "increment",
        "scaling",
        "outbound_diffusion",
        "outbound_evaporation",
        "homeward_diffusion",
        "homeward_evaporation",
        "conserve_boundary_mass",
    ];

    /// Values in the same order as `COLUMNS`
    pub fn values(&self) -> Vec<String> {
        vec![
            self.seed.to_string(),
            self.radius.to_string(),
            self.population.to_string(),
            self.energy_budget.to_string(),
            self.release_lug.to_string(),
            self.tick_budget.to_string(),
            self.food_count.to_string(),
            u8::from(self.food_surrounded).to_string(),
            format!("{:.6}", self.outbound_threshold_sensitive),
            format!("{:.6}", self.outbound_threshold_insensitive),
            format!("{:.6}", self.homeward_threshold_sensitive),
            format!("{:.6}", self.homeward_threshold_insensitive),
            format!("{:.6}", self.outbound_release),
            format!("{:.6}", self.homeward_release),
            format!("{:.6}", self.increment),
            format!("{:.6}", self.scaling),
            format!("{:e}", self.outbound_diffusion),
            format!("{:.6}", self.outbound_evaporation),
            format!("{:e}", self.homeward_diffusion),
            format!("{:.6}", self.homeward_evaporation),
            u8::from(self.conserve_boundary_mass).to_string(),
        ]
    }
}

/// Everything an exporter needs at the end of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    pub parameters: RunParameters,
    pub series: Vec<TickRecord>,
    /// Registered food cells as axial (q, r), halo cells included
    pub food_cells: Vec<(i32, i32)>,
}

/// Condensed outcome of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub total_spawned: u64,
    pub total_returned: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_homing_probability: Option<f64>,
    /// First tick at which any ant had completed a return trip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_return_tick: Option<u64>,
    pub peak_modes: ModeCounts,
    pub average_modes: AverageModes,
}

/// Mean number of active ants per mode over the run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AverageModes {
    pub explore: f64,
    pub follow: f64,
    #[serde(rename = "return")]
    pub returning: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parameters() -> RunParameters {
        RunParameters {
            seed: 42,
            radius: 30,
            population: 50,
            energy_budget: 200,
            release_lug: 1,
            tick_budget: 20_000,
            food_count: 3,
            food_surrounded: false,
            outbound_threshold_sensitive: 40.0,
            outbound_threshold_insensitive: 80.0,
            homeward_threshold_sensitive: 15.0,
            homeward_threshold_insensitive: 30.0,
            outbound_release: 2.0,
            homeward_release: 1.0,
            increment: 1.0,
            scaling: 16.0,
            outbound_diffusion: 0.000001 / 6.0,
            outbound_evaporation: 0.997,
            homeward_diffusion: 0.000001 / 6.0,
            homeward_evaporation: 0.999,
            conserve_boundary_mass: false,
        }
    }

    #[test]
    fn test_values_match_columns() {
        let params = parameters();
        let values = params.values();
        assert_eq!(values.len(), RunParameters::COLUMNS.len());
        assert_eq!(values[0], "42");
        assert_eq!(values[7], "0");
        assert_eq!(values[12], "2.000000");
    }
}
