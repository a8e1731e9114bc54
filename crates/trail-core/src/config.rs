//! Configuration System
//!
//! Loads run parameters from tuning.toml for easy adjustment without recompiling.
//! Every field has a default, so a file only needs the values it changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::components::{FieldParams, ThresholdProfiles, Thresholds};
use crate::systems::{default_release_lug, DirectionPolicy, ReleaseAmounts};

/// Default tuning file path
pub const DEFAULT_TUNING_PATH: &str = "tuning.toml";

/// Largest diffusion coefficient that keeps concentrations non-negative
pub const MAX_DIFFUSION: f64 = 1.0 / 6.0;

/// Largest scaling constant whose weights still sum inside a u64
pub const MAX_SCALING: f64 = 40.0;

/// Top-level configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub simulation: SimulationConfig,
    pub lattice: LatticeConfig,
    pub colony: ColonyConfig,
    pub food: FoodConfig,
    pub pheromone: PheromoneConfig,
    pub policy: PolicyConfig,
}

/// Run length and seeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Explicit seed; derived from the clock when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub tick_budget: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_budget: 20_000,
        }
    }
}

/// Lattice size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub radius: u32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self { radius: 30 }
    }
}

/// Ant population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    pub population: usize,
    /// Steps per lifetime
    pub energy_budget: u32,
    /// Ticks between releases; `ceil(population / energy_budget)` when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_lug: Option<u64>,
    pub sensitive: ThresholdPair,
    pub insensitive: ThresholdPair,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            population: 50,
            energy_budget: 200,
            release_lug: None,
            sensitive: ThresholdPair {
                outbound: 40.0,
                homeward: 15.0,
            },
            insensitive: ThresholdPair {
                outbound: 80.0,
                homeward: 30.0,
            },
        }
    }
}

/// Detection thresholds for one profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPair {
    pub outbound: f64,
    pub homeward: f64,
}

/// Food placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    /// Number of random food points; ignored when `points` is given
    pub count: usize,
    /// Register the six neighbours of each point as food too
    pub surrounded: bool,
    /// Explicit axial `[q, r]` food points
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<[i32; 2]>,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            count: 3,
            surrounded: false,
            points: Vec::new(),
        }
    }
}

/// Deposit, diffusion and evaporation, per channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PheromoneConfig {
    pub outbound_release: f64,
    pub homeward_release: f64,
    pub outbound_diffusion: f64,
    pub homeward_diffusion: f64,
    pub outbound_evaporation: f64,
    pub homeward_evaporation: f64,
    /// Spread a source's loss only over valid neighbours (off by default)
    pub conserve_boundary_mass: bool,
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self {
            outbound_release: 2.0,
            homeward_release: 1.0,
            outbound_diffusion: 0.000001 / 6.0,
            homeward_diffusion: 0.000001 / 6.0,
            outbound_evaporation: 0.997,
            homeward_evaporation: 0.999,
            conserve_boundary_mass: false,
        }
    }
}

/// Weighted heading choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub increment: f64,
    pub scaling: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            increment: 1.0,
            scaling: 16.0,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from `path`, or use defaults if it cannot be read
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    /// Render as a TOML document
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject parameter combinations the engine does not handle
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.lattice.radius == 0 {
            return invalid("lattice.radius must be positive".into());
        }
        if self.colony.population == 0 {
            return invalid("colony.population must be positive".into());
        }
        if self.colony.energy_budget == 0 {
            return invalid("colony.energy_budget must be positive".into());
        }
        if self.colony.release_lug == Some(0) {
            return invalid("colony.release_lug must be positive".into());
        }
        if self.simulation.tick_budget == 0 {
            return invalid("simulation.tick_budget must be positive".into());
        }

        for (name, pair) in [
            ("sensitive", self.colony.sensitive),
            ("insensitive", self.colony.insensitive),
        ] {
            if !non_negative(pair.outbound) || !non_negative(pair.homeward) {
                return invalid(format!("colony.{name} thresholds must be non-negative"));
            }
        }

        let p = &self.pheromone;
        for (name, value) in [
            ("outbound_release", p.outbound_release),
            ("homeward_release", p.homeward_release),
        ] {
            if !non_negative(value) {
                return invalid(format!("pheromone.{name} must be non-negative"));
            }
        }
        for (name, value) in [
            ("outbound_diffusion", p.outbound_diffusion),
            ("homeward_diffusion", p.homeward_diffusion),
        ] {
            if !(0.0..=MAX_DIFFUSION).contains(&value) {
                return invalid(format!("pheromone.{name} must lie in [0, 1/6], got {value}"));
            }
        }
        for (name, value) in [
            ("outbound_evaporation", p.outbound_evaporation),
            ("homeward_evaporation", p.homeward_evaporation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("pheromone.{name} must lie in [0, 1], got {value}"));
            }
        }

        if !non_negative(self.policy.increment) {
            return invalid("policy.increment must be non-negative".into());
        }
        if !(0.0..=MAX_SCALING).contains(&self.policy.scaling) {
            return invalid(format!("policy.scaling must lie in [0, {MAX_SCALING}]"));
        }

        let radius = self.lattice.radius as i32;
        for &[q, r] in &self.food.points {
            let ring = q.abs().max(r.abs()).max((q + r).abs());
            if ring > radius {
                return invalid(format!("food point [{q}, {r}] lies outside radius {radius}"));
            }
        }

        Ok(())
    }

    /// The configured seed, or the current UNIX time in seconds
    pub fn resolve_seed(&self) -> u64 {
        self.simulation.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default()
        })
    }

    pub fn release_lug(&self) -> u64 {
        self.colony.release_lug.unwrap_or_else(|| {
            default_release_lug(self.colony.population, self.colony.energy_budget)
        })
    }

    pub fn threshold_profiles(&self) -> ThresholdProfiles {
        let convert = |pair: ThresholdPair| Thresholds {
            outbound: pair.outbound,
            homeward: pair.homeward,
        };
        ThresholdProfiles {
            sensitive: convert(self.colony.sensitive),
            insensitive: convert(self.colony.insensitive),
        }
    }

    pub fn field_params(&self) -> FieldParams {
        let p = &self.pheromone;
        FieldParams {
            diffusion: [p.outbound_diffusion, p.homeward_diffusion],
            evaporation: [p.outbound_evaporation, p.homeward_evaporation],
            conserve_boundary_mass: p.conserve_boundary_mass,
        }
    }

    pub fn release_amounts(&self) -> ReleaseAmounts {
        ReleaseAmounts {
            outbound: self.pheromone.outbound_release,
            homeward: self.pheromone.homeward_release,
        }
    }

    pub fn direction_policy(&self) -> DirectionPolicy {
        DirectionPolicy::new(self.policy.increment, self.policy.scaling)
    }
}

fn non_negative(value: f64) -> bool {
    value >= 0.0 && value.is_finite()
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.lattice.radius, 30);
        assert_eq!(config.colony.population, 50);
        assert_eq!(config.colony.energy_budget, 200);
        assert_eq!(config.simulation.tick_budget, 20_000);
        assert_eq!(config.release_lug(), 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_overrides() {
        let config = SimConfig::from_toml(
            r#"
            [simulation]
            seed = 1234

            [colony]
            population = 1000
            energy_budget = 150

            [food]
            surrounded = true
            points = [[3, -2], [-4, 1]]
            "#,
        )
        .unwrap();

        assert_eq!(config.simulation.seed, Some(1234));
        assert_eq!(config.resolve_seed(), 1234);
        assert_eq!(config.colony.population, 1000);
        assert_eq!(config.release_lug(), 7);
        // untouched sections keep their defaults
        assert_eq!(config.lattice.radius, 30);
        assert_eq!(config.pheromone.outbound_evaporation, 0.997);
        assert_eq!(config.colony.sensitive.outbound, 40.0);
        assert_eq!(config.food.points, vec![[3, -2], [-4, 1]]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = SimConfig::default();
        config.simulation.seed = Some(7);
        let text = config.to_toml().unwrap();
        let parsed = SimConfig::from_toml(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_validation_rejects() {
        let mut config = SimConfig::default();
        config.pheromone.outbound_diffusion = 0.2;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = SimConfig::default();
        config.lattice.radius = 0;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.pheromone.homeward_evaporation = 1.5;
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.lattice.radius = 5;
        config.food.points = vec![[5, 1]];
        assert!(config.validate().is_err());

        let mut config = SimConfig::default();
        config.colony.insensitive.homeward = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error() {
        let err = SimConfig::from_toml("[lattice]\nradius = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_file() {
        // This test requires the tuning.toml file to exist
        if Path::new(DEFAULT_TUNING_PATH).exists() {
            let config = SimConfig::load(DEFAULT_TUNING_PATH).unwrap();
            assert!(config.validate().is_ok());
        }
    }
}
