//! Per-Tick Records
//!
//! The statistics series recorded once per tick by the simulation clock.

use serde::{Deserialize, Serialize};

/// Movement mode of an ant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Random forward wander
    #[default]
    Explore,
    /// Trail-biased movement toward food
    Follow,
    /// Trail-biased movement back to the colony origin
    Return,
}

/// Number of active ants in each mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModeCounts {
    pub explore: u32,
    pub follow: u32,
    #[serde(rename = "return")]
    pub returning: u32,
}

impl ModeCounts {
    pub fn add(&mut self, mode: Mode) {
        match mode {
            Mode::Explore => self.explore += 1,
            Mode::Follow => self.follow += 1,
            Mode::Return => self.returning += 1,
        }
    }

    pub fn get(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Explore => self.explore,
            Mode::Follow => self.follow,
            Mode::Return => self.returning,
        }
    }

    pub fn total(&self) -> u32 {
        self.explore + self.follow + self.returning
    }

    /// Element-wise maximum, used for peak tracking
    pub fn max(self, other: ModeCounts) -> ModeCounts {
        ModeCounts {
            explore: self.explore.max(other.explore),
            follow: self.follow.max(other.follow),
            returning: self.returning.max(other.returning),
        }
    }
}

/// Statistics recorded at the end of one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickRecord {
    pub tick: u64,
    /// Cumulative returned / cumulative spawned; absent while nothing has spawned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homing_probability: Option<f64>,
    /// Cumulative returned count
    pub homing_count: u64,
    /// Cumulative spawned count
    pub spawned: u64,
    pub modes: ModeCounts,
}
