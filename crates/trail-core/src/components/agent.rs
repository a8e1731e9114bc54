//! Agent Components
//!
//! State carried by one ant slot for the length of one lifetime.

use rand::Rng;
use serde::{Deserialize, Serialize};

use trail_events::Mode;

use super::lattice::{Direction, HexCell};
use super::pheromone::Channel;

/// Detection thresholds for both channels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub outbound: f64,
    pub homeward: f64,
}

impl Thresholds {
    pub fn for_channel(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Outbound => self.outbound,
            Channel::Homeward => self.homeward,
        }
    }
}

/// Which of the two fixed threshold pairs an ant was born with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sensitivity {
    Sensitive,
    Insensitive,
}

/// The two threshold pairs handed out at spawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdProfiles {
    pub sensitive: Thresholds,
    pub insensitive: Thresholds,
}

impl ThresholdProfiles {
    pub fn get(&self, sensitivity: Sensitivity) -> Thresholds {
        match sensitivity {
            Sensitivity::Sensitive => self.sensitive,
            Sensitivity::Insensitive => self.insensitive,
        }
    }
}

impl Default for ThresholdProfiles {
    fn default() -> Self {
        Self {
            sensitive: Thresholds {
                outbound: 40.0,
                homeward: 15.0,
            },
            insensitive: Thresholds {
                outbound: 80.0,
                homeward: 30.0,
            },
        }
    }
}

/// One ant
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    pub position: HexCell,
    pub heading: Direction,
    pub mode: Mode,
    /// Countdown budget; negative means exhausted
    pub energy: i64,
    pub sensitivity: Sensitivity,
    pub thresholds: Thresholds,
    pub has_food: bool,
    pub has_returned: bool,
}

impl Agent {
    /// A fresh ant at the origin
    ///
    /// Draws the heading, then the threshold profile, from `rng`.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, energy: i64, profiles: &ThresholdProfiles) -> Self {
        let heading = Direction::from_index(rng.gen_range(0..6));
        let sensitivity = if rng.gen_range(0..2) == 0 {
            Sensitivity::Sensitive
        } else {
            Sensitivity::Insensitive
        };

        Self {
            position: HexCell::ORIGIN,
            heading,
            mode: Mode::Explore,
            energy,
            sensitivity,
            thresholds: profiles.get(sensitivity),
            has_food: false,
            has_returned: false,
        }
    }

    /// Lifetime is over: returned home, or exhausted without returning
    pub fn is_spent(&self) -> bool {
        self.has_returned || self.energy < 0
    }

    pub fn threshold(&self, channel: Channel) -> f64 {
        self.thresholds.for_channel(channel)
    }
}
