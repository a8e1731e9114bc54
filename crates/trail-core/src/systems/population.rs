//! Population
//!
//! Fixed arena of ant slots with a staggered release from the nest and
//! in-place recycling once a lifetime ends.

use rand::Rng;
use tracing::{debug, trace};

use trail_events::{Mode, ModeCounts};

use crate::components::{Agent, ThresholdProfiles};

/// Default ticks between releases: `ceil(capacity / energy_budget)`, at least 1
pub fn default_release_lug(capacity: usize, energy_budget: u32) -> u64 {
    let energy = u64::from(energy_budget.max(1));
    (capacity as u64).div_ceil(energy).max(1)
}

/// Every ant slot plus lifetime counters
#[derive(Debug, Clone)]
pub struct Population {
    slots: Vec<Agent>,
    /// Slots `0..active` take part in ticks
    active: usize,
    spawned: u64,
    returned: u64,
    energy_budget: i64,
    profiles: ThresholdProfiles,
    release_lug: u64,
}

impl Population {
    /// Spawn every slot at the origin; each counts as spawned
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        capacity: usize,
        energy_budget: u32,
        profiles: ThresholdProfiles,
        release_lug: u64,
    ) -> Self {
        let energy_budget = i64::from(energy_budget);
        let slots: Vec<Agent> = (0..capacity)
            .map(|_| Agent::spawn(rng, energy_budget, &profiles))
            .collect();

        Self {
            spawned: slots.len() as u64,
            slots,
            active: 0,
            returned: 0,
            energy_budget,
            profiles,
            release_lug: release_lug.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn is_fully_released(&self) -> bool {
        self.active >= self.slots.len()
    }

    pub fn release_lug(&self) -> u64 {
        self.release_lug
    }

    /// Release one more slot if `tick` falls on the lug; returns whether one was released
    pub fn release(&mut self, tick: u64) -> bool {
        if self.is_fully_released() || tick % self.release_lug != 0 {
            return false;
        }
        self.active += 1;
        if self.is_fully_released() {
            debug!(tick, active = self.active, "all ants released");
        }
        true
    }

    /// Make every slot active at once
    pub fn release_all(&mut self) {
        self.active = self.slots.len();
    }

    /// Reinitialize a slot in place, crediting a completed return
    pub fn recycle<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };
        if slot.has_returned {
            self.returned += 1;
        }
        trace!(
            slot = index,
            returned = slot.has_returned,
            had_food = slot.has_food,
            "recycling ant"
        );
        *slot = Agent::spawn(rng, self.energy_budget, &self.profiles);
        self.spawned += 1;
    }

    pub fn slot(&self, index: usize) -> Option<&Agent> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut Agent> {
        self.slots.get_mut(index)
    }

    pub fn slots(&self) -> &[Agent] {
        &self.slots
    }

    /// Slots currently taking part in ticks
    pub fn active_slots(&self) -> &[Agent] {
        &self.slots[..self.active]
    }

    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn returned(&self) -> u64 {
        self.returned
    }

    /// Returned / spawned, `None` before anything has spawned
    pub fn homing_probability(&self) -> Option<f64> {
        if self.spawned == 0 {
            return None;
        }
        Some(self.returned as f64 / self.spawned as f64)
    }

    pub fn mode_counts(&self) -> ModeCounts {
        let mut counts = ModeCounts::default();
        for agent in self.active_slots() {
            counts.add(agent.mode);
        }
        counts
    }

    pub fn count_in(&self, mode: Mode) -> u32 {
        self.mode_counts().get(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn population(capacity: usize, lug: u64) -> (Population, SmallRng) {
        let mut rng = SmallRng::seed_from_u64(99);
        let pop = Population::new(&mut rng, capacity, 20, ThresholdProfiles::default(), lug);
        (pop, rng)
    }

    #[test]
    fn test_default_release_lug() {
        assert_eq!(default_release_lug(50, 200), 1);
        assert_eq!(default_release_lug(1000, 150), 7);
        assert_eq!(default_release_lug(300, 150), 2);
        assert_eq!(default_release_lug(0, 150), 1);
    }

    #[test]
    fn test_initial_state() {
        let (pop, _) = population(5, 1);
        assert_eq!(pop.capacity(), 5);
        assert_eq!(pop.active_count(), 0);
        assert_eq!(pop.spawned(), 5);
        assert_eq!(pop.returned(), 0);
        assert_eq!(pop.homing_probability(), Some(0.0));
        assert!(pop.active_slots().is_empty());
    }

    #[test]
    fn test_staggered_release() {
        let (mut pop, _) = population(3, 4);
        let mut released_at = Vec::new();
        for tick in 0..20 {
            if pop.release(tick) {
                released_at.push(tick);
            }
        }
        assert_eq!(released_at, vec![0, 4, 8]);
        assert!(pop.is_fully_released());
        assert_eq!(pop.active_count(), 3);
    }

    #[test]
    fn test_recycle_counts() {
        let (mut pop, mut rng) = population(2, 1);
        pop.release_all();

        // exhausted without returning
        pop.slot_mut(0).unwrap().energy = -1;
        pop.recycle(0, &mut rng);
        assert_eq!(pop.spawned(), 3);
        assert_eq!(pop.returned(), 0);
        assert_eq!(pop.slot(0).unwrap().energy, 20);

        // completed a return trip
        {
            let ant = pop.slot_mut(1).unwrap();
            ant.mode = Mode::Return;
            ant.has_returned = true;
            ant.energy = 0;
        }
        pop.recycle(1, &mut rng);
        assert_eq!(pop.spawned(), 4);
        assert_eq!(pop.returned(), 1);
        let fresh = pop.slot(1).unwrap();
        assert_eq!(fresh.mode, Mode::Explore);
        assert!(!fresh.has_returned);
        assert_eq!(pop.homing_probability(), Some(0.25));
    }

    #[test]
    fn test_empty_population_has_no_probability() {
        let (pop, _) = population(0, 1);
        assert_eq!(pop.homing_probability(), None);
    }

    #[test]
    fn test_mode_counts_only_active() {
        let (mut pop, _) = population(4, 1);
        pop.release(0);
        pop.release(1);
        pop.slot_mut(1).unwrap().mode = Mode::Follow;
        pop.slot_mut(3).unwrap().mode = Mode::Return;

        let counts = pop.mode_counts();
        assert_eq!(counts.explore, 1);
        assert_eq!(counts.follow, 1);
        assert_eq!(counts.returning, 0);
        assert_eq!(pop.count_in(Mode::Follow), 1);
    }
}
