//! Statistics Output
//!
//! Collects the per-tick homing series and condenses it into a run summary.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use trail_events::{AverageModes, ModeCounts, RunSummary, TickRecord};

use super::export::OutputError;

/// Accumulates one `TickRecord` per tick
#[derive(Debug, Clone, Default)]
pub struct StatsCollector {
    history: Vec<TickRecord>,
    first_return_tick: Option<u64>,
    peak_modes: ModeCounts,
    mode_sums: [u64; 3],
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the statistics of a finished tick
    pub fn record_tick(&mut self, record: TickRecord) {
        if self.first_return_tick.is_none() && record.homing_count > 0 {
            self.first_return_tick = Some(record.tick);
        }
        self.peak_modes = self.peak_modes.max(record.modes);
        self.mode_sums[0] += u64::from(record.modes.explore);
        self.mode_sums[1] += u64::from(record.modes.follow);
        self.mode_sums[2] += u64::from(record.modes.returning);
        self.history.push(record);
    }

    /// Every record so far, in tick order
    pub fn history(&self) -> &[TickRecord] {
        &self.history
    }

    pub fn latest(&self) -> Option<&TickRecord> {
        self.history.last()
    }

    pub fn ticks_recorded(&self) -> u64 {
        self.history.len() as u64
    }

    pub fn first_return_tick(&self) -> Option<u64> {
        self.first_return_tick
    }

    /// Condense the series for the run with `seed`
    pub fn summary(&self, seed: u64) -> RunSummary {
        let ticks = self.ticks_recorded();
        let average = |sum: u64| {
            if ticks > 0 {
                sum as f64 / ticks as f64
            } else {
                0.0
            }
        };

        let latest = self.latest();
        RunSummary {
            seed,
            ticks,
            total_spawned: latest.map_or(0, |r| r.spawned),
            total_returned: latest.map_or(0, |r| r.homing_count),
            final_homing_probability: latest.and_then(|r| r.homing_probability),
            first_return_tick: self.first_return_tick,
            peak_modes: self.peak_modes,
            average_modes: AverageModes {
                explore: average(self.mode_sums[0]),
                follow: average(self.mode_sums[1]),
                returning: average(self.mode_sums[2]),
            },
        }
    }
}

/// `<output_dir>/<seed>_stats.json`
pub fn stats_path(output_dir: impl AsRef<Path>, seed: u64) -> PathBuf {
    output_dir.as_ref().join(format!("{seed}_stats.json"))
}

/// Write any serializable statistics as pretty JSON, creating parent directories
pub fn write_stats<T: Serialize>(stats: &T, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }

    let json = serde_json::to_string_pretty(stats)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tick: u64, returned: u64, spawned: u64, modes: (u32, u32, u32)) -> TickRecord {
        TickRecord {
            tick,
            homing_probability: Some(returned as f64 / spawned as f64),
            homing_count: returned,
            spawned,
            modes: ModeCounts {
                explore: modes.0,
                follow: modes.1,
                returning: modes.2,
            },
        }
    }

    #[test]
    fn test_stats_collector_new() {
        let collector = StatsCollector::new();
        assert!(collector.history().is_empty());
        let summary = collector.summary(3);
        assert_eq!(summary.ticks, 0);
        assert_eq!(summary.final_homing_probability, None);
        assert_eq!(summary.average_modes, AverageModes::default());
    }

    #[test]
    fn test_summary_tracks_peaks_and_first_return() {
        let mut collector = StatsCollector::new();
        collector.record_tick(record(0, 0, 10, (1, 0, 0)));
        collector.record_tick(record(1, 0, 10, (1, 1, 0)));
        collector.record_tick(record(2, 1, 12, (0, 1, 3)));
        collector.record_tick(record(3, 3, 16, (2, 0, 0)));

        let summary = collector.summary(42);
        assert_eq!(summary.seed, 42);
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.total_spawned, 16);
        assert_eq!(summary.total_returned, 3);
        assert_eq!(summary.final_homing_probability, Some(3.0 / 16.0));
        assert_eq!(summary.first_return_tick, Some(2));
        assert_eq!(summary.peak_modes.explore, 2);
        assert_eq!(summary.peak_modes.follow, 1);
        assert_eq!(summary.peak_modes.returning, 3);
        assert_eq!(summary.average_modes.explore, 1.0);
        assert_eq!(summary.average_modes.returning, 0.75);
    }

    #[test]
    fn test_write_stats() {
        let dir = tempfile::tempdir().unwrap();
        let path = stats_path(dir.path().join("nested"), 9);
        let mut collector = StatsCollector::new();
        collector.record_tick(record(0, 0, 4, (1, 0, 0)));

        write_stats(&collector.summary(9), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let parsed: RunSummary = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.seed, 9);
        assert_eq!(parsed.total_spawned, 4);
        assert!(path.ends_with("9_stats.json"));
    }
}
