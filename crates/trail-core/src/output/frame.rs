//! Render Frames
//!
//! Builds `RenderFrame` snapshots from a running clock and appends them to a
//! JSONL file for an external renderer.

use rand::Rng;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use trail_events::{AgentMarker, RenderFrame};

use crate::components::Channel;
use crate::systems::SimulationClock;

use super::export::OutputError;

/// Default frame stream file name inside the output directory
pub const FRAMES_FILE_NAME: &str = "frames.jsonl";

/// Snapshot the clock's current state
///
/// Each pheromone grid is divided by that channel's maximum over the whole
/// lattice at this tick, so the strongest cell of a frame reads 1.0.
pub fn capture<R: Rng>(clock: &SimulationClock<R>) -> RenderFrame {
    let lattice = clock.lattice();
    let field = clock.field();
    let population = clock.population();

    let agents = population
        .active_slots()
        .iter()
        .enumerate()
        .map(|(slot, ant)| {
            let (x, y) = lattice.to_planar(ant.position);
            AgentMarker {
                slot,
                x,
                y,
                mode: ant.mode,
                heading: ant.heading.index() as u8,
                has_food: ant.has_food,
            }
        })
        .collect();

    RenderFrame {
        tick: clock.current_tick(),
        tick_budget: clock.tick_budget(),
        progress: clock.progress(),
        radius: lattice.radius(),
        grid_side: lattice.side(),
        agents,
        outbound: field.normalized(Channel::Outbound),
        homeward: field.normalized(Channel::Homeward),
        modes: population.mode_counts(),
        homing_probability: population.homing_probability(),
        food: clock
            .food()
            .cells()
            .iter()
            .map(|&cell| lattice.to_planar(cell))
            .collect(),
    }
}

/// Append-only JSONL writer for render frames
pub struct FrameWriter {
    writer: Option<BufWriter<File>>,
    frame_count: u64,
}

impl FrameWriter {
    /// Create a writer truncating the file at `path`
    pub fn new(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            frame_count: 0,
        })
    }

    /// A writer that discards frames (for testing)
    pub fn null() -> Self {
        Self {
            writer: None,
            frame_count: 0,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Write one frame as a single JSON line
    pub fn write(&mut self, frame: &RenderFrame) -> Result<(), OutputError> {
        self.frame_count += 1;
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(frame)?;
            writeln!(writer, "{}", json)?;
        }
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for FrameWriter {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("Failed to flush frame writer: {}", e);
        }
    }
}
