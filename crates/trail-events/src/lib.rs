//! Shared record and snapshot types for the hex trail simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Renderers, exporters and analysis tools depend on it without pulling in
//! the engine.

pub mod frame;
pub mod record;
pub mod run;

// Re-export record types
pub use record::{Mode, ModeCounts, TickRecord};

// Re-export frame types
pub use frame::{AgentMarker, RenderFrame, BELOW_RANGE_MARKER};

// Re-export run types
pub use run::{AverageModes, RunParameters, RunRecord, RunSummary};
