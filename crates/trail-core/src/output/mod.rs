//! Output Generation
//!
//! Run statistics, the CSV export, and render frames.

pub mod export;
pub mod frame;
pub mod stats;

pub use export::*;
pub use frame::*;
pub use stats::*;
