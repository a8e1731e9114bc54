//! World Setup
//!
//! Food placement and the other pieces built once before the first tick.

pub mod food;

pub use food::*;
