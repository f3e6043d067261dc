//! Domain layer: pure, synchronous graph rules.

pub mod error;
pub mod graph;
pub mod labeled;
pub mod partition;
pub mod traits;
