//! Strongly connected components via Kosaraju's algorithm.
//!
//! Layers:
//! - domain: graph storage, reversal, error type, component aggregation
//! - infrastructure: DFS engine, Kosaraju detector, file adapters, event printer
//! - usecase: compute/validate workflows + progress events
//! - interface: CLI wiring

pub mod domain;
pub mod infrastructure;
pub mod interface;
pub mod usecase;
