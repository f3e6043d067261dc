//! Binary entrypoint.
//!
//! The crate is split into layers:
//! - domain: graph storage, reversal, component aggregation
//! - infrastructure: DFS engine, Kosaraju detector, serde + async IO, event printer
//! - usecase: compute/validate workflows + progress events
//! - interface: CLI wiring

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    kosaraju_scc::interface::cli::run().await
}
