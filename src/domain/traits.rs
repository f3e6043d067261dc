use crate::domain::error::SccError;
use crate::domain::graph::{Graph, SccResult};

pub trait SccDetector {
    fn compute_scc(&self, graph: &Graph) -> Result<SccResult, SccError>;
}

/// Action points of a depth-first traversal.
pub trait DfsVisitor {
    /// Pre-order: `v` was just marked explored.
    fn discover(&mut self, _v: usize) {}

    /// Post-order: every out-neighbor of `v` has been processed.
    fn finish(&mut self, _v: usize) {}
}
