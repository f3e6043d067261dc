use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SccError {
    #[error("dangling edge {from} -> {to}: {to} is not a vertex of the graph")]
    DanglingEdge { from: String, to: String },

    #[error("duplicate vertex: {0}")]
    DuplicateVertex(String),

    #[error("vertex {vertex} out of range for a graph with {node_count} vertices")]
    VertexOutOfRange { vertex: usize, node_count: usize },

    #[error("traversal depth exceeded: limit {limit} reached while descending into vertex {vertex}")]
    DepthExceeded { limit: usize, vertex: usize },

    #[error("cannot reserve a {stack_size}-byte stack for recursive traversal: {reason}")]
    StackUnavailable { stack_size: usize, reason: String },

    #[error("invalid traversal order ({reason}); expected a permutation of {expected} vertices")]
    InvalidOrder { expected: usize, reason: String },
}
