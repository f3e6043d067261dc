use crate::domain::error::SccError;
use crate::domain::graph::Graph;
use crate::domain::traits::DfsVisitor;
use std::panic;
use std::thread;

pub const DEFAULT_MAX_DEPTH: usize = 10_000;

// Stack reserved per nested vertex of the recursive strategy, plus a fixed base.
// A debug-build frame of `traverse_recursive` stays well under this.
const STACK_BYTES_PER_FRAME: usize = 1024;
const STACK_BASE_BYTES: usize = 1 << 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalStrategy {
    /// Explicit `(vertex, next neighbor)` work stack; depth is unbounded.
    #[default]
    Iterative,
    /// Native recursion, refusing to nest deeper than `max_depth` vertices.
    Recursive { max_depth: usize },
}

/// Depth-first traversal from `start`, skipping vertices already in `explored`.
///
/// `start` must be unexplored. Discover fires when a vertex is marked explored,
/// finish once all its out-neighbors are processed; neighbor lists are scanned
/// in order. Both strategies emit the same event sequence.
pub fn traverse<V: DfsVisitor + Send>(
    graph: &Graph,
    start: usize,
    explored: &mut [bool],
    visitor: &mut V,
    strategy: TraversalStrategy,
) -> Result<(), SccError> {
    with_traversal_stack(strategy, || {
        traverse_on_current_stack(graph, start, explored, visitor, strategy)
    })
}

/// Runs `f` where `strategy` can reach its depth limit without overflowing.
///
/// Iterative traversal runs `f` inline. Recursive traversal runs it on a
/// dedicated thread whose stack is sized from `max_depth`, so callers on
/// small runtime threads still see `DepthExceeded` instead of a crash.
pub fn with_traversal_stack<T, F>(strategy: TraversalStrategy, f: F) -> Result<T, SccError>
where
    T: Send,
    F: FnOnce() -> Result<T, SccError> + Send,
{
    let TraversalStrategy::Recursive { max_depth } = strategy else {
        return f();
    };
    let stack_size = max_depth
        .saturating_mul(STACK_BYTES_PER_FRAME)
        .saturating_add(STACK_BASE_BYTES);

    thread::scope(|s| {
        let handle = thread::Builder::new()
            .name("scc-recursive-dfs".to_string())
            .stack_size(stack_size)
            .spawn_scoped(s, f)
            .map_err(|e| SccError::StackUnavailable {
                stack_size,
                reason: e.to_string(),
            })?;

        match handle.join() {
            Ok(res) => res,
            Err(payload) => panic::resume_unwind(payload),
        }
    })
}

/// Same as [`traverse`] without moving to a sized stack; call it inside
/// [`with_traversal_stack`] when driving many roots in one pass.
pub fn traverse_on_current_stack<V: DfsVisitor>(
    graph: &Graph,
    start: usize,
    explored: &mut [bool],
    visitor: &mut V,
    strategy: TraversalStrategy,
) -> Result<(), SccError> {
    match strategy {
        TraversalStrategy::Iterative => {
            traverse_iterative(&graph.edges, start, explored, visitor);
            Ok(())
        }
        TraversalStrategy::Recursive { max_depth } => {
            if max_depth == 0 {
                return Err(SccError::DepthExceeded {
                    limit: 0,
                    vertex: start,
                });
            }
            traverse_recursive(&graph.edges, start, explored, visitor, 1, max_depth)
        }
    }
}

fn traverse_iterative<V: DfsVisitor>(
    edges: &[Vec<usize>],
    start: usize,
    explored: &mut [bool],
    visitor: &mut V,
) {
    let mut stack: Vec<(usize, usize)> = Vec::new();
    explored[start] = true;
    visitor.discover(start);
    stack.push((start, 0));

    while let Some((v, next_i)) = stack.pop() {
        if next_i < edges[v].len() {
            let to = edges[v][next_i];
            stack.push((v, next_i + 1));
            if !explored[to] {
                explored[to] = true;
                visitor.discover(to);
                stack.push((to, 0));
            }
            continue;
        }

        visitor.finish(v);
    }
}

fn traverse_recursive<V: DfsVisitor>(
    edges: &[Vec<usize>],
    v: usize,
    explored: &mut [bool],
    visitor: &mut V,
    depth: usize,
    max_depth: usize,
) -> Result<(), SccError> {
    explored[v] = true;
    visitor.discover(v);

    for &to in edges[v].iter() {
        if explored[to] {
            continue;
        }
        if depth >= max_depth {
            return Err(SccError::DepthExceeded {
                limit: max_depth,
                vertex: to,
            });
        }
        traverse_recursive(edges, to, explored, visitor, depth + 1, max_depth)?;
    }

    visitor.finish(v);
    Ok(())
}

struct Collect(Vec<usize>);

impl DfsVisitor for Collect {
    fn discover(&mut self, v: usize) {
        self.0.push(v);
    }
}

/// Vertices reachable from `start` (itself included), in discovery order.
pub fn reachable_from(graph: &Graph, start: usize) -> Result<Vec<usize>, SccError> {
    let node_count = graph.node_count();
    if start >= node_count {
        return Err(SccError::VertexOutOfRange {
            vertex: start,
            node_count,
        });
    }
    let mut explored = vec![false; node_count];
    let mut seen = Collect(Vec::new());
    traverse_iterative(&graph.edges, start, &mut explored, &mut seen);
    Ok(seen.0)
}
