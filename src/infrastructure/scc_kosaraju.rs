use crate::domain::error::SccError;
use crate::domain::graph::{Graph, SccResult};
use crate::domain::partition::{cyclic_components, group_by_leader};
use crate::domain::traits::{DfsVisitor, SccDetector};
use crate::infrastructure::dfs::{
    traverse_on_current_stack, with_traversal_stack, TraversalStrategy,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct KosarajuSccDetector {
    pub strategy: TraversalStrategy,
}

/// Raw output of both passes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KosarajuPasses {
    pub finish_time: Vec<usize>,
    pub magic_order: Vec<usize>,
    pub leader: Vec<usize>,
}

impl SccDetector for KosarajuSccDetector {
    fn compute_scc(&self, graph: &Graph) -> Result<SccResult, SccError> {
        let passes = self.passes(graph)?;
        Ok(aggregate(graph, passes))
    }
}

impl KosarajuSccDetector {
    pub fn new(strategy: TraversalStrategy) -> Self {
        Self { strategy }
    }

    /// Both passes, Phase 1 enumerating vertices in index order.
    pub fn passes(&self, graph: &Graph) -> Result<KosarajuPasses, SccError> {
        let order: Vec<usize> = graph.vertices().collect();
        self.run_passes(graph, &order)
    }

    /// Both passes with a caller-chosen Phase 1 order (a permutation of all vertices).
    pub fn passes_with_order(
        &self,
        graph: &Graph,
        order: &[usize],
    ) -> Result<KosarajuPasses, SccError> {
        check_permutation(graph.node_count(), order)?;
        self.run_passes(graph, order)
    }

    pub fn compute_scc_with_order(
        &self,
        graph: &Graph,
        order: &[usize],
    ) -> Result<SccResult, SccError> {
        let passes = self.passes_with_order(graph, order)?;
        Ok(aggregate(graph, passes))
    }

    fn run_passes(&self, graph: &Graph, order: &[usize]) -> Result<KosarajuPasses, SccError> {
        with_traversal_stack(self.strategy, || self.run_passes_inline(graph, order))
    }

    fn run_passes_inline(
        &self,
        graph: &Graph,
        order: &[usize],
    ) -> Result<KosarajuPasses, SccError> {
        let n = graph.node_count();

        let mut forward = PassContext::new(n, true);
        forward.run(graph, order, self.strategy)?;
        let finish_time = forward.finish_time;

        let magic_order = decreasing_finish_order(&finish_time);

        let reversed = graph.reversed();
        let mut backward = PassContext::new(n, false);
        backward.run(&reversed, &magic_order, self.strategy)?;

        Ok(KosarajuPasses {
            finish_time,
            magic_order,
            leader: backward.leader,
        })
    }
}

/// Per-pass traversal state, owned by the orchestrator for one pass.
struct PassContext {
    explored: Vec<bool>,
    leader: Vec<usize>,
    finish_time: Vec<usize>,
    counter: usize,
    root: usize,
    record_finish: bool,
}

impl PassContext {
    fn new(n: usize, record_finish: bool) -> Self {
        Self {
            explored: vec![false; n],
            leader: vec![usize::MAX; n],
            finish_time: vec![0; n],
            counter: 0,
            root: 0,
            record_finish,
        }
    }

    fn run(
        &mut self,
        graph: &Graph,
        order: &[usize],
        strategy: TraversalStrategy,
    ) -> Result<(), SccError> {
        let mut explored = std::mem::take(&mut self.explored);
        for &v in order {
            if explored[v] {
                continue;
            }
            self.root = v;
            traverse_on_current_stack(graph, v, &mut explored, self, strategy)?;
        }
        self.explored = explored;
        Ok(())
    }
}

impl DfsVisitor for PassContext {
    fn discover(&mut self, v: usize) {
        self.leader[v] = self.root;
    }

    fn finish(&mut self, v: usize) {
        if self.record_finish {
            self.counter += 1;
            self.finish_time[v] = self.counter;
        }
    }
}

/// Vertices by strictly decreasing finish time. Finish times are `1..=n`.
fn decreasing_finish_order(finish_time: &[usize]) -> Vec<usize> {
    let n = finish_time.len();
    let mut order = vec![0; n];
    for (v, &t) in finish_time.iter().enumerate() {
        order[n - t] = v;
    }
    order
}

fn check_permutation(n: usize, order: &[usize]) -> Result<(), SccError> {
    let invalid = |reason: String| SccError::InvalidOrder { expected: n, reason };

    if order.len() != n {
        return Err(invalid(format!("got {} entries", order.len())));
    }
    let mut seen = vec![false; n];
    for &v in order {
        if v >= n {
            return Err(invalid(format!("vertex {v} out of range")));
        }
        if seen[v] {
            return Err(invalid(format!("vertex {v} listed twice")));
        }
        seen[v] = true;
    }
    Ok(())
}

fn aggregate(graph: &Graph, passes: KosarajuPasses) -> SccResult {
    let (component_of, components) = group_by_leader(&passes.leader);
    let cyclic_component = cyclic_components(graph, &components);

    SccResult {
        leader: passes.leader,
        finish_time: passes.finish_time,
        component_of,
        components,
        cyclic_component,
    }
}
