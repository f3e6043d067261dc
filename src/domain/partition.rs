//! Component aggregation over a leader map.

use crate::domain::graph::Graph;
use std::collections::HashMap;

/// Groups vertices by leader.
///
/// Components are numbered by the first vertex (in index order) that reaches
/// them; members are ascending.
pub fn group_by_leader(leader: &[usize]) -> (Vec<usize>, Vec<Vec<usize>>) {
    let mut component_of = vec![usize::MAX; leader.len()];
    let mut components: Vec<Vec<usize>> = Vec::new();
    let mut by_leader: HashMap<usize, usize> = HashMap::new();

    for (v, &l) in leader.iter().enumerate() {
        let cid = *by_leader.entry(l).or_insert_with(|| {
            components.push(Vec::new());
            components.len() - 1
        });
        component_of[v] = cid;
        components[cid].push(v);
    }

    (component_of, components)
}

/// Component sizes, largest first. Order among equal sizes is unspecified.
pub fn component_sizes(leader: &[usize]) -> Vec<usize> {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for &l in leader {
        *counts.entry(l).or_insert(0) += 1;
    }
    let mut sizes: Vec<usize> = counts.into_values().collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes
}

/// A component is cyclic when it has more than one vertex or a self loop.
pub fn cyclic_components(graph: &Graph, components: &[Vec<usize>]) -> Vec<bool> {
    components
        .iter()
        .map(|comp| match comp.as_slice() {
            [only] => graph.has_self_loop(*only),
            _ => true,
        })
        .collect()
}
