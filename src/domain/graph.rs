use crate::domain::error::SccError;
use std::ops::Range;

/// Dense directed graph: vertex `i` owns `edges[i]`, its ordered out-neighbors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    pub edges: Vec<Vec<usize>>,
}

impl Graph {
    pub fn new(node_count: usize) -> Self {
        Self {
            edges: vec![Vec::new(); node_count],
        }
    }

    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, SccError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut g = Self::new(node_count);
        for (u, v) in edges {
            g.add_edge(u, v)?;
        }
        Ok(g)
    }

    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<(), SccError> {
        let node_count = self.node_count();
        for vertex in [from, to] {
            if vertex >= node_count {
                return Err(SccError::VertexOutOfRange { vertex, node_count });
            }
        }
        self.edges[from].push(to);
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn vertices(&self) -> Range<usize> {
        0..self.node_count()
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.edges[v]
    }

    pub fn has_self_loop(&self, v: usize) -> bool {
        self.edges[v].contains(&v)
    }

    /// Every edge flipped. Sinks and isolated vertices keep an (empty) entry.
    pub fn reversed(&self) -> Self {
        let mut rev = Self::new(self.node_count());
        for (u, outs) in self.edges.iter().enumerate() {
            for &v in outs {
                rev.edges[v].push(u);
            }
        }
        rev
    }

    /// Sorted edge multiset, for comparing graphs independent of neighbor order.
    pub fn edge_list(&self) -> Vec<(usize, usize)> {
        let mut out: Vec<(usize, usize)> = self
            .edges
            .iter()
            .enumerate()
            .flat_map(|(u, outs)| outs.iter().map(move |&v| (u, v)))
            .collect();
        out.sort_unstable();
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccResult {
    /// Phase 2 traversal root of each vertex; equal leaders mean the same component.
    pub leader: Vec<usize>,
    /// Phase 1 post-order finish time of each vertex, 1-based.
    pub finish_time: Vec<usize>,
    pub component_of: Vec<usize>,
    pub components: Vec<Vec<usize>>,
    pub cyclic_component: Vec<bool>,
}

impl SccResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn same_component(&self, a: usize, b: usize) -> bool {
        self.leader[a] == self.leader[b]
    }

    pub fn sizes_descending(&self) -> Vec<usize> {
        crate::domain::partition::component_sizes(&self.leader)
    }
}
