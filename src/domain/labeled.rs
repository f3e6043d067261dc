use crate::domain::error::SccError;
use crate::domain::graph::Graph;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Maps arbitrary vertex identifiers onto the dense indices of a [`Graph`].
///
/// Labels are indexed in insertion order, which is also the default Phase 1
/// enumeration order of the detector.
#[derive(Debug, Clone)]
pub struct LabeledGraph<V> {
    graph: Graph,
    labels: Vec<V>,
    index: HashMap<V, usize>,
}

impl<V> Default for LabeledGraph<V> {
    fn default() -> Self {
        Self {
            graph: Graph::default(),
            labels: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V> LabeledGraph<V>
where
    V: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds from `(vertex, out-neighbors)` pairs. Every neighbor must itself be a key.
    pub fn from_adjacency<I, N>(adjacency: I) -> Result<Self, SccError>
    where
        I: IntoIterator<Item = (V, N)>,
        N: IntoIterator<Item = V>,
    {
        let entries: Vec<(V, Vec<V>)> = adjacency
            .into_iter()
            .map(|(v, outs)| (v, outs.into_iter().collect()))
            .collect();

        let mut g = Self::new();
        for (v, _) in entries.iter() {
            if g.index.contains_key(v) {
                return Err(SccError::DuplicateVertex(render(v)));
            }
            g.add_vertex(v.clone());
        }

        for (v, outs) in entries.iter() {
            let from = g.index[v];
            for to in outs {
                let Some(&to_idx) = g.index.get(to) else {
                    return Err(SccError::DanglingEdge {
                        from: render(v),
                        to: render(to),
                    });
                };
                g.graph.edges[from].push(to_idx);
            }
        }

        Ok(g)
    }

    /// Builds from `(from, to)` pairs; endpoints become vertices in first-seen order.
    pub fn from_edge_list<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (V, V)>,
    {
        let mut g = Self::new();
        for (from, to) in edges {
            g.add_edge(from, to);
        }
        g
    }

    /// Returns the dense index of `v`, inserting it with no edges if new.
    pub fn add_vertex(&mut self, v: V) -> usize {
        if let Some(&i) = self.index.get(&v) {
            return i;
        }
        let i = self.labels.len();
        self.labels.push(v.clone());
        self.index.insert(v, i);
        self.graph.edges.push(Vec::new());
        i
    }

    pub fn add_edge(&mut self, from: V, to: V) {
        let u = self.add_vertex(from);
        let v = self.add_vertex(to);
        self.graph.edges[u].push(v);
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn labels(&self) -> &[V] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> &V {
        &self.labels[index]
    }

    pub fn index_of(&self, v: &V) -> Option<usize> {
        self.index.get(v).copied()
    }

    pub fn neighbors_of(&self, v: &V) -> Option<impl Iterator<Item = &V> + '_> {
        let i = self.index_of(v)?;
        Some(self.graph.edges[i].iter().map(move |&j| &self.labels[j]))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn render<V: Debug>(v: &V) -> String {
    let s = format!("{v:?}");
    // Strip the quotes Debug puts around string labels.
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .map(str::to_string)
        .unwrap_or(s)
}
