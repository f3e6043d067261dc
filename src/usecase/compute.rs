use crate::domain::error::SccError;
use crate::domain::labeled::LabeledGraph;
use crate::domain::traits::SccDetector;
use crate::usecase::event::AppEvent;
use crate::usecase::stats::SccStats;
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::mpsc;

/// Full, untruncated partition of one graph.
#[derive(Debug, Clone, Serialize)]
pub struct SccReport {
    pub stats: SccStats,
    /// Component sizes, largest first.
    pub sizes: Vec<usize>,
    /// Members of each component, in the same order as `sizes`.
    pub components: Vec<Vec<String>>,
    /// Vertex -> leader of its component.
    pub leaders: BTreeMap<String, String>,
}

pub async fn compute_components<V>(
    graph: &LabeledGraph<V>,
    scc: &dyn SccDetector,
    sink: Option<mpsc::Sender<AppEvent>>,
) -> Result<SccReport>
where
    V: Eq + Hash + Clone + Debug + Display,
{
    emit(
        &sink,
        AppEvent::GraphLoaded {
            vertices: graph.node_count(),
            edges: graph.edge_count(),
        },
    )
    .await;

    emit(&sink, AppEvent::PhaseStarted { name: "scc".into() }).await;
    let res = scc
        .compute_scc(graph.graph())
        .context("computing strongly connected components")?;
    let cyclic_count = res.cyclic_component.iter().filter(|&&b| b).count();
    emit(
        &sink,
        AppEvent::SccComputed {
            nodes: graph.node_count(),
            edges: graph.edge_count(),
            components: res.components.len(),
            cyclic_components: cyclic_count,
        },
    )
    .await;
    emit(&sink, AppEvent::PhaseFinished { name: "scc".into() }).await;

    emit(
        &sink,
        AppEvent::PhaseStarted {
            name: "aggregate".into(),
        },
    )
    .await;

    // Largest first; equal sizes keep discovery order.
    let mut ranked: Vec<usize> = (0..res.components.len()).collect();
    ranked.sort_by(|&a, &b| res.components[b].len().cmp(&res.components[a].len()));

    let mut sizes = Vec::with_capacity(ranked.len());
    let mut components = Vec::with_capacity(ranked.len());
    for &cid in ranked.iter() {
        let members = &res.components[cid];
        let leader = graph.label(res.leader[members[0]]).to_string();
        emit(
            &sink,
            AppEvent::ComponentFound {
                leader,
                size: members.len(),
                cyclic: res.cyclic_component[cid],
            },
        )
        .await;
        sizes.push(members.len());
        components.push(
            members
                .iter()
                .map(|&v| graph.label(v).to_string())
                .collect(),
        );
    }

    let leaders: BTreeMap<String, String> = res
        .leader
        .iter()
        .enumerate()
        .map(|(v, &l)| (graph.label(v).to_string(), graph.label(l).to_string()))
        .collect();

    let stats = SccStats {
        vertices: graph.node_count(),
        edges: graph.edge_count(),
        components: sizes.len(),
        singleton_components: sizes.iter().filter(|&&s| s == 1).count(),
        cyclic_components: cyclic_count,
        largest_component: sizes.first().copied().unwrap_or(0),
    };
    emit(
        &sink,
        AppEvent::PhaseFinished {
            name: "aggregate".into(),
        },
    )
    .await;

    emit(
        &sink,
        AppEvent::Finished {
            stats: stats.clone(),
        },
    )
    .await;

    Ok(SccReport {
        stats,
        sizes,
        components,
        leaders,
    })
}

/// Ten-vertex demonstration graph; its largest component is `{3, 4, 5, 6, 7, 9}`.
pub fn sample_graph() -> Result<LabeledGraph<u32>, SccError> {
    LabeledGraph::from_adjacency(vec![
        (1, vec![]),
        (2, vec![]),
        (3, vec![4]),
        (4, vec![7]),
        (5, vec![3, 7]),
        (6, vec![3]),
        (7, vec![9]),
        (8, vec![]),
        (9, vec![5, 6]),
        (10, vec![9]),
    ])
}

async fn emit(sink: &Option<mpsc::Sender<AppEvent>>, ev: AppEvent) {
    if let Some(tx) = sink {
        let _ = tx.send(ev).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::scc_kosaraju::KosarajuSccDetector;

    #[test]
    fn sample_graph_keeps_key_order() {
        let g = sample_graph().expect("sample");
        assert_eq!(g.node_count(), 10);
        assert_eq!(g.edge_count(), 9);
        assert_eq!(g.labels(), (1..=10).collect::<Vec<u32>>().as_slice());
    }

    #[tokio::test]
    async fn compute_components_on_sample_graph() {
        let g = sample_graph().expect("sample");
        let report = compute_components(&g, &KosarajuSccDetector::default(), None)
            .await
            .expect("compute");

        assert_eq!(report.sizes, vec![6, 1, 1, 1, 1]);
        let mut big = report.components[0].clone();
        big.sort_by_key(|s| s.parse::<u32>().expect("numeric"));
        assert_eq!(big, vec!["3", "4", "5", "6", "7", "9"]);
        assert_eq!(report.stats.components, 5);
        assert_eq!(report.stats.singleton_components, 4);
        assert_eq!(report.stats.cyclic_components, 1);
        assert_eq!(report.stats.largest_component, 6);
        assert_eq!(report.leaders.len(), 10);
        assert_eq!(report.leaders["5"], report.leaders["9"]);
        assert_ne!(report.leaders["5"], report.leaders["10"]);
    }
}
