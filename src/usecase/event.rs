use crate::usecase::stats::SccStats;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum AppEvent {
    PhaseStarted {
        name: String,
    },
    PhaseFinished {
        name: String,
    },

    GraphLoaded {
        vertices: usize,
        edges: usize,
    },

    SccComputed {
        nodes: usize,
        edges: usize,
        components: usize,
        cyclic_components: usize,
    },

    ComponentFound {
        leader: String,
        size: usize,
        cyclic: bool,
    },

    Finished {
        stats: SccStats,
    },
}
