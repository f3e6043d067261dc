use crate::usecase::event::AppEvent;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

fn app_event_to_json(ev: &AppEvent) -> serde_json::Value {
    match ev {
        AppEvent::PhaseStarted { name } => json!({"type":"phase_started","name":name}),
        AppEvent::PhaseFinished { name } => json!({"type":"phase_finished","name":name}),
        AppEvent::GraphLoaded { vertices, edges } => {
            json!({"type":"graph_loaded","vertices":vertices,"edges":edges})
        }
        AppEvent::SccComputed {
            nodes,
            edges,
            components,
            cyclic_components,
        } => {
            json!({"type":"scc_computed","nodes":nodes,"edges":edges,"components":components,"cyclic_components":cyclic_components})
        }
        AppEvent::ComponentFound {
            leader,
            size,
            cyclic,
        } => {
            json!({"type":"component_found","leader":leader,"size":size,"cyclic":cyclic})
        }
        AppEvent::Finished { stats } => json!({"type":"finished","stats":stats}),
    }
}

pub fn spawn_ndjson_printer(mut rx: mpsc::Receiver<AppEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(ev) = rx.recv().await {
            let line = app_event_to_json(&ev);

            // NDJSON to stdout.
            println!("{line}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::stats::SccStats;

    #[test]
    fn app_event_to_json_covers_all_variants() {
        let v = app_event_to_json(&AppEvent::PhaseStarted {
            name: "scc".to_string(),
        });
        assert_eq!(v["type"], "phase_started");

        let v = app_event_to_json(&AppEvent::PhaseFinished {
            name: "scc".to_string(),
        });
        assert_eq!(v["type"], "phase_finished");

        let v = app_event_to_json(&AppEvent::GraphLoaded {
            vertices: 10,
            edges: 9,
        });
        assert_eq!(v["type"], "graph_loaded");
        assert_eq!(v["edges"], 9);

        let v = app_event_to_json(&AppEvent::SccComputed {
            nodes: 1,
            edges: 2,
            components: 3,
            cyclic_components: 4,
        });
        assert_eq!(v["type"], "scc_computed");
        assert_eq!(v["nodes"], 1);

        let v = app_event_to_json(&AppEvent::ComponentFound {
            leader: "9".to_string(),
            size: 6,
            cyclic: true,
        });
        assert_eq!(v["type"], "component_found");
        assert_eq!(v["leader"], "9");
        assert_eq!(v["cyclic"], true);

        let v = app_event_to_json(&AppEvent::Finished {
            stats: SccStats {
                components: 5,
                ..SccStats::default()
            },
        });
        assert_eq!(v["type"], "finished");
        assert_eq!(v["stats"]["components"], 5);
    }

    #[tokio::test]
    async fn spawn_ndjson_printer_drains_and_exits() {
        let (tx, rx) = mpsc::channel::<AppEvent>(8);
        let handle = spawn_ndjson_printer(rx);

        tx.send(AppEvent::PhaseStarted {
            name: "scc".to_string(),
        })
        .await
        .expect("send");
        drop(tx);

        handle.await.expect("join");
    }
}
