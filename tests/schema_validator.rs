use anyhow::Result;
use serde_json::json;

use kosaraju_scc::infrastructure::schema_validator::validate_graph_document;

#[test]
fn validate_valid_graph_document_integration() -> Result<()> {
    let valid = json!({
        "name": "sample",
        "adjacency": {
            "1": [],
            "3": [4],
            "4": ["3"]
        },
        "x_source": "hand-written"
    });

    validate_graph_document(&valid)?;
    Ok(())
}

#[test]
fn validate_graph_document_requires_adjacency() {
    let missing = json!({ "name": "no edges here" });
    assert!(validate_graph_document(&missing).is_err());
}

#[test]
fn validate_graph_document_rejects_non_vertex_neighbors() {
    let invalid = json!({
        "adjacency": {
            "1": [1.5, {"id": 2}]
        }
    });

    assert!(validate_graph_document(&invalid).is_err());
}

#[test]
fn validate_graph_document_rejects_non_object_adjacency() {
    let invalid = json!({ "adjacency": [[1, 2]] });
    assert!(validate_graph_document(&invalid).is_err());
}
