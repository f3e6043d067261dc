use crate::domain::labeled::LabeledGraph;
use crate::infrastructure::schema_validator::validate_graph_document;
use crate::infrastructure::serde_json_adapter::{parse_graph_file, GraphFileDto};
use anyhow::{Context, Result};
use serde_json::Value;

/// Validates a graph file as read from disk: the schema runs on the raw
/// document before any typed parsing, so shape errors carry schema paths.
pub fn validate_graph_text(raw: &str) -> Result<LabeledGraph<String>> {
    let graph_value: Value = serde_json::from_str(raw).context("graph file is not valid JSON")?;
    validate_graph_document(&graph_value)?;

    let dto = parse_graph_file(raw)?;
    build_graph(&dto)
}

/// Schema check followed by the structural check (no dangling or duplicate vertices).
pub fn validate_graph(dto: &GraphFileDto) -> Result<LabeledGraph<String>> {
    let graph_value = serde_json::to_value(dto)?;
    validate_graph_document(&graph_value)?;
    build_graph(dto)
}

fn build_graph(dto: &GraphFileDto) -> Result<LabeledGraph<String>> {
    dto.to_labeled_graph().context("graph references a vertex that is not declared")
}
