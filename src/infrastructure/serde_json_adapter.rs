use crate::domain::error::SccError;
use crate::domain::labeled::LabeledGraph;
use crate::usecase::compute::SccReport;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GraphFileDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Entries in file order; a repeated key stays repeated so it can be rejected.
    #[serde(default, with = "adjacency_entries")]
    pub adjacency: Vec<(String, Vec<VertexRefDto>)>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Neighbor reference: JSON keys are always strings, neighbors may be either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VertexRefDto {
    Int(i64),
    Str(String),
}

impl fmt::Display for VertexRefDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VertexRefDto::Int(i) => write!(f, "{i}"),
            VertexRefDto::Str(s) => f.write_str(s),
        }
    }
}

mod adjacency_entries {
    use super::VertexRefDto;
    use serde::de::{MapAccess, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    type Entries = Vec<(String, Vec<VertexRefDto>)>;

    pub fn serialize<S: Serializer>(
        entries: &[(String, Vec<VertexRefDto>)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(entries.iter().map(|(k, v)| (k, v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Entries, D::Error> {
        deserializer.deserialize_map(EntriesVisitor)
    }

    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Entries;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an adjacency object mapping vertex ids to neighbor lists")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Entries, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, Vec<VertexRefDto>>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }
}

impl GraphFileDto {
    pub fn to_labeled_graph(&self) -> Result<LabeledGraph<String>, SccError> {
        LabeledGraph::from_adjacency(self.adjacency.iter().map(|(v, outs)| {
            (
                v.clone(),
                outs.iter().map(|o| o.to_string()).collect::<Vec<_>>(),
            )
        }))
    }
}

pub async fn read_graph_text(path: &str) -> Result<String> {
    Ok(fs::read_to_string(path).await?)
}

pub fn parse_graph_file(raw: &str) -> Result<GraphFileDto> {
    let dto: GraphFileDto = serde_json::from_str(raw)?;
    Ok(dto)
}

pub async fn read_graph_file(path: &str) -> Result<GraphFileDto> {
    let raw = read_graph_text(path).await?;
    parse_graph_file(&raw)
}

pub async fn read_edge_list_file(path: &str) -> Result<LabeledGraph<String>> {
    let raw = fs::read_to_string(path).await?;
    parse_edge_list(&raw)
}

/// One `from to` pair per line; a lone token declares an isolated vertex.
/// `#` starts a comment.
pub fn parse_edge_list(raw: &str) -> Result<LabeledGraph<String>> {
    let mut g = LabeledGraph::new();

    for (lineno, line) in raw.lines().enumerate() {
        let line = match line.split_once('#') {
            Some((before, _comment)) => before,
            None => line,
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            [v] => {
                g.add_vertex(v.to_string());
            }
            [from, to] => g.add_edge(from.to_string(), to.to_string()),
            _ => {
                return Err(anyhow!(
                    "line {}: expected `<from> <to>` or `<vertex>`, got {} tokens",
                    lineno + 1,
                    tokens.len()
                ))
            }
        }
    }

    Ok(g)
}

pub async fn write_report_file(path: &str, report: &SccReport) -> Result<()> {
    let pretty = serde_json::to_string_pretty(report)?;
    fs::write(path, pretty).await?;
    Ok(())
}
