// Infrastructure layer: algorithms behind domain ports, file I/O, serde, eventing
pub mod dfs;
pub mod event_ndjson;
pub mod scc_kosaraju;
pub mod schema_validator;
pub mod serde_json_adapter;
