use crate::domain::labeled::LabeledGraph;
use crate::infrastructure::dfs::{TraversalStrategy, DEFAULT_MAX_DEPTH};
use crate::infrastructure::event_ndjson::spawn_ndjson_printer;
use crate::infrastructure::scc_kosaraju::KosarajuSccDetector;
use crate::infrastructure::serde_json_adapter::{
    read_edge_list_file, read_graph_text, write_report_file,
};
use crate::usecase::compute::{compute_components, sample_graph, SccReport};
use crate::usecase::event::AppEvent;
use crate::usecase::report::render_report;
use crate::usecase::validate::validate_graph_text;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::mpsc;

pub async fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    run_with_args(&args).await
}

pub async fn run_with_args(args: &[String]) -> Result<()> {
    let cmd = Cli::parse(args)?;

    match cmd {
        Cli::SccCompute(opts) => {
            let graph = load_graph(&opts.input, opts.format).await?;
            let report = run_compute(&graph, &opts).await?;

            if let Some(output) = opts.output.as_deref() {
                write_report_file(output, &report)
                    .await
                    .with_context(|| format!("writing SCC report JSON: {output}"))?;
            }
            Ok(())
        }

        Cli::SccValidate { input, format } => {
            let graph = load_graph(&input, format).await?;

            eprintln!(
                "ok: graph is well-formed (vertices={} edges={})",
                graph.node_count(),
                graph.edge_count()
            );
            Ok(())
        }

        Cli::SccSample(opts) => {
            let graph = sample_graph().context("building sample graph")?;
            run_compute(&graph, &opts).await?;
            Ok(())
        }
    }
}

async fn load_graph(input: &str, format: GraphFormat) -> Result<LabeledGraph<String>> {
    match format {
        GraphFormat::Json => {
            let raw = read_graph_text(input)
                .await
                .with_context(|| format!("reading input graph JSON: {input}"))?;
            validate_graph_text(&raw).with_context(|| format!("validating graph: {input}"))
        }
        GraphFormat::EdgeList => read_edge_list_file(input)
            .await
            .with_context(|| format!("reading input edge list: {input}")),
    }
}

async fn run_compute<V>(graph: &LabeledGraph<V>, opts: &ComputeOptions) -> Result<SccReport>
where
    V: Eq + Hash + Clone + Debug + Display,
{
    let (tx, rx) = mpsc::channel::<AppEvent>(1024);
    let printer = if opts.emit_events {
        Some(spawn_ndjson_printer(rx))
    } else {
        drop(rx);
        None
    };

    let scc = KosarajuSccDetector::new(opts.strategy);
    let sink = if opts.emit_events { Some(tx) } else { None };
    let report = compute_components(graph, &scc, sink).await?;

    if let Some(handle) = printer {
        handle.await.ok();
    }

    let text = render_report(&report, opts.top);
    if opts.emit_events {
        // stdout carries NDJSON only.
        eprint!("{text}");
    } else {
        print!("{text}");
    }

    eprintln!(
        "summary: vertices={} edges={} components={} cyclic_components={} largest_component={}",
        report.stats.vertices,
        report.stats.edges,
        report.stats.components,
        report.stats.cyclic_components,
        report.stats.largest_component
    );

    Ok(report)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GraphFormat {
    Json,
    EdgeList,
}

impl GraphFormat {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "json" => Ok(GraphFormat::Json),
            "edges" => Ok(GraphFormat::EdgeList),
            other => Err(anyhow!(format!("unknown format: {other}\n\n{}", usage()))),
        }
    }

    fn from_path(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with(".json") {
            GraphFormat::Json
        } else {
            GraphFormat::EdgeList
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ComputeOptions {
    input: String,
    format: GraphFormat,
    output: Option<String>,
    top: Option<usize>,
    strategy: TraversalStrategy,
    emit_events: bool,
}

#[derive(Debug)]
enum Cli {
    SccCompute(ComputeOptions),
    SccValidate { input: String, format: GraphFormat },
    SccSample(ComputeOptions),
}

impl Cli {
    fn parse(args: &[String]) -> Result<Self> {
        // Expected:
        // <bin> scc compute --in/--input <graph> [--format json|edges] [--out <report.json>] [--top <k>] [--strategy iterative|recursive] [--max-depth <n>] [--emit-events]
        // <bin> scc validate --in/--input <graph> [--format json|edges]
        // <bin> scc sample [--top <k>] [--strategy iterative|recursive] [--max-depth <n>] [--emit-events]
        if args.len() < 3 {
            return Err(anyhow!(usage()));
        }

        if args[1] != "scc" {
            return Err(anyhow!(usage()));
        }

        match args[2].as_str() {
            "compute" => Self::parse_compute(args, true).map(Cli::SccCompute),
            "sample" => Self::parse_compute(args, false).map(Cli::SccSample),
            "validate" => Self::parse_validate(args),
            _ => Err(anyhow!(usage())),
        }
    }

    fn parse_compute(args: &[String], needs_input: bool) -> Result<ComputeOptions> {
        let mut input: Option<String> = None;
        let mut format: Option<GraphFormat> = None;
        let mut output: Option<String> = None;
        let mut top: Option<usize> = None;
        let mut recursive = false;
        let mut max_depth: Option<usize> = None;
        let mut emit_events = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" if needs_input => {
                    i += 1;
                    input = Some(value(args, i, "--in")?.to_string());
                }
                "--format" if needs_input => {
                    i += 1;
                    format = Some(GraphFormat::parse(value(args, i, "--format")?)?);
                }
                "--out" | "--output" if needs_input => {
                    i += 1;
                    output = Some(value(args, i, "--out")?.to_string());
                }
                "--top" => {
                    i += 1;
                    top = Some(parse_number(args, i, "--top")?);
                }
                "--strategy" => {
                    i += 1;
                    recursive = match value(args, i, "--strategy")? {
                        "iterative" => false,
                        "recursive" => true,
                        other => {
                            return Err(anyhow!(format!(
                                "unknown strategy: {other}\n\n{}",
                                usage()
                            )))
                        }
                    };
                }
                "--max-depth" => {
                    i += 1;
                    max_depth = Some(parse_number(args, i, "--max-depth")?);
                }
                "--emit-events" => {
                    emit_events = true;
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = if needs_input {
            input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?
        } else {
            String::new()
        };

        if max_depth.is_some() && !recursive {
            return Err(anyhow!(format!(
                "--max-depth requires --strategy recursive\n\n{}",
                usage()
            )));
        }
        let strategy = if recursive {
            TraversalStrategy::Recursive {
                max_depth: max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            }
        } else {
            TraversalStrategy::Iterative
        };

        Ok(ComputeOptions {
            format: format.unwrap_or_else(|| GraphFormat::from_path(&input)),
            input,
            output,
            top,
            strategy,
            emit_events,
        })
    }

    fn parse_validate(args: &[String]) -> Result<Self> {
        let mut input: Option<String> = None;
        let mut format: Option<GraphFormat> = None;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--in" | "--input" => {
                    i += 1;
                    input = Some(value(args, i, "--in")?.to_string());
                }
                "--format" => {
                    i += 1;
                    format = Some(GraphFormat::parse(value(args, i, "--format")?)?);
                }
                "-h" | "--help" => return Err(anyhow!(usage())),
                other => return Err(anyhow!(format!("unknown arg: {other}\n\n{}", usage()))),
            }
            i += 1;
        }

        let input = input.ok_or_else(|| anyhow!(format!("missing --in/--input\n\n{}", usage())))?;
        let format = format.unwrap_or_else(|| GraphFormat::from_path(&input));

        Ok(Cli::SccValidate { input, format })
    }
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!(format!("missing value for {flag}\n\n{}", usage())))
}

fn parse_number(args: &[String], i: usize, flag: &str) -> Result<usize> {
    let raw = value(args, i, flag)?;
    raw.parse::<usize>()
        .map_err(|_| anyhow!(format!("{flag} expects a non-negative integer, got {raw}")))
}

fn usage() -> &'static str {
    "Usage:\n  scc compute --in/--input <graph> [--format json|edges] [--out/--output <report.json>] [--top <k>] [--strategy iterative|recursive] [--max-depth <n>] [--emit-events]\n  scc validate --in/--input <graph> [--format json|edges]\n  scc sample [--top <k>] [--strategy iterative|recursive] [--max-depth <n>] [--emit-events]\n\nFormats:\n  json   {\"adjacency\": {\"<vertex>\": [<vertex>, ...]}}\n  edges  one `<from> <to>` pair per line; a lone `<vertex>` declares an isolated vertex\n  Defaults to json for *.json paths, edges otherwise.\n\nEvents:\n  If --emit-events is set, NDJSON events are written to stdout; the report and summary go to stderr."
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_rejects_unknown_arg() {
        let err = Cli::parse(&args(&["bin", "scc", "compute", "--wat"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown arg"));
        assert!(err.contains("Usage"));
    }

    #[test]
    fn parse_requires_input() {
        let err = Cli::parse(&args(&["bin", "scc", "compute", "--top", "3"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing --in/--input"));

        let err = Cli::parse(&args(&["bin", "scc", "validate"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing --in/--input"));
    }

    #[test]
    fn parse_compute_success_with_all_flags() {
        let cmd = Cli::parse(&args(&[
            "bin",
            "scc",
            "compute",
            "--in",
            "g.txt",
            "--out",
            "r.json",
            "--top",
            "10",
            "--strategy",
            "recursive",
            "--max-depth",
            "64",
            "--emit-events",
        ]))
        .expect("parse");

        match cmd {
            Cli::SccCompute(opts) => {
                assert_eq!(opts.input, "g.txt");
                assert_eq!(opts.format, GraphFormat::EdgeList);
                assert_eq!(opts.output.as_deref(), Some("r.json"));
                assert_eq!(opts.top, Some(10));
                assert_eq!(opts.strategy, TraversalStrategy::Recursive { max_depth: 64 });
                assert!(opts.emit_events);
            }
            _ => panic!("expected compute"),
        }
    }

    #[test]
    fn parse_compute_defaults() {
        let cmd = Cli::parse(&args(&["bin", "scc", "compute", "--in", "g.JSON"])).expect("parse");
        match cmd {
            Cli::SccCompute(opts) => {
                assert_eq!(opts.format, GraphFormat::Json);
                assert_eq!(opts.strategy, TraversalStrategy::Iterative);
                assert_eq!(opts.top, None);
                assert!(!opts.emit_events);
            }
            _ => panic!("expected compute"),
        }
    }

    #[test]
    fn parse_recursive_uses_default_depth() {
        let cmd = Cli::parse(&args(&["bin", "scc", "sample", "--strategy", "recursive"]))
            .expect("parse");
        match cmd {
            Cli::SccSample(opts) => assert_eq!(
                opts.strategy,
                TraversalStrategy::Recursive {
                    max_depth: DEFAULT_MAX_DEPTH
                }
            ),
            _ => panic!("expected sample"),
        }
    }

    #[test]
    fn parse_rejects_bad_values() {
        let err = Cli::parse(&args(&["bin", "scc", "sample", "--top", "many"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("--top expects"));

        let err = Cli::parse(&args(&["bin", "scc", "sample", "--strategy", "bfs"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown strategy"));

        let err = Cli::parse(&args(&["bin", "scc", "sample", "--max-depth", "5"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("requires --strategy recursive"));

        let err = Cli::parse(&args(&["bin", "scc", "sample", "--in", "x.json"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("unknown arg"));
    }

    #[test]
    fn parse_rejects_flags_without_values() {
        let err = Cli::parse(&args(&["bin", "scc", "compute", "--in", "g.json", "--out"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing value for --out"));

        let err = Cli::parse(&args(&["bin", "scc", "compute", "--in"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing value for --in"));

        let err = Cli::parse(&args(&["bin", "scc", "validate", "--input"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("missing value for --in"));
    }

    #[test]
    fn parse_help_returns_error_with_usage() {
        let err = Cli::parse(&args(&["bin", "scc", "compute", "--help"]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Usage"));
    }

    #[tokio::test]
    async fn run_with_args_smoke_writes_report() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("graph.json");
        let output_path = dir.path().join("report.json");

        std::fs::write(
            &input_path,
            r#"{"adjacency":{"a":["b"],"b":["c"],"c":["a"],"d":["a"]}}"#,
        )
        .expect("write input");

        run_with_args(&args(&[
            "bin",
            "scc",
            "compute",
            "--in",
            input_path.to_str().unwrap(),
            "--out",
            output_path.to_str().unwrap(),
        ]))
        .await
        .expect("run");

        let raw_out = std::fs::read_to_string(&output_path).expect("read output");
        let parsed: serde_json::Value = serde_json::from_str(&raw_out).expect("valid json");
        assert_eq!(parsed["sizes"], serde_json::json!([3, 1]));
        assert_eq!(parsed["leaders"]["a"], parsed["leaders"]["c"]);
    }

    #[tokio::test]
    async fn run_with_args_recursive_depth_exceeded_fails() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("chain.txt");
        let chain: String = (0..20).map(|i| format!("{i} {}\n", i + 1)).collect();
        std::fs::write(&input_path, chain).expect("write input");

        let err = run_with_args(&args(&[
            "bin",
            "scc",
            "compute",
            "--in",
            input_path.to_str().unwrap(),
            "--strategy",
            "recursive",
            "--max-depth",
            "5",
        ]))
        .await
        .unwrap_err();

        assert!(format!("{err:#}").contains("depth exceeded"));
    }

    #[tokio::test]
    async fn run_with_args_validate_rejects_dangling_edge() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("graph.json");
        std::fs::write(&input_path, r#"{"adjacency":{"1":[2]}}"#).expect("write input");

        let err = run_with_args(&args(&[
            "bin",
            "scc",
            "validate",
            "--in",
            input_path.to_str().unwrap(),
        ]))
        .await
        .unwrap_err();

        assert!(format!("{err:#}").contains("1 -> 2"));
    }

    #[tokio::test]
    async fn run_with_args_validate_reports_schema_error_before_parsing() {
        let dir = tempdir().expect("tempdir");
        let input_path = dir.path().join("graph.json");
        std::fs::write(&input_path, r#"{"adjacency":{"1":[1.5]}}"#).expect("write input");

        let err = run_with_args(&args(&[
            "bin",
            "scc",
            "validate",
            "--in",
            input_path.to_str().unwrap(),
        ]))
        .await
        .unwrap_err();

        assert!(format!("{err:#}").contains("Graph file validation failed"));
    }

    #[tokio::test]
    async fn run_with_args_sample_with_events() {
        run_with_args(&args(&["bin", "scc", "sample", "--emit-events", "--top", "3"]))
            .await
            .expect("sample");
    }

    #[tokio::test]
    async fn run_uses_env_args_and_returns_usage_error_under_test_harness() {
        let err = run().await.unwrap_err().to_string();
        assert!(err.contains("Usage"));
    }
}
