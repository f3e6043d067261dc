use crate::usecase::compute::SccReport;
use std::fmt::Write as _;

/// Human-readable summary. `top` limits how many sizes are listed, never the count.
pub fn render_report(report: &SccReport, top: Option<usize>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Vertices in graph: {}", report.stats.vertices);
    let _ = writeln!(out, "Number of SCCs: {}", report.sizes.len());
    let _ = writeln!(out, "SCCs in order of decreasing size:");

    let shown = top.unwrap_or(report.sizes.len()).min(report.sizes.len());
    for size in report.sizes.iter().take(shown) {
        let _ = writeln!(out, "{size}");
    }
    if shown < report.sizes.len() {
        let _ = writeln!(out, "... ({} more)", report.sizes.len() - shown);
    }
    out
}
