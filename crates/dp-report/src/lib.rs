//! Markdown rendering of detection results.
//!
//! Turns a [`PipelineOutcome`] into a self-contained report: one section per
//! method with a statistics table, a performance line, and cluster details
//! where every member is listed as kept or removed. Failed methods render
//! their error message instead of statistics.

use chrono::Utc;
use dp_core::Stats;
use dp_engine::{MethodReport, PipelineOutcome};

/// Longest excerpt of a document shown in cluster details.
const EXCERPT_CHARS: usize = 80;

/// Render a full pipeline outcome as a markdown document.
pub fn render_markdown(outcome: &PipelineOutcome) -> String {
    let mut out = String::new();
    out.push_str("# Near-Duplicate Detection Report\n\n");
    out.push_str(&format!(
        "Generated: {}\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("Corpus size: {} documents\n", outcome.total_docs));

    for method_outcome in &outcome.methods {
        out.push_str(&format!("\n## {}\n\n", method_outcome.method));
        match &method_outcome.result {
            Ok(report) => render_method(&mut out, report),
            Err(error) => {
                out.push_str(&format!("Failed: {error}\n"));
            }
        }
    }
    out
}

fn render_method(out: &mut String, method_report: &MethodReport) {
    render_stats(out, &method_report.report.stats);
    out.push_str(&format!(
        "\nCompleted in {:.2} ms with {} similar pairs.\n",
        method_report.elapsed_ms,
        method_report.pairs.len()
    ));

    if method_report.report.clusters.is_empty() {
        out.push_str("\nNo duplicate clusters found.\n");
        return;
    }
    for (key, cluster) in &method_report.report.clusters {
        out.push_str(&format!(
            "\n### Cluster {} ({} documents)\n\n",
            key,
            cluster.size()
        ));
        // Representative first, removed members after, ids ascending within each.
        for document in cluster.documents.iter().filter(|d| d.is_representative) {
            out.push_str(&format!("- [{}] kept: {}\n", document.id, excerpt(&document.text)));
        }
        for document in cluster.documents.iter().filter(|d| !d.is_representative) {
            out.push_str(&format!(
                "- [{}] removed: {}\n",
                document.id,
                excerpt(&document.text)
            ));
        }
    }
}

fn render_stats(out: &mut String, stats: &Stats) {
    out.push_str("| Statistic | Value |\n");
    out.push_str("|-----------|-------|\n");
    out.push_str(&format!("| Total documents | {} |\n", stats.total_docs));
    out.push_str(&format!("| Clusters | {} |\n", stats.n_clusters));
    out.push_str(&format!("| Removed | {} |\n", stats.n_removed));
    out.push_str(&format!("| Kept | {} |\n", stats.n_kept));
    out.push_str(&format!(
        "| Removal rate | {:.1}% |\n",
        stats.removal_rate * 100.0
    ));
    out.push_str(&format!("| Similar pairs | {} |\n", stats.n_pairs));
}

/// Single-line excerpt, truncated on a character boundary.
fn excerpt(text: &str) -> String {
    let flattened = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = flattened.chars();
    let head: String = chars.by_ref().take(EXCERPT_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
