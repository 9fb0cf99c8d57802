//! Analytics report generation.
//!
//! This module renders the per-category `analytics.txt` files, the
//! console summary, and the JSON dump of an analysis.

use crate::models::{AnalysisResult, CategoryReport, VariantSummary};
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default name of the per-category output file.
pub const DEFAULT_OUTPUT_FILE: &str = "analytics.txt";

/// Labeled statistics of a summary, in output order.
fn statistic_lines(summary: &VariantSummary) -> [(&'static str, f64); 5] {
    [
        ("Mean Time", summary.mean_time),
        ("Mean Distance", summary.mean_distance),
        ("Best Result", summary.best_distance),
        ("Worst Result", summary.worst_distance),
        ("Time of Best Distance", summary.time_of_best_distance),
    ]
}

/// Generate the block written for one variant, ending in a blank line.
pub fn render_variant_block(summary: &VariantSummary) -> String {
    let mut block = String::new();

    block.push_str(&format!("Log Type: {}\n", summary.variant));
    for (label, value) in statistic_lines(summary) {
        block.push_str(&format!("{}: {:.2}\n", label, value));
    }
    block.push('\n');

    block
}

/// Generate the contents of a category's analytics file.
pub fn render_category_file(report: &CategoryReport) -> String {
    report.summaries.iter().map(render_variant_block).collect()
}

/// Generate the console rendering of a whole analysis.
pub fn render_console(result: &AnalysisResult) -> String {
    let mut output = String::new();

    for report in result.iter() {
        output.push_str(&format!("State: {}\n", report.name));

        if report.is_empty() {
            output.push_str("  No runs found\n");
            continue;
        }

        for summary in &report.summaries {
            output.push_str(&format!("  Log Type: {}\n", summary.variant));
            for (label, value) in statistic_lines(summary) {
                output.push_str(&format!("    {}: {:.2}\n", label, value));
            }
        }
    }

    output
}

/// Generate a JSON dump of the analysis.
pub fn render_json(result: &AnalysisResult) -> Result<String> {
    serde_json::to_string_pretty(result).map_err(Into::into)
}

/// Write one analytics file into every category directory.
///
/// Categories without any summaries still get an (empty) file. Returns the
/// paths written, in category order.
pub fn write_analytics(result: &AnalysisResult, file_name: &str) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(result.len());

    for report in result.iter() {
        let path = report.path.join(file_name);
        write_category_file(report, &path)?;
        info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

/// Write a single category's analytics file.
pub fn write_category_file(report: &CategoryReport, path: &Path) -> Result<()> {
    let content = render_category_file(report);

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
