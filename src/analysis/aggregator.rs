//! Run log aggregation and statistics.
//!
//! This module reads the numbered run logs of every category, pairs each
//! run's distance with its time, and reduces them to per-variant summaries.

use crate::error::{AnalyticsError, AnalyticsResult, ParseError};
use crate::models::{AnalysisResult, CategoryReport, RunResult, VariantSample, VariantSummary};
use crate::scanner::{run_file_path, CategoryScanner};
use std::path::Path;
use tracing::{debug, info};

/// Zero-based line holding the tour distance.
pub const DISTANCE_LINE: usize = 3;
/// Zero-based line holding the run time.
pub const TIME_LINE: usize = 4;

/// Variants compared by default.
pub const DEFAULT_VARIANTS: [&str; 2] = ["generic", "greedy"];
/// Number of runs looked up per variant by default.
pub const DEFAULT_MAX_RUNS: usize = 10;

/// Configuration for the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Variant names, in the order they appear in reports.
    pub variants: Vec<String>,
    /// Highest run index looked up for each variant.
    pub max_runs: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            variants: DEFAULT_VARIANTS.iter().map(|v| v.to_string()).collect(),
            max_runs: DEFAULT_MAX_RUNS,
        }
    }
}

impl From<&crate::config::AggregatorSettings> for AggregatorConfig {
    fn from(settings: &crate::config::AggregatorSettings) -> Self {
        Self {
            variants: settings.variants.clone(),
            max_runs: settings.max_runs,
        }
    }
}

/// Aggregates run logs below a base directory.
pub struct LogAggregator {
    config: AggregatorConfig,
}

impl LogAggregator {
    /// Create a new aggregator.
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Analyze every category directory under `base_path`.
    ///
    /// Every category found appears in the result, even when none of its
    /// variants had any runs. The first malformed log aborts the analysis.
    pub fn analyze(&self, base_path: &Path) -> AnalyticsResult<AnalysisResult> {
        let scanner = CategoryScanner::new(base_path);
        let categories = scanner.categories()?;
        info!(
            "Found {} categories in {}",
            categories.len(),
            base_path.display()
        );

        let mut reports = Vec::with_capacity(categories.len());

        for category in categories {
            let mut report = CategoryReport::new(&category.name, category.path.clone());

            for variant in &self.config.variants {
                let sample = collect_variant_sample(&category.path, variant, self.config.max_runs)?;

                match summarize(&sample) {
                    Some(summary) => {
                        debug!("{}: {}", category.name, summary);
                        report.summaries.push(summary);
                    }
                    None => debug!("{}: no runs for {}", category.name, variant),
                }
            }

            reports.push(report);
        }

        Ok(AnalysisResult::new(base_path.to_path_buf(), reports))
    }
}

/// Analyze `base_path` with an explicit variant list and run count.
pub fn analyze(
    base_path: &Path,
    variants: &[String],
    max_runs: usize,
) -> AnalyticsResult<AnalysisResult> {
    LogAggregator::new(AggregatorConfig {
        variants: variants.to_vec(),
        max_runs,
    })
    .analyze(base_path)
}

/// Extract the distance and time of one run from the text of its log.
///
/// Line 4 holds the distance and line 5 the time. Anything after the
/// fifth line is ignored.
pub fn extract_run(run: usize, contents: &str) -> Result<RunResult, ParseError> {
    let lines: Vec<&str> = contents.lines().collect();

    if lines.len() <= TIME_LINE {
        return Err(ParseError::MissingLine {
            expected: TIME_LINE + 1,
            found: lines.len(),
        });
    }

    let distance = parse_number(lines[DISTANCE_LINE], DISTANCE_LINE)?;
    let time = parse_number(lines[TIME_LINE], TIME_LINE)?;

    Ok(RunResult::new(run, distance, time))
}

fn parse_number(line: &str, index: usize) -> Result<f64, ParseError> {
    let value = line.trim();
    value.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
        line: index + 1,
        value: value.to_string(),
    })
}

/// Read and parse a single run log.
pub fn extract_run_file(path: &Path, run: usize) -> AnalyticsResult<RunResult> {
    let contents = std::fs::read_to_string(path).map_err(|source| AnalyticsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    extract_run(run, &contents).map_err(|source| AnalyticsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load runs `1..=max_runs` of a variant from a category directory.
///
/// Missing run files are skipped, so the sample may hold anywhere from
/// zero to `max_runs` runs. A run path that exists but cannot be read as a
/// file is an error.
pub fn collect_variant_sample(
    category_path: &Path,
    variant: &str,
    max_runs: usize,
) -> AnalyticsResult<VariantSample> {
    let mut sample = VariantSample::new(variant);

    for run in 1..=max_runs {
        let path = run_file_path(category_path, run, variant);

        if !path.exists() {
            debug!("Run {} missing: {}", run, path.display());
            continue;
        }

        sample.push(extract_run_file(&path, run)?);
    }

    Ok(sample)
}

/// Reduce a sample to its summary statistics.
///
/// Returns `None` for an empty sample. The reported time of the best
/// distance comes from the same run as that distance; on ties the
/// earliest run wins.
pub fn summarize(sample: &VariantSample) -> Option<VariantSummary> {
    let first = sample.runs.first()?;
    let count = sample.runs.len() as f64;

    let mut best = first;
    let mut worst_distance = first.distance;
    let mut total_time = 0.0;
    let mut total_distance = 0.0;

    for run in &sample.runs {
        total_time += run.time;
        total_distance += run.distance;

        if run.distance < best.distance {
            best = run;
        }
        if run.distance > worst_distance {
            worst_distance = run.distance;
        }
    }

    Some(VariantSummary {
        variant: sample.variant.clone(),
        runs: sample.runs.len(),
        mean_time: total_time / count,
        mean_distance: total_distance / count,
        best_distance: best.distance,
        worst_distance,
        time_of_best_distance: best.time,
        best_run: best.run,
    })
}
