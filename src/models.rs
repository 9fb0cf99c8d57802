//! Data models for run analytics.
//!
//! This module contains the records read from run logs and the summaries
//! derived from them. Everything here is built during a single pass over
//! the log directory and is read-only afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Result of a single optimizer run, read from one log file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    /// 1-based run index taken from the file name.
    pub run: usize,
    /// Total tour distance reported by the run.
    pub distance: f64,
    /// Wall-clock time of the run, in seconds.
    pub time: f64,
}

impl RunResult {
    pub fn new(run: usize, distance: f64, time: f64) -> Self {
        Self {
            run,
            distance,
            time,
        }
    }
}

/// All runs found for one (category, variant) pair, ordered by run index.
///
/// Distance and time stay together in one record per run, so filtering
/// or reordering can never pair a distance with another run's time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantSample {
    /// Variant (log type) name, e.g. `generic`.
    pub variant: String,
    /// Parsed runs in ascending run order.
    pub runs: Vec<RunResult>,
}

impl VariantSample {
    /// Creates an empty sample for a variant.
    pub fn new(variant: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            runs: Vec::new(),
        }
    }

    /// Appends a run to the sample.
    pub fn push(&mut self, run: RunResult) {
        self.runs.push(run);
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

/// Summary statistics for one (category, variant) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    /// Variant (log type) name.
    pub variant: String,
    /// Number of runs the summary was computed from.
    pub runs: usize,
    /// Arithmetic mean of run times.
    pub mean_time: f64,
    /// Arithmetic mean of run distances.
    pub mean_distance: f64,
    /// Smallest distance across runs.
    pub best_distance: f64,
    /// Largest distance across runs.
    pub worst_distance: f64,
    /// Time recorded by the run that achieved `best_distance`.
    pub time_of_best_distance: f64,
    /// Run index that achieved `best_distance` (first one on ties).
    pub best_run: usize,
}

/// Summaries for every variant of one category that had data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    /// Category (state) name, i.e. the directory name.
    pub name: String,
    /// Category directory as found on disk; `name` may be a lossy copy of
    /// its last component.
    #[serde(skip)]
    pub path: PathBuf,
    /// Summaries in configured variant order.
    pub summaries: Vec<VariantSummary>,
}

impl CategoryReport {
    /// Creates a report with no variants.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            summaries: Vec::new(),
        }
    }

    /// Looks up the summary for a variant.
    pub fn get(&self, variant: &str) -> Option<&VariantSummary> {
        self.summaries.iter().find(|s| s.variant == variant)
    }

    /// Variant names present in the report, in order.
    pub fn variants(&self) -> Vec<&str> {
        self.summaries.iter().map(|s| s.variant.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.is_empty()
    }
}

/// Reports for every category found under the base directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Directory the categories were discovered in.
    pub base_path: PathBuf,
    /// Category reports ordered by directory path.
    ///
    /// One entry per directory, so names that only collide after lossy
    /// UTF-8 conversion still get separate reports.
    pub categories: Vec<CategoryReport>,
}

impl AnalysisResult {
    /// Builds a result from finished category reports.
    pub fn new(base_path: PathBuf, reports: impl IntoIterator<Item = CategoryReport>) -> Self {
        let mut categories: Vec<CategoryReport> = reports.into_iter().collect();
        categories.sort_by(|a, b| a.path.cmp(&b.path));

        Self {
            base_path,
            categories,
        }
    }

    /// Looks up a category by name.
    pub fn get(&self, category: &str) -> Option<&CategoryReport> {
        self.categories.iter().find(|c| c.name == category)
    }

    /// Iterates categories in display order.
    pub fn iter(&self) -> impl Iterator<Item = &CategoryReport> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of variant summaries across all categories.
    pub fn summary_count(&self) -> usize {
        self.categories.iter().map(|c| c.summaries.len()).sum()
    }
}

impl fmt::Display for VariantSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: best {:.2} (run {}, {:.2}s), mean {:.2} over {} runs",
            self.variant,
            self.best_distance,
            self.best_run,
            self.time_of_best_distance,
            self.mean_distance,
            self.runs
        )
    }
}
