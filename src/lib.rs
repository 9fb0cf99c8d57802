//! Summary statistics for optimizer run logs.
//!
//! Each state directory under a base path holds numbered run logs per
//! optimizer variant (`1_generic.txt`, `1_greedy.txt`, ...). The 4th line
//! of a log is the tour distance and the 5th the run time. This crate
//! reduces them to mean/best/worst statistics per state and variant, where
//! the reported time of the best distance is the time of that same run.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scanner;

pub use analysis::{
    analyze, collect_variant_sample, extract_run, summarize, AggregatorConfig, LogAggregator,
};
pub use error::{AnalyticsError, AnalyticsResult, ParseError};
pub use models::{AnalysisResult, CategoryReport, RunResult, VariantSample, VariantSummary};
