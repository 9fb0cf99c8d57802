//! Analysis modules.
//!
//! Aggregation of run logs into per-category summaries.

pub mod aggregator;

pub use aggregator::*;
