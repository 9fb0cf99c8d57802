//! Error types for log parsing and aggregation.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to extract a run result from the text of one log file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("expected at least {expected} lines, found {found}")]
    MissingLine { expected: usize, found: usize },

    #[error("line {line} is not a number: {value:?}")]
    InvalidNumber { line: usize, value: String },
}

/// Errors raised while aggregating a directory of logs.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed log file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Cannot list {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl AnalyticsError {
    /// Path of the file or directory that caused the failure.
    pub fn path(&self) -> &std::path::Path {
        match self {
            AnalyticsError::Io { path, .. }
            | AnalyticsError::Parse { path, .. }
            | AnalyticsError::Walk { path, .. } => path,
        }
    }
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
