//! Dataset loading error types.

use std::path::PathBuf;

/// Errors that can occur when loading CSV datasets.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// Dataset file could not be opened or read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reader failed (malformed header, IO during parsing)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Quarter label not in the catalog
    #[error("unknown quarter: {0}")]
    UnknownQuarter(String),

    /// Background load task failed
    #[error("load task failed: {0}")]
    Task(String),
}
