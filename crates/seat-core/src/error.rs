//! Error types for seat-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in seat-core
///
/// Parsing, merging and querying never fail; these cover the file and
/// format edges around them.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error from the csv crate
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A seat submitted for appending is missing required fields
    #[error("invalid seat: {0}")]
    InvalidSeat(String),

    /// Only one of the two seating sources was configured
    #[error("both primary and secondary sources must be given, or neither")]
    IncompleteSources,

    /// Unsupported export format
    #[error("unknown format '{0}', supported formats: csv, json")]
    UnknownFormat(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
