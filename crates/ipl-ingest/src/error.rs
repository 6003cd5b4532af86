//! Error types for season table ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or cleaning a source table.
///
/// Every variant is terminal for the request: no partial dataset is
/// returned alongside an error.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read the source file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The source could not be parsed as tabular data.
    #[error("failed to parse source as CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The source has no header row.
    #[error("source is empty: no header row found")]
    EmptySource,

    // === Schema Errors ===
    /// A column required for keying records is absent.
    #[error("required column '{column}' not found in source")]
    MissingColumn { column: &'static str },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::MissingColumn { column: "Year" };
        assert_eq!(err.to_string(), "required column 'Year' not found in source");
    }
}
