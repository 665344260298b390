//! Error types for data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and splitting the datasets.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// CSV has a header but no data rows.
    #[error("CSV file has no data rows: {path}")]
    EmptyDataFrame { path: PathBuf },

    /// CSV header contains a blank column name.
    #[error("CSV file has an empty column name: {path}")]
    EmptyColumnName { path: PathBuf },

    // === Configuration Errors ===
    /// Target column is not present in the labelled dataset.
    #[error("target column '{column}' not found in {path}")]
    MissingTarget { column: String, path: PathBuf },

    /// Split fractions cannot be satisfied for the table.
    #[error("invalid train/test split: {reason}")]
    InvalidSplit { reason: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/train.csv"),
        };
        assert_eq!(err.to_string(), "CSV file not found: /data/train.csv");

        let err = IngestError::MissingTarget {
            column: "Survived".to_string(),
            path: PathBuf::from("train.csv"),
        };
        assert_eq!(
            err.to_string(),
            "target column 'Survived' not found in train.csv"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("Age".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
