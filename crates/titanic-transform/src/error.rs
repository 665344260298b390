//! Error types for transforms and pipeline construction.

use polars::prelude::DataType;
use thiserror::Error;

/// A transform precondition that did not hold.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("column '{column}' not found")]
    ColumnNotFound { column: String },

    #[error("column '{column}' has a missing value at row {row}")]
    MissingValue { column: String, row: usize },

    #[error("column '{column}' has a null row key at row {row}")]
    NullIndexValue { column: String, row: usize },

    #[error("column '{column}' has duplicate row key value '{value}'")]
    DuplicateIndexValue { column: String, value: String },

    #[error("column '{column}' must hold text, found {dtype}")]
    NotText { column: String, dtype: String },

    #[error("column '{column}' must be numeric, found {dtype}")]
    NotNumeric { column: String, dtype: String },

    #[error("no fill value for category '{category}' of column '{column}' at row {row}")]
    UnmappedCategory {
        column: String,
        row: usize,
        category: String,
    },

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl TransformError {
    pub(crate) fn column_not_found(column: &str) -> Self {
        Self::ColumnNotFound {
            column: column.to_string(),
        }
    }

    pub(crate) fn not_numeric(column: &str, dtype: &DataType) -> Self {
        Self::NotNumeric {
            column: column.to_string(),
            dtype: dtype.to_string(),
        }
    }
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Failure to build or run a preprocessing pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Step options rejected at construction time.
    #[error("invalid options for step '{step}': {message}")]
    InvalidOptions { step: String, message: String },

    /// A step failed while applying the pipeline; later steps did not run.
    #[error("step '{step}' failed: {source}")]
    Step {
        step: String,
        #[source]
        source: TransformError,
    },
}

impl PipelineError {
    /// Name of the step the error belongs to.
    pub fn step_name(&self) -> &str {
        match self {
            Self::InvalidOptions { step, .. } | Self::Step { step, .. } => step,
        }
    }
}

pub(crate) type Result<T> = std::result::Result<T, TransformError>;

pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}
