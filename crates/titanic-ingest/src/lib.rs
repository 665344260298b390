//! Data ingestion for the Titanic preprocessing pipeline.
//!
//! - **CSV Loading**: read the labelled and holdout datasets into Polars
//! - **Normalization**: cast integer columns to `Float64`, per table
//! - **Splitting**: seeded, sklearn-style shuffle split into train and test
//! - **Tracking**: parameter loggers that record the split settings
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use titanic_ingest::{MemoryParamLogger, ingest_split};
//! use titanic_model::SplitParameters;
//!
//! let params = SplitParameters { train_size: 0.8, test_size: 0.2, random_state: 42 };
//! let mut logger = MemoryParamLogger::default();
//! let split = ingest_split(
//!     Path::new("data/train.csv"),
//!     Path::new("data/test.csv"),
//!     "Survived",
//!     &params,
//!     &mut logger,
//! )?;
//! ```

mod csv;
mod error;
mod ingest;
mod normalize;
mod split;
mod tracking;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use csv::{read_csv_table, validate_dataframe_shape};

// === Ingest/Split ===
pub use ingest::{SplitResult, ingest_split, separate_target};
pub use normalize::normalize_integer_columns;
pub use split::{SplitIndices, shuffle_split_indices, split_train_test};

// === Parameter Logging ===
pub use tracking::{
    MemoryParamLogger, ParamLogger, ParamValue, RunRecord, RunTracker, TracingParamLogger,
};
