//! Shared model types for the Titanic preprocessing workspace.
//!
//! - **frame**: [`Frame`], a Polars DataFrame with an optional row key column
//! - **options**: typed, per-step pipeline options
//! - **params**: the TOML parameters document driving a run
//! - **values**: Polars `AnyValue` conversion helpers

pub mod error;
pub mod frame;
pub mod options;
pub mod params;
pub mod values;

pub use error::{ConfigError, Result};
pub use frame::Frame;
pub use options::{
    DropColumnsOptions, FamilySizeOptions, ImputeAgeOptions, OneHotOptions, PipelineOptions,
    ScaleOptions, SetIndexOptions, TitleCategoryOptions,
};
pub use params::{DataPaths, Parameters, SplitParameters, TrackingOptions};
pub use values::{any_to_string, format_numeric};
