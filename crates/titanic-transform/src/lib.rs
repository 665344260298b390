//! Feature-engineering transforms for the Titanic preprocessing pipeline.
//!
//! This crate provides:
//!
//! - **index**: promote a column to the unique row key
//! - **columns**: column pruning
//! - **title**: honorific extraction and title category coding
//! - **impute**: category-conditioned fill of missing numeric values
//! - **family**: family size derivation
//! - **encode**: one-hot encoding and min-max scaling
//! - **pipeline**: ordered composition of the above into a single
//!   fit-and-apply unit
//!
//! Every transform takes a [`Frame`](titanic_model::Frame) by reference and
//! returns a new one, or a [`TransformError`] naming the column and row that
//! violated its precondition.

pub mod columns;
pub mod encode;
pub mod error;
pub mod family;
pub mod impute;
pub mod index;
pub mod pipeline;
pub mod title;

pub use columns::drop_columns;
pub use encode::{min_max_scale, one_hot_encode};
pub use error::{PipelineError, TransformError};
pub use family::{create_family_size, family_size};
pub use impute::{ImputeGap, impute_by_category, infer_value};
pub use index::set_index;
pub use pipeline::{PreprocessingPipeline, TransformStep, build_pipeline};
pub use title::{TITLE_PATTERN, TitleExtractor, derive_title_category, map_title};
