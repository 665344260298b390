//! Preprocessing pipeline with ordered step execution.
//!
//! Each step implements [`TransformStep`] and is applied in order, every step
//! receiving the table produced by the previous one.
//!
//! # Standard Pipeline Order
//!
//! 1. **set_index** - promote the passenger id to the row key
//! 2. **title_category** - derive the title category from the name
//! 3. **impute_age** - fill missing ages from the title category
//! 4. **family_size** - derive family size (optional)
//! 5. **drop_columns** - prune columns not used downstream
//! 6. **one_hot** - indicator encoding (optional)
//! 7. **scale** - min-max scaling (optional)
//!
//! # Example
//!
//! ```ignore
//! use titanic_transform::build_pipeline;
//!
//! let pipeline = build_pipeline(&params.pipeline)?;
//! let x_train = pipeline.fit_transform(&split.x_train)?;
//! ```

use std::collections::HashSet;
use std::time::Instant;

use titanic_model::{
    DropColumnsOptions, FamilySizeOptions, Frame, ImputeAgeOptions, OneHotOptions,
    PipelineOptions, ScaleOptions, SetIndexOptions, TitleCategoryOptions,
};
use tracing::{debug, debug_span, info};

use crate::error::{PipelineError, TransformError};
use crate::title::TitleExtractor;

/// A single transform bound to its options.
pub trait TransformStep: Send + Sync {
    /// Builds the next table state from `frame`.
    fn apply(&self, frame: &Frame) -> Result<Frame, TransformError>;

    /// Short name used in logs and errors.
    fn step_name(&self) -> &str;

    /// One-line description of what the step is configured to do.
    fn describe(&self) -> String {
        String::new()
    }
}

/// An ordered pipeline of transform steps.
///
/// Holds no state besides its steps, so one pipeline can be applied to any
/// number of tables.
pub struct PreprocessingPipeline {
    steps: Vec<Box<dyn TransformStep>>,
}

impl Default for PreprocessingPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl PreprocessingPipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the end of the pipeline.
    pub fn add_step(mut self, step: Box<dyn TransformStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// List step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.step_name()).collect()
    }

    pub fn steps(&self) -> impl Iterator<Item = &dyn TransformStep> {
        self.steps.iter().map(Box::as_ref)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Applies every step in order to a copy of `input`.
    ///
    /// Stops at the first failing step; `input` is never modified.
    pub fn fit_transform(&self, input: &Frame) -> Result<Frame, PipelineError> {
        let start = Instant::now();
        let mut current = input.clone();
        for step in &self.steps {
            let span = debug_span!("step", name = step.step_name());
            let _guard = span.enter();
            let step_start = Instant::now();
            current = step
                .apply(&current)
                .map_err(|source| PipelineError::Step {
                    step: step.step_name().to_string(),
                    source,
                })?;
            debug!(
                rows = current.height(),
                columns = current.width(),
                duration_ms = step_start.elapsed().as_millis(),
                "step applied"
            );
        }
        info!(
            steps = self.steps.len(),
            rows = current.height(),
            columns = current.width(),
            duration_ms = start.elapsed().as_millis(),
            "pipeline applied"
        );
        Ok(current)
    }
}

// ============================================================================
// Standard Steps
// ============================================================================

/// Promote a column to the row key.
pub struct SetIndexStep {
    options: SetIndexOptions,
}

impl SetIndexStep {
    pub const NAME: &'static str = "set_index";

    pub fn new(options: SetIndexOptions) -> Result<Self, PipelineError> {
        require_name(Self::NAME, "index_column", &options.index_column)?;
        Ok(Self { options })
    }
}

impl TransformStep for SetIndexStep {
    fn apply(&self, frame: &Frame) -> Result<Frame, TransformError> {
        crate::index::set_index(frame, &self.options.index_column)
    }

    fn step_name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> String {
        format!("row key <- {}", self.options.index_column)
    }
}

/// Derive the title category from a name column.
pub struct TitleCategoryStep {
    options: TitleCategoryOptions,
    extractor: TitleExtractor,
}

impl TitleCategoryStep {
    pub const NAME: &'static str = "title_category";

    pub fn new(options: TitleCategoryOptions) -> Result<Self, PipelineError> {
        require_name(Self::NAME, "source_column", &options.source_column)?;
        require_name(Self::NAME, "dest_column", &options.dest_column)?;
        if options.title_codes.keys().any(|token| token.trim().is_empty()) {
            return Err(invalid(Self::NAME, "title_codes contains a blank title"));
        }
        Ok(Self {
            options,
            extractor: TitleExtractor::default(),
        })
    }
}

impl TransformStep for TitleCategoryStep {
    fn apply(&self, frame: &Frame) -> Result<Frame, TransformError> {
        crate::title::derive_title_category(
            frame,
            &self.extractor,
            &self.options.source_column,
            &self.options.dest_column,
            &self.options.title_codes,
        )
    }

    fn step_name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> String {
        format!(
            "{} <- title of {} ({} codes)",
            self.options.dest_column,
            self.options.source_column,
            self.options.title_codes.len()
        )
    }
}

/// Fill missing ages from the title category.
pub struct ImputeAgeStep {
    options: ImputeAgeOptions,
}

impl ImputeAgeStep {
    pub const NAME: &'static str = "impute_age";

    pub fn new(options: ImputeAgeOptions) -> Result<Self, PipelineError> {
        require_name(Self::NAME, "source_column", &options.source_column)?;
        require_name(Self::NAME, "title_column", &options.title_column)?;
        if options.source_column == options.title_column {
            return Err(invalid(
                Self::NAME,
                "source_column and title_column must differ",
            ));
        }
        if options.age_codes.is_empty() && options.fallback.is_none() {
            return Err(invalid(
                Self::NAME,
                "age_codes is empty and no fallback is set",
            ));
        }
        Ok(Self { options })
    }
}

impl TransformStep for ImputeAgeStep {
    fn apply(&self, frame: &Frame) -> Result<Frame, TransformError> {
        crate::impute::impute_by_category(
            frame,
            &self.options.source_column,
            &self.options.title_column,
            &self.options.age_codes,
            self.options.fallback,
        )
    }

    fn step_name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> String {
        let fallback = self
            .options
            .fallback
            .map_or_else(|| "none".to_string(), |v| v.to_string());
        format!(
            "{} by {} ({} codes, fallback {fallback})",
            self.options.source_column,
            self.options.title_column,
            self.options.age_codes.len()
        )
    }
}

/// Derive family size from relative counts.
pub struct FamilySizeStep {
    options: FamilySizeOptions,
}

impl FamilySizeStep {
    pub const NAME: &'static str = "family_size";

    pub fn new(options: FamilySizeOptions) -> Result<Self, PipelineError> {
        require_names(Self::NAME, "source_columns", &options.source_columns)?;
        require_name(Self::NAME, "dest_column", &options.dest_column)?;
        Ok(Self { options })
    }
}

impl TransformStep for FamilySizeStep {
    fn apply(&self, frame: &Frame) -> Result<Frame, TransformError> {
        crate::family::create_family_size(
            frame,
            &self.options.source_columns,
            &self.options.dest_column,
        )
    }

    fn step_name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> String {
        format!(
            "{} <- {} + 1",
            self.options.dest_column,
            self.options.source_columns.join(" + ")
        )
    }
}

/// Remove columns not used downstream.
pub struct DropColumnsStep {
    options: DropColumnsOptions,
}

impl DropColumnsStep {
    pub const NAME: &'static str = "drop_columns";

    pub fn new(options: DropColumnsOptions) -> Result<Self, PipelineError> {
        require_names(Self::NAME, "columns", &options.columns)?;
        Ok(Self { options })
    }
}

impl TransformStep for DropColumnsStep {
    fn apply(&self, frame: &Frame) -> Result<Frame, TransformError> {
        crate::columns::drop_columns(frame, &self.options.columns)
    }

    fn step_name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> String {
        self.options.columns.join(", ")
    }
}

/// Indicator-encode categorical columns.
pub struct OneHotStep {
    options: OneHotOptions,
}

impl OneHotStep {
    pub const NAME: &'static str = "one_hot";

    pub fn new(options: OneHotOptions) -> Result<Self, PipelineError> {
        require_names(Self::NAME, "columns", &options.columns)?;
        Ok(Self { options })
    }
}

impl TransformStep for OneHotStep {
    fn apply(&self, frame: &Frame) -> Result<Frame, TransformError> {
        crate::encode::one_hot_encode(frame, &self.options.columns)
    }

    fn step_name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> String {
        self.options.columns.join(", ")
    }
}

/// Min-max scale numeric columns.
pub struct ScaleStep {
    options: ScaleOptions,
}

impl ScaleStep {
    pub const NAME: &'static str = "scale";

    pub fn new(options: ScaleOptions) -> Result<Self, PipelineError> {
        require_names(Self::NAME, "columns", &options.columns)?;
        Ok(Self { options })
    }
}

impl TransformStep for ScaleStep {
    fn apply(&self, frame: &Frame) -> Result<Frame, TransformError> {
        crate::encode::min_max_scale(frame, &self.options.columns)
    }

    fn step_name(&self) -> &str {
        Self::NAME
    }

    fn describe(&self) -> String {
        self.options.columns.join(", ")
    }
}

// ============================================================================
// Construction
// ============================================================================

/// Validates `options` and wires the standard step order.
pub fn build_pipeline(options: &PipelineOptions) -> Result<PreprocessingPipeline, PipelineError> {
    check_cross_step(options)?;

    let mut pipeline = PreprocessingPipeline::new()
        .add_step(Box::new(SetIndexStep::new(options.set_index.clone())?))
        .add_step(Box::new(TitleCategoryStep::new(
            options.title_category.clone(),
        )?))
        .add_step(Box::new(ImputeAgeStep::new(options.impute_age.clone())?));
    if let Some(family) = &options.family_size {
        pipeline = pipeline.add_step(Box::new(FamilySizeStep::new(family.clone())?));
    }
    pipeline = pipeline.add_step(Box::new(DropColumnsStep::new(
        options.drop_columns.clone(),
    )?));
    if let Some(one_hot) = &options.one_hot {
        pipeline = pipeline.add_step(Box::new(OneHotStep::new(one_hot.clone())?));
    }
    if let Some(scale) = &options.scale {
        pipeline = pipeline.add_step(Box::new(ScaleStep::new(scale.clone())?));
    }

    debug!(steps = ?pipeline.step_names(), "pipeline built");
    Ok(pipeline)
}

/// Rejects options that can only fail once the pipeline runs.
fn check_cross_step(options: &PipelineOptions) -> Result<(), PipelineError> {
    let index = options.set_index.index_column.as_str();
    let refers_to_index = |columns: &[String]| columns.iter().any(|c| c == index);

    if refers_to_index(&options.drop_columns.columns) {
        return Err(invalid(
            DropColumnsStep::NAME,
            format!("'{index}' is the row key and cannot be dropped"),
        ));
    }
    if let Some(one_hot) = &options.one_hot {
        if refers_to_index(&one_hot.columns) {
            return Err(invalid(
                OneHotStep::NAME,
                format!("'{index}' is the row key and cannot be encoded"),
            ));
        }
        let dropped: HashSet<&str> = options
            .drop_columns
            .columns
            .iter()
            .map(String::as_str)
            .collect();
        if let Some(column) = one_hot.columns.iter().find(|c| dropped.contains(c.as_str())) {
            return Err(invalid(
                OneHotStep::NAME,
                format!("'{column}' is removed by drop_columns"),
            ));
        }
    }
    if let Some(scale) = &options.scale {
        if refers_to_index(&scale.columns) {
            return Err(invalid(
                ScaleStep::NAME,
                format!("'{index}' is the row key and cannot be scaled"),
            ));
        }
    }
    Ok(())
}

fn invalid(step: &str, message: impl Into<String>) -> PipelineError {
    PipelineError::InvalidOptions {
        step: step.to_string(),
        message: message.into(),
    }
}

fn require_name(step: &str, field: &str, value: &str) -> Result<(), PipelineError> {
    if value.trim().is_empty() {
        return Err(invalid(step, format!("{field} must not be blank")));
    }
    Ok(())
}

fn require_names(step: &str, field: &str, values: &[String]) -> Result<(), PipelineError> {
    if values.is_empty() {
        return Err(invalid(step, format!("{field} must not be empty")));
    }
    let mut seen = HashSet::with_capacity(values.len());
    for value in values {
        require_name(step, field, value)?;
        if !seen.insert(value.as_str()) {
            return Err(invalid(step, format!("{field} lists '{value}' twice")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rename;

    impl TransformStep for Rename {
        fn apply(&self, frame: &Frame) -> Result<Frame, TransformError> {
            let mut data = frame.data().clone();
            data.rename("a", "b".into())?;
            Ok(frame.with_data(data)?)
        }

        fn step_name(&self) -> &str {
            "rename"
        }
    }

    fn frame() -> Frame {
        use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
        Frame::new(
            DataFrame::new(vec![Series::new("a".into(), vec![1i64, 2]).into_column()]).unwrap(),
        )
    }

    #[test]
    fn empty_pipeline_is_identity() {
        let pipeline = PreprocessingPipeline::new();
        assert!(pipeline.is_empty());
        let out = pipeline.fit_transform(&frame()).unwrap();
        assert_eq!(out.column_names(), vec!["a"]);
    }

    #[test]
    fn input_is_left_untouched() {
        let input = frame();
        let pipeline = PreprocessingPipeline::new().add_step(Box::new(Rename));
        let out = pipeline.fit_transform(&input).unwrap();
        assert_eq!(out.column_names(), vec!["b"]);
        assert_eq!(input.column_names(), vec!["a"]);
    }

    #[test]
    fn failure_names_the_step() {
        let pipeline = PreprocessingPipeline::new()
            .add_step(Box::new(Rename))
            .add_step(Box::new(Rename));
        let err = pipeline.fit_transform(&frame()).unwrap_err();
        assert_eq!(err.step_name(), "rename");
        assert!(matches!(err, PipelineError::Step { .. }));
    }

    #[test]
    fn require_names_rejects_duplicates() {
        let err = require_names("drop_columns", "columns", &["A".to_string(), "A".to_string()])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid options for step 'drop_columns': columns lists 'A' twice"
        );
    }
}
