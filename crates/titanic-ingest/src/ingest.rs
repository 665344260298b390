//! Ingest/split stage.

use std::path::Path;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{info, info_span};

use titanic_model::{Frame, SplitParameters};

use crate::csv::read_csv_table;
use crate::error::{IngestError, Result};
use crate::normalize::normalize_integer_columns;
use crate::split::split_train_test;
use crate::tracking::ParamLogger;

/// Output of [`ingest_split`].
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub x_train: Frame,
    pub x_test: Frame,
    pub y_train: Frame,
    pub y_test: Frame,
    /// Unlabelled rows, features only.
    pub x_holdout: Frame,
}

/// Splits `df` into `(features, target)`, where target is the single
/// `target` column.
pub fn separate_target(df: &DataFrame, target: &str, path: &Path) -> Result<(DataFrame, DataFrame)> {
    if df.column(target).is_err() {
        return Err(IngestError::MissingTarget {
            column: target.to_string(),
            path: path.to_path_buf(),
        });
    }
    let labels = df.select([target])?;
    let features = df.drop(target)?;
    Ok((features, labels))
}

/// Loads the labelled and holdout datasets and splits the labelled one into
/// train and test partitions.
///
/// The split settings are reported to `logger` before any file is read.
pub fn ingest_split(
    train_test_path: &Path,
    holdout_path: &Path,
    target: &str,
    params: &SplitParameters,
    logger: &mut dyn ParamLogger,
) -> Result<SplitResult> {
    let span = info_span!("ingest_split", target_column = %target);
    let _guard = span.enter();
    let start = Instant::now();

    logger.log_param("train_size", params.train_size.into());
    logger.log_param("test_size", params.test_size.into());
    logger.log_param("random_state", params.random_state.into());

    let primary = normalize_integer_columns(&read_csv_table(train_test_path)?)?;
    let holdout = normalize_integer_columns(&read_csv_table(holdout_path)?)?;

    let (features, labels) = separate_target(&primary, target, train_test_path)?;
    let (x_train, x_test, y_train, y_test) =
        split_train_test(&Frame::new(features), &Frame::new(labels), params)?;

    info!(
        source_rows = primary.height(),
        train_rows = x_train.height(),
        test_rows = x_test.height(),
        holdout_rows = holdout.height(),
        feature_columns = x_train.width(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );

    Ok(SplitResult {
        x_train,
        x_test,
        y_train,
        y_test,
        x_holdout: Frame::new(holdout),
    })
}
