//! Category-conditioned imputation of a numeric column.

use std::collections::BTreeMap;

use polars::prelude::*;
use titanic_model::Frame;

use crate::error::{Result, TransformError, is_numeric};

/// Why a missing value could not be filled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImputeGap {
    /// The row's category cell is itself missing.
    MissingCategory,
    /// The row's category has no configured fill value.
    UnmappedCategory(String),
}

/// Resolves one cell.
///
/// Present values are truncated toward zero. Missing values (null or NaN)
/// take the fill value of `category`, or `fallback` when the category is
/// missing or unmapped.
///
/// ```
/// use std::collections::BTreeMap;
/// use titanic_transform::{ImputeGap, infer_value};
///
/// let codes = BTreeMap::from([("gen_male".to_string(), 30)]);
/// assert_eq!(infer_value(Some(22.9), Some("gen_male"), &codes, None), Ok(22));
/// assert_eq!(infer_value(None, Some("gen_male"), &codes, None), Ok(30));
/// assert_eq!(
///     infer_value(None, Some("Capt"), &codes, None),
///     Err(ImputeGap::UnmappedCategory("Capt".to_string()))
/// );
/// assert_eq!(infer_value(None, Some("Capt"), &codes, Some(28)), Ok(28));
/// ```
pub fn infer_value(
    value: Option<f64>,
    category: Option<&str>,
    fill_values: &BTreeMap<String, i64>,
    fallback: Option<i64>,
) -> std::result::Result<i64, ImputeGap> {
    if let Some(value) = value.filter(|v| !v.is_nan()) {
        return Ok(value.trunc() as i64);
    }
    let Some(category) = category else {
        return fallback.ok_or(ImputeGap::MissingCategory);
    };
    match fill_values.get(category) {
        Some(fill) => Ok(*fill),
        None => fallback.ok_or_else(|| ImputeGap::UnmappedCategory(category.to_string())),
    }
}

/// Fills missing values of `source` from the row's `category_column` and
/// writes the result back to `source` as whole numbers (`Int64`).
pub fn impute_by_category(
    frame: &Frame,
    source: &str,
    category_column: &str,
    fill_values: &BTreeMap<String, i64>,
    fallback: Option<i64>,
) -> Result<Frame> {
    let values = frame
        .column(source)
        .map_err(|_| TransformError::column_not_found(source))?;
    // A column with no values carries no type; every row is a gap to fill.
    let all_missing = values.null_count() == values.len();
    if !is_numeric(values.dtype()) && !all_missing {
        return Err(TransformError::not_numeric(source, values.dtype()));
    }
    let values = values.cast(&DataType::Float64)?;
    let values = values.f64()?;

    let categories = frame
        .column(category_column)
        .map_err(|_| TransformError::column_not_found(category_column))?;
    let categories = categories.str().map_err(|_| TransformError::NotText {
        column: category_column.to_string(),
        dtype: categories.dtype().to_string(),
    })?;

    let mut filled = Vec::with_capacity(values.len());
    for (row, (value, category)) in values.into_iter().zip(categories).enumerate() {
        let resolved =
            infer_value(value, category, fill_values, fallback).map_err(|gap| match gap {
                ImputeGap::MissingCategory => TransformError::MissingValue {
                    column: category_column.to_string(),
                    row,
                },
                ImputeGap::UnmappedCategory(category) => TransformError::UnmappedCategory {
                    column: category_column.to_string(),
                    row,
                    category,
                },
            })?;
        filled.push(resolved);
    }

    let mut data = frame.data().clone();
    data.with_column(Series::new(source.into(), filled))?;
    Ok(frame.with_data(data)?)
}
