//! Model-ready encodings: one-hot indicators and min-max scaling.

use std::collections::BTreeSet;

use polars::prelude::*;
use titanic_model::{Frame, any_to_string};

use crate::error::{Result, TransformError, is_numeric};

/// Replaces each named column with `Int32` 0/1 indicator columns.
///
/// One indicator per distinct non-null value, named `<column>_<value>` and
/// appended in sorted value order. Rows with a null value get 0 everywhere.
pub fn one_hot_encode(frame: &Frame, columns: &[String]) -> Result<Frame> {
    let mut data = frame.data().clone();
    for name in columns {
        let column = data
            .column(name)
            .map_err(|_| TransformError::column_not_found(name))?;
        let labels: Vec<Option<String>> = column
            .as_materialized_series()
            .iter()
            .map(|value| (!value.is_null()).then(|| any_to_string(value)))
            .collect();
        let categories: BTreeSet<&str> = labels.iter().flatten().map(String::as_str).collect();

        data = data.drop(name)?;
        for category in categories {
            let indicator: Vec<i32> = labels
                .iter()
                .map(|label| i32::from(label.as_deref() == Some(category)))
                .collect();
            data.with_column(Series::new(format!("{name}_{category}").into(), indicator))?;
        }
    }
    Ok(frame.with_data(data)?)
}

/// Rescales each named column to `[0, 1]` with the column's own min and max.
///
/// Constant columns become `0.0`; nulls stay null.
pub fn min_max_scale(frame: &Frame, columns: &[String]) -> Result<Frame> {
    let mut data = frame.data().clone();
    for name in columns {
        let column = data
            .column(name)
            .map_err(|_| TransformError::column_not_found(name))?;
        if !is_numeric(column.dtype()) {
            return Err(TransformError::not_numeric(name, column.dtype()));
        }
        let values = column.cast(&DataType::Float64)?;
        let values = values.f64()?;

        let scaled: Vec<Option<f64>> = match (values.min(), values.max()) {
            (Some(min), Some(max)) if max > min => {
                let range = max - min;
                values
                    .into_iter()
                    .map(|v| v.map(|v| (v - min) / range))
                    .collect()
            }
            _ => values.into_iter().map(|v| v.map(|_| 0.0)).collect(),
        };
        data.with_column(Series::new(name.as_str().into(), scaled))?;
    }
    Ok(frame.with_data(data)?)
}
