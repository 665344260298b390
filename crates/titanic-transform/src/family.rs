//! Family size derivation.

use polars::prelude::*;
use titanic_model::Frame;

use crate::error::{Result, TransformError, is_numeric};

/// Family size of one passenger: relative counts plus the passenger.
///
/// ```
/// assert_eq!(titanic_transform::family_size(&[1.0, 2.0]), 4.0);
/// assert_eq!(titanic_transform::family_size(&[]), 1.0);
/// ```
pub fn family_size(counts: &[f64]) -> f64 {
    counts.iter().sum::<f64>() + 1.0
}

/// Writes [`family_size`] of the `sources` columns into `dest` (`Float64`).
pub fn create_family_size(frame: &Frame, sources: &[String], dest: &str) -> Result<Frame> {
    let mut casts = Vec::with_capacity(sources.len());
    for name in sources {
        let column = frame
            .column(name)
            .map_err(|_| TransformError::column_not_found(name))?;
        if !is_numeric(column.dtype()) {
            return Err(TransformError::not_numeric(name, column.dtype()));
        }
        casts.push((name.as_str(), column.cast(&DataType::Float64)?));
    }
    let counts = casts
        .iter()
        .map(|(name, column)| Ok((*name, column.f64()?)))
        .collect::<PolarsResult<Vec<_>>>()?;

    let mut sizes = Vec::with_capacity(frame.height());
    let mut row_counts = Vec::with_capacity(counts.len());
    for row in 0..frame.height() {
        row_counts.clear();
        for (name, values) in &counts {
            let Some(count) = values.get(row) else {
                return Err(TransformError::MissingValue {
                    column: (*name).to_string(),
                    row,
                });
            };
            row_counts.push(count);
        }
        sizes.push(family_size(&row_counts));
    }

    let mut data = frame.data().clone();
    data.with_column(Series::new(dest.into(), sizes))?;
    Ok(frame.with_data(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources() -> Vec<String> {
        vec!["SibSp".to_string(), "Parch".to_string()]
    }

    #[test]
    fn sums_counts_plus_one() {
        let frame = Frame::new(
            DataFrame::new(vec![
                Series::new("SibSp".into(), vec![1i64, 0, 3]).into_column(),
                Series::new("Parch".into(), vec![0.0, 0.0, 2.0]).into_column(),
            ])
            .unwrap(),
        );
        let out = create_family_size(&frame, &sources(), "FamilySize").unwrap();
        let sizes: Vec<Option<f64>> = out
            .column("FamilySize")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(sizes, vec![Some(2.0), Some(1.0), Some(6.0)]);
    }

    #[test]
    fn null_count_is_reported() {
        let frame = Frame::new(
            DataFrame::new(vec![
                Series::new("SibSp".into(), vec![Some(1.0), Some(0.0)]).into_column(),
                Series::new("Parch".into(), vec![Some(0.0), None]).into_column(),
            ])
            .unwrap(),
        );
        let err = create_family_size(&frame, &sources(), "FamilySize").unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingValue { ref column, row: 1 } if column == "Parch"
        ));
    }

    #[test]
    fn text_count_is_rejected() {
        let frame = Frame::new(
            DataFrame::new(vec![
                Series::new("SibSp".into(), vec!["1"]).into_column(),
                Series::new("Parch".into(), vec![0.0]).into_column(),
            ])
            .unwrap(),
        );
        let err = create_family_size(&frame, &sources(), "FamilySize").unwrap_err();
        assert!(matches!(err, TransformError::NotNumeric { .. }));
    }
}
