//! Column pruning.

use std::collections::HashSet;

use titanic_model::Frame;

use crate::error::{Result, TransformError};

/// Removes every named column.
///
/// All names are checked before anything is removed, so a failed call never
/// leaves a partially pruned result. Rows and row keys are untouched.
pub fn drop_columns(frame: &Frame, columns: &[String]) -> Result<Frame> {
    if let Some(missing) = columns.iter().find(|name| !frame.has_column(name)) {
        return Err(TransformError::column_not_found(missing));
    }

    let mut data = frame.data().clone();
    let mut dropped = HashSet::with_capacity(columns.len());
    for name in columns {
        if dropped.insert(name.as_str()) {
            data = data.drop(name)?;
        }
    }
    Ok(frame.with_data(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn frame() -> Frame {
        Frame::new(
            DataFrame::new(vec![
                Series::new("Name".into(), vec!["a", "b"]).into_column(),
                Series::new("Ticket".into(), vec!["A/5 21171", "PC 17599"]).into_column(),
                Series::new("Fare".into(), vec![7.25, 71.2833]).into_column(),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn drops_named_columns() {
        let pruned = drop_columns(&frame(), &["Name".to_string(), "Ticket".to_string()]).unwrap();
        assert_eq!(pruned.column_names(), vec!["Fare"]);
        assert_eq!(pruned.height(), 2);
    }

    #[test]
    fn absent_name_fails_before_dropping() {
        let original = frame();
        let err = drop_columns(&original, &["Name".to_string(), "Cabin".to_string()]).unwrap_err();
        assert!(matches!(err, TransformError::ColumnNotFound { ref column } if column == "Cabin"));
        assert_eq!(original.width(), 3);
    }

    #[test]
    fn repeated_name_is_dropped_once() {
        let pruned = drop_columns(&frame(), &["Name".to_string(), "Name".to_string()]).unwrap();
        assert_eq!(pruned.column_names(), vec!["Ticket", "Fare"]);
    }
}
