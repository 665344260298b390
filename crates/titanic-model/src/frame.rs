//! Row-keyed table type.
//!
//! A [`Frame`] pairs a Polars [`DataFrame`] holding the regular columns with an
//! optional row key column kept outside that column set. Transforms never
//! mutate a frame in place; they build a new one from the parts of the old.

use polars::prelude::{Column, DataFrame, IdxCa, IdxSize, PolarsError, PolarsResult};

use crate::values::any_to_string;

/// A table with named columns and an optional unique row key.
#[derive(Debug, Clone)]
pub struct Frame {
    data: DataFrame,
    index: Option<Column>,
}

impl Frame {
    /// Wraps a DataFrame without a row key.
    pub fn new(data: DataFrame) -> Self {
        Self { data, index: None }
    }

    /// Builds a frame from regular columns and an optional row key.
    ///
    /// The row key must have one entry per row.
    pub fn from_parts(data: DataFrame, index: Option<Column>) -> PolarsResult<Self> {
        if let Some(index) = &index {
            if data.width() > 0 && index.len() != data.height() {
                return Err(PolarsError::ShapeMismatch(
                    format!(
                        "row key '{}' has {} rows but the table has {}",
                        index.name(),
                        index.len(),
                        data.height()
                    )
                    .into(),
                ));
            }
        }
        Ok(Self { data, index })
    }

    /// Regular columns.
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Row key column, if one has been set.
    pub fn index(&self) -> Option<&Column> {
        self.index.as_ref()
    }

    /// Name of the row key column.
    pub fn index_name(&self) -> Option<&str> {
        self.index.as_ref().map(|c| c.name().as_str())
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        match &self.index {
            Some(index) => index.len(),
            None => self.data.height(),
        }
    }

    /// Number of regular columns (the row key is not counted).
    pub fn width(&self) -> usize {
        self.data.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.data.column(name).is_ok()
    }

    pub fn column(&self, name: &str) -> PolarsResult<&Column> {
        self.data.column(name)
    }

    /// Row keys rendered as text, in row order.
    pub fn row_keys(&self) -> Option<Vec<String>> {
        let index = self.index.as_ref()?;
        Some(
            index
                .as_materialized_series()
                .iter()
                .map(any_to_string)
                .collect(),
        )
    }

    /// Replaces the regular columns, keeping the current row key.
    pub fn with_data(&self, data: DataFrame) -> PolarsResult<Self> {
        Self::from_parts(data, self.index.clone())
    }

    /// Selects rows by position, in the order given.
    pub fn take(&self, rows: &[IdxSize]) -> PolarsResult<Self> {
        let indices = IdxCa::from_vec("rows".into(), rows.to_vec());
        let data = self.data.take(&indices)?;
        let index = match &self.index {
            Some(index) => Some(index.take(&indices)?),
            None => None,
        };
        Self::from_parts(data, index)
    }

    /// Flattens the frame into a DataFrame with the row key as first column.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let Some(index) = &self.index else {
            return Ok(self.data.clone());
        };
        let mut columns = Vec::with_capacity(self.data.width() + 1);
        columns.push(index.clone());
        columns.extend(self.data.get_columns().iter().cloned());
        DataFrame::new(columns)
    }
}

impl From<DataFrame> for Frame {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Series::new("PassengerId".into(), vec![3i64, 1, 2]).into_column(),
            Series::new("Sex".into(), vec!["male", "female", "male"]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn new_frame_has_no_row_key() {
        let frame = Frame::new(sample());
        assert!(frame.index().is_none());
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.width(), 2);
        assert!(frame.row_keys().is_none());
    }

    #[test]
    fn from_parts_rejects_mismatched_key() {
        let key = Series::new("id".into(), vec![1i64, 2]).into_column();
        assert!(Frame::from_parts(sample(), Some(key)).is_err());
    }

    #[test]
    fn take_keeps_key_aligned() {
        let data = sample();
        let key = data.column("PassengerId").unwrap().clone();
        let rest = data.drop("PassengerId").unwrap();
        let frame = Frame::from_parts(rest, Some(key)).unwrap();

        let taken = frame.take(&[2, 0]).unwrap();
        assert_eq!(taken.row_keys().unwrap(), vec!["2", "3"]);
        let sex = taken.column("Sex").unwrap().str().unwrap();
        assert_eq!(sex.get(0), Some("male"));
        assert_eq!(sex.get(1), Some("male"));
    }

    #[test]
    fn to_dataframe_puts_key_first() {
        let data = sample();
        let key = data.column("PassengerId").unwrap().clone();
        let frame = Frame::from_parts(data.drop("PassengerId").unwrap(), Some(key)).unwrap();
        let flat = frame.to_dataframe().unwrap();
        let names: Vec<String> = flat
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["PassengerId", "Sex"]);
    }
}
