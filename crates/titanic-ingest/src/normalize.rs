//! Numeric type normalization.

use polars::prelude::{Column, DataFrame, DataType};
use tracing::debug;

use crate::error::Result;

/// Casts every integer column of `df` to `Float64`.
///
/// A column with no values at all (every cell blank) is also cast to
/// `Float64`, since the reader cannot tell it apart from text and it is
/// treated as an all-missing numeric column downstream.
///
/// The decision is made per column from that column's own dtype, so each
/// table passed in is normalized independently of any other table.
pub fn normalize_integer_columns(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    let mut converted = Vec::new();
    let mut all_missing = Vec::new();
    for column in df.get_columns() {
        if column.dtype().is_integer() {
            out.with_column(column.cast(&DataType::Float64)?)?;
            converted.push(column.name().to_string());
        } else if is_all_missing(column) {
            out.with_column(column.cast(&DataType::Float64)?)?;
            all_missing.push(column.name().to_string());
        }
    }
    if !converted.is_empty() {
        debug!(columns = ?converted, "cast integer columns to Float64");
    }
    if !all_missing.is_empty() {
        debug!(columns = ?all_missing, "cast all-missing columns to Float64");
    }
    Ok(out)
}

fn is_all_missing(column: &Column) -> bool {
    match column.dtype() {
        DataType::Null => true,
        DataType::String => !column.is_empty() && column.null_count() == column.len(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn casts_only_integer_columns() {
        let df = DataFrame::new(vec![
            Series::new("Pclass".into(), vec![3i64, 1, 3]).into_column(),
            Series::new("Fare".into(), vec![7.25f64, 71.2833, 7.925]).into_column(),
            Series::new("Sex".into(), vec!["male", "female", "female"]).into_column(),
        ])
        .unwrap();

        let out = normalize_integer_columns(&df).unwrap();

        assert_eq!(out.column("Pclass").unwrap().dtype(), &DataType::Float64);
        assert_eq!(out.column("Fare").unwrap().dtype(), &DataType::Float64);
        assert_eq!(out.column("Sex").unwrap().dtype(), &DataType::String);
        let pclass = out.column("Pclass").unwrap().f64().unwrap();
        assert_eq!(pclass.get(1), Some(1.0));
        // input untouched
        assert_eq!(df.column("Pclass").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn keeps_nulls_when_casting() {
        let df = DataFrame::new(vec![
            Series::new("SibSp".into(), vec![Some(1i32), None, Some(0)]).into_column(),
        ])
        .unwrap();
        let out = normalize_integer_columns(&df).unwrap();
        let sibsp = out.column("SibSp").unwrap().f64().unwrap();
        assert_eq!(sibsp.get(0), Some(1.0));
        assert_eq!(sibsp.get(1), None);
    }

    #[test]
    fn casts_all_missing_columns() {
        let df = DataFrame::new(vec![
            Series::new("Age".into(), vec![None::<&str>, None]).into_column(),
            Series::new("Cabin".into(), vec![Some("C85"), None]).into_column(),
            Series::full_null("Fare".into(), 2, &DataType::Null).into_column(),
        ])
        .unwrap();

        let out = normalize_integer_columns(&df).unwrap();

        let age = out.column("Age").unwrap();
        assert_eq!(age.dtype(), &DataType::Float64);
        assert_eq!(age.null_count(), 2);
        assert_eq!(out.column("Fare").unwrap().dtype(), &DataType::Float64);
        assert_eq!(out.column("Cabin").unwrap().dtype(), &DataType::String);
    }
}
