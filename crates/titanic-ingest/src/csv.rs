//! CSV file reading.

use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

fn check_readable(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    if !metadata.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Validate DataFrame shape after loading.
///
/// Rejects tables without data rows and headers with blank column names.
pub fn validate_dataframe_shape(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() == 0 {
        return Err(IngestError::EmptyDataFrame {
            path: path.to_path_buf(),
        });
    }

    for name in df.get_column_names() {
        if name.trim().is_empty() {
            return Err(IngestError::EmptyColumnName {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}

/// Reads a delimited file with a single header row into a DataFrame.
///
/// Column types are inferred from every row, so a decimal that first shows up
/// deep in the file still makes its column a float.
pub fn read_csv_table(path: &Path) -> Result<DataFrame> {
    check_readable(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    validate_dataframe_shape(&df, path)?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded csv"
    );

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_table() {
        let file = create_temp_csv("PassengerId,Age,Name\n1,22,\"Braund, Mr. Owen Harris\"\n2,,\"Heikkinen, Miss. Laina\"\n");
        let df = read_csv_table(file.path()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        let names = df.column("Name").unwrap().str().unwrap();
        assert_eq!(names.get(0), Some("Braund, Mr. Owen Harris"));
        assert_eq!(df.column("Age").unwrap().null_count(), 1);
    }

    #[test]
    fn test_read_csv_table_late_decimal() {
        let mut content = String::from("PassengerId,Age\n");
        for id in 1..=100 {
            content.push_str(&format!("{id},{}\n", 20 + id % 30));
        }
        content.push_str("101,34.5\n");
        let file = create_temp_csv(&content);

        let df = read_csv_table(file.path()).unwrap();

        assert_eq!(df.height(), 101);
        let age = df.column("Age").unwrap();
        assert_eq!(age.dtype(), &DataType::Float64);
        assert_eq!(age.f64().unwrap().get(100), Some(34.5));
        assert_eq!(age.f64().unwrap().get(0), Some(21.0));
    }

    #[test]
    fn test_read_csv_table_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_csv_table(&dir.path().join("nope.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_csv_table_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_csv_table(dir.path());
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_csv_table_header_only() {
        let file = create_temp_csv("PassengerId,Age\n");
        let result = read_csv_table(file.path());
        assert!(matches!(
            result,
            Err(IngestError::EmptyDataFrame { .. } | IngestError::CsvParse { .. })
        ));
    }
}
