//! CSV export of processed partitions.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;
use titanic_model::Frame;
use tracing::debug;

/// File stem of each exported partition, in export order.
pub const PARTITIONS: [&str; 5] = ["x_train", "x_test", "y_train", "y_test", "x_holdout"];

pub fn partition_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.csv"))
}

/// Writes `frame` as CSV with the row key as first column.
///
/// When `sort_by` names a column of the flattened table, rows are written in
/// ascending order of that column.
pub fn write_frame_csv(frame: &Frame, path: &Path, sort_by: Option<&str>) -> Result<()> {
    let mut df = frame.to_dataframe().context("flatten row key")?;
    if let Some(uid) = sort_by.filter(|uid| df.column(uid).is_ok()) {
        df = df
            .lazy()
            .sort([uid], SortMultipleOptions::default())
            .collect()
            .with_context(|| format!("sort by {uid}"))?;
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output directory {}", parent.display()))?;
    }
    let file =
        File::create(path).with_context(|| format!("create CSV file {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("write CSV file {}", path.display()))?;
    debug!(path = %path.display(), rows = df.height(), columns = df.width(), "wrote partition");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_row_key_first_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let data = DataFrame::new(vec![
            Series::new("Fare".into(), vec![8.05, 7.25]).into_column(),
        ])
        .unwrap();
        let key = Series::new("PassengerId".into(), vec![5i64, 1]).into_column();
        let frame = Frame::from_parts(data, Some(key)).unwrap();
        let path = partition_path(dir.path(), "x_train");

        write_frame_csv(&frame, &path, Some("PassengerId")).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines, vec!["PassengerId,Fare", "1,7.25", "5,8.05"]);
    }
}
