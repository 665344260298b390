//! Row key promotion.

use std::collections::HashSet;

use titanic_model::{Frame, any_to_string};
use tracing::debug;

use crate::error::{Result, TransformError};

/// Promotes `column` to the frame's row key.
///
/// The column leaves the regular column set. Every value must be present and
/// distinct; any previous row key is discarded.
pub fn set_index(frame: &Frame, column: &str) -> Result<Frame> {
    let key = frame
        .column(column)
        .map_err(|_| TransformError::column_not_found(column))?
        .clone();

    let mut seen = HashSet::with_capacity(key.len());
    for (row, value) in key.as_materialized_series().iter().enumerate() {
        if value.is_null() {
            return Err(TransformError::NullIndexValue {
                column: column.to_string(),
                row,
            });
        }
        let rendered = any_to_string(value);
        if seen.contains(&rendered) {
            return Err(TransformError::DuplicateIndexValue {
                column: column.to_string(),
                value: rendered,
            });
        }
        seen.insert(rendered);
    }

    if let Some(previous) = frame.index_name() {
        debug!(previous, column, "replacing row key");
    }

    let data = frame.data().drop(column)?;
    Ok(Frame::from_parts(data, Some(key))?)
}
