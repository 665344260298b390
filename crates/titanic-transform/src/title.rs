//! Honorific extraction and title category coding.
//!
//! Passenger names look like `"Braund, Mr. Owen Harris"`. The honorific is the
//! first run of ASCII letters preceded by a space and followed by a period.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use polars::prelude::*;
use regex::Regex;
use titanic_model::Frame;

use crate::error::{Result, TransformError};

/// Pattern matching the honorific token in a passenger name.
pub const TITLE_PATTERN: &str = r" ([A-Za-z]+)\.";

static TITLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TITLE_PATTERN).expect("Invalid title regex"));

/// Compiled honorific matcher.
#[derive(Debug, Clone)]
pub struct TitleExtractor {
    pattern: Regex,
}

impl Default for TitleExtractor {
    fn default() -> Self {
        Self {
            pattern: TITLE_REGEX.clone(),
        }
    }
}

impl TitleExtractor {
    /// Returns the honorific in `text`, or `""` when there is none.
    ///
    /// ```
    /// use titanic_transform::TitleExtractor;
    ///
    /// let extractor = TitleExtractor::default();
    /// assert_eq!(extractor.extract("Braund, Mr. Owen Harris"), "Mr");
    /// assert_eq!(extractor.extract("Nobody"), "");
    /// ```
    pub fn extract<'a>(&self, text: &'a str) -> &'a str {
        self.pattern
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map_or("", |token| token.as_str())
    }
}

/// Maps a title token through `codes`; unknown tokens pass through unchanged.
pub fn map_title(token: &str, codes: &BTreeMap<String, String>) -> String {
    codes
        .get(token)
        .cloned()
        .unwrap_or_else(|| token.to_string())
}

/// Writes the coded title of each row's `source` text into `dest`.
///
/// `dest` is created or replaced as a string column.
pub fn derive_title_category(
    frame: &Frame,
    extractor: &TitleExtractor,
    source: &str,
    dest: &str,
    codes: &BTreeMap<String, String>,
) -> Result<Frame> {
    let column = frame
        .column(source)
        .map_err(|_| TransformError::column_not_found(source))?;
    let names = column.str().map_err(|_| TransformError::NotText {
        column: source.to_string(),
        dtype: column.dtype().to_string(),
    })?;

    let mut categories = Vec::with_capacity(names.len());
    for (row, name) in names.into_iter().enumerate() {
        let Some(name) = name else {
            return Err(TransformError::MissingValue {
                column: source.to_string(),
                row,
            });
        };
        categories.push(map_title(extractor.extract(name), codes));
    }

    let mut data = frame.data().clone();
    data.with_column(Series::new(dest.into(), categories))?;
    Ok(frame.with_data(data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("Mr".to_string(), "gen_male".to_string()),
            ("Mrs".to_string(), "gen_female".to_string()),
        ])
    }

    #[test]
    fn extracts_first_honorific() {
        let extractor = TitleExtractor::default();
        assert_eq!(
            extractor.extract("Cumings, Mrs. John Bradley (Florence Briggs Thayer)"),
            "Mrs"
        );
        assert_eq!(extractor.extract("Rothes, the Countess. of (Lucy)"), "Countess");
        assert_eq!(extractor.extract("Mr. Leading"), "");
        assert_eq!(extractor.extract(""), "");
    }

    #[test]
    fn unknown_title_passes_through() {
        assert_eq!(map_title("Mr", &codes()), "gen_male");
        assert_eq!(map_title("Capt", &codes()), "Capt");
        assert_eq!(map_title("", &codes()), "");
    }

    #[test]
    fn derives_category_column() {
        let frame = Frame::new(
            DataFrame::new(vec![
                Series::new(
                    "Name".into(),
                    vec!["Braund, Mr. Owen Harris", "Heikkinen, Miss. Laina"],
                )
                .into_column(),
            ])
            .unwrap(),
        );
        let out =
            derive_title_category(&frame, &TitleExtractor::default(), "Name", "Title", &codes())
                .unwrap();
        let titles = out.column("Title").unwrap().str().unwrap();
        assert_eq!(titles.get(0), Some("gen_male"));
        assert_eq!(titles.get(1), Some("Miss"));
        assert!(out.has_column("Name"));
    }

    #[test]
    fn numeric_source_is_rejected() {
        let frame = Frame::new(
            DataFrame::new(vec![Series::new("Name".into(), vec![1i64]).into_column()]).unwrap(),
        );
        let err =
            derive_title_category(&frame, &TitleExtractor::default(), "Name", "Title", &codes())
                .unwrap_err();
        assert!(matches!(err, TransformError::NotText { .. }));
    }

    #[test]
    fn null_name_is_reported() {
        let frame = Frame::new(
            DataFrame::new(vec![
                Series::new("Name".into(), vec![Some("Braund, Mr. Owen"), None]).into_column(),
            ])
            .unwrap(),
        );
        let err =
            derive_title_category(&frame, &TitleExtractor::default(), "Name", "Title", &codes())
                .unwrap_err();
        assert!(matches!(err, TransformError::MissingValue { row: 1, .. }));
    }
}
