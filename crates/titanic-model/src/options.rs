//! Typed options for each preprocessing step.
//!
//! Each struct maps one `[pipeline.<step>]` table of the parameters file.
//! Values are checked when the pipeline is built, not when it runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Options for promoting a column to the row key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetIndexOptions {
    pub index_column: String,
}

/// Options for deriving a title category from a free-text name column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TitleCategoryOptions {
    /// Text column the title is extracted from (e.g. `Name`).
    pub source_column: String,
    /// Column receiving the category code.
    pub dest_column: String,
    /// Raw title token → category code (e.g. `Mr` → `gen_male`).
    /// Tokens missing from this table are kept as-is.
    #[serde(default)]
    pub title_codes: BTreeMap<String, String>,
}

/// Options for filling missing ages from the title category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImputeAgeOptions {
    pub source_column: String,
    /// Category column, normally the title category destination.
    pub title_column: String,
    /// Category code → value used when the source cell is missing.
    pub age_codes: BTreeMap<String, i64>,
    /// Value for categories absent from `age_codes`. When unset, such rows
    /// fail the step.
    #[serde(default)]
    pub fallback: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DropColumnsOptions {
    pub columns: Vec<String>,
}

/// Options for `dest = sum(source_columns) + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilySizeOptions {
    pub source_columns: Vec<String>,
    pub dest_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OneHotOptions {
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleOptions {
    pub columns: Vec<String>,
}

/// Options for the whole preprocessing pipeline, one entry per step.
///
/// The four core steps are required. `family_size`, `one_hot` and `scale`
/// are only wired in when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineOptions {
    pub set_index: SetIndexOptions,
    pub title_category: TitleCategoryOptions,
    pub impute_age: ImputeAgeOptions,
    pub drop_columns: DropColumnsOptions,
    #[serde(default)]
    pub family_size: Option<FamilySizeOptions>,
    #[serde(default)]
    pub one_hot: Option<OneHotOptions>,
    #[serde(default)]
    pub scale: Option<ScaleOptions>,
}
