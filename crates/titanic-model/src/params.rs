//! Parameters document for a preprocessing run.
//!
//! ```toml
//! target = "Survived"
//! uid = "PassengerId"
//!
//! [paths]
//! train_test_raw = "data/train.csv"
//! holdout_raw = "data/test.csv"
//!
//! [ingest_split]
//! train_size = 0.8
//! test_size = 0.2
//! random_state = 42
//!
//! [pipeline.set_index]
//! index_column = "PassengerId"
//! # ...
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::options::PipelineOptions;

/// Train/test split settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SplitParameters {
    /// Fraction of rows assigned to the train partition.
    pub train_size: f64,
    /// Fraction of rows assigned to the test partition.
    pub test_size: f64,
    /// Seed for the row shuffle.
    pub random_state: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataPaths {
    /// Labelled dataset that is split into train and test.
    pub train_test_raw: PathBuf,
    /// Unlabelled dataset passed through as holdout.
    pub holdout_raw: PathBuf,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Where run records are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackingOptions {
    pub dir: PathBuf,
    #[serde(default = "default_experiment")]
    pub experiment: String,
}

fn default_experiment() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Parameters {
    /// Target column of the labelled dataset.
    pub target: String,
    /// Row identifier column, used to order exported tables.
    #[serde(default)]
    pub uid: Option<String>,
    pub paths: DataPaths,
    #[serde(default)]
    pub tracking: Option<TrackingOptions>,
    pub ingest_split: SplitParameters,
    pub pipeline: PipelineOptions,
}

impl Parameters {
    /// Load parameters from a TOML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl FromStr for Parameters {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}
