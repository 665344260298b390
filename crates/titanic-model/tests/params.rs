//! Tests for parameter loading.

use std::fs;
use std::path::Path;

use titanic_model::{ConfigError, Parameters};

const PARAMS: &str = r#"
target = "Survived"
uid = "PassengerId"

[paths]
train_test_raw = "data/train.csv"
holdout_raw = "data/test.csv"

[ingest_split]
train_size = 0.8
test_size = 0.2
random_state = 42

[pipeline.set_index]
index_column = "PassengerId"

[pipeline.title_category]
source_column = "Name"
dest_column = "TitleCategory"
title_codes = { Mr = "gen_male", Mrs = "gen_female" }

[pipeline.impute_age]
source_column = "Age"
title_column = "TitleCategory"
age_codes = { gen_male = 30, gen_female = 35 }
fallback = 28

[pipeline.drop_columns]
columns = ["Name", "Ticket"]
"#;

#[test]
fn parses_core_parameters() {
    let params: Parameters = PARAMS.parse().expect("parse parameters");

    assert_eq!(params.target, "Survived");
    assert_eq!(params.uid.as_deref(), Some("PassengerId"));
    assert_eq!(params.ingest_split.train_size, 0.8);
    assert_eq!(params.ingest_split.test_size, 0.2);
    assert_eq!(params.ingest_split.random_state, 42);
    assert_eq!(params.pipeline.set_index.index_column, "PassengerId");
    assert_eq!(
        params.pipeline.title_category.title_codes.get("Mr").map(String::as_str),
        Some("gen_male")
    );
    assert_eq!(params.pipeline.impute_age.age_codes.get("gen_female"), Some(&35));
    assert_eq!(params.pipeline.impute_age.fallback, Some(28));
    assert_eq!(params.pipeline.drop_columns.columns, vec!["Name", "Ticket"]);
    assert!(params.pipeline.family_size.is_none());
    assert!(params.pipeline.one_hot.is_none());
    assert!(params.tracking.is_none());
    assert!(params.paths.output_dir.is_none());
}

#[test]
fn rejects_unknown_step_keys() {
    let text = PARAMS.replace("index_column = ", "index_col = ");
    let result: Result<Parameters, _> = text.parse();
    assert!(matches!(result, Err(ConfigError::Toml(_))));
}

#[test]
fn rejects_missing_required_step() {
    let text = PARAMS.replace("[pipeline.drop_columns]\ncolumns = [\"Name\", \"Ticket\"]\n", "");
    let result: Result<Parameters, _> = text.parse();
    assert!(result.is_err());
}

#[test]
fn tracking_experiment_defaults() {
    let text = format!("{PARAMS}\n[tracking]\ndir = \"runs\"\n");
    let params: Parameters = text.parse().expect("parse parameters");
    let tracking = params.tracking.expect("tracking");
    assert_eq!(tracking.dir, Path::new("runs"));
    assert_eq!(tracking.experiment, "default");
}

#[test]
fn from_path_reports_missing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let missing = dir.path().join("absent.toml");
    let err = Parameters::from_path(&missing).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn from_path_reports_parse_errors_with_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "target = \n").expect("write file");
    let err = Parameters::from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn shipped_parameters_file_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/parameters.toml");
    let params = Parameters::from_path(&path).expect("load shipped parameters");
    assert!(params.pipeline.family_size.is_some());
    assert_eq!(
        params.pipeline.one_hot.expect("one_hot").columns,
        vec!["Pclass", "Sex", "Embarked", "TitleCategory"]
    );
}
