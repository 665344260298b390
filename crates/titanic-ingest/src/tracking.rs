//! Parameter logging for preprocessing runs.
//!
//! The ingest stage reports its split settings through [`ParamLogger`]. What
//! happens to them is up to the implementation: kept in memory, emitted as
//! tracing events, or written to a run directory by [`RunTracker`].

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// File name of the run record inside a run directory.
pub const RUN_RECORD_FILE: &str = "params.json";

/// Scalar parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Self::Int(v),
            Err(_) => Self::Text(value.to_string()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Sink for named scalar parameters of a tracked run.
pub trait ParamLogger {
    fn log_param(&mut self, name: &str, value: ParamValue);
}

/// Keeps logged parameters in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryParamLogger {
    params: Vec<(String, ParamValue)>,
}

impl MemoryParamLogger {
    pub fn params(&self) -> &[(String, ParamValue)] {
        &self.params
    }

    /// Most recent value logged under `name`.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }
}

impl ParamLogger for MemoryParamLogger {
    fn log_param(&mut self, name: &str, value: ParamValue) {
        self.params.push((name.to_string(), value));
    }
}

/// Emits each parameter as an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingParamLogger;

impl ParamLogger for TracingParamLogger {
    fn log_param(&mut self, name: &str, value: ParamValue) {
        info!(param = name, value = %value, "logged parameter");
    }
}

/// Serialized form of a tracked run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: String,
    pub experiment: String,
    pub started_at: String,
    #[serde(default)]
    pub finished_at: Option<String>,
    /// Why the run stopped, when it failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub params: BTreeMap<String, ParamValue>,
}

/// File-backed run record.
///
/// Each run gets its own directory `<tracking_dir>/<experiment>/<run_id>/`;
/// parameters are buffered and written to `params.json` by [`RunTracker::finish`]
/// or, for a run that stopped early, [`RunTracker::fail`].
#[derive(Debug)]
pub struct RunTracker {
    run_dir: PathBuf,
    record: RunRecord,
}

impl RunTracker {
    /// Creates the run directory and starts a new record.
    pub fn start(tracking_dir: &Path, experiment: &str) -> io::Result<Self> {
        let now = Utc::now();
        let run_id = now.format("%Y%m%dT%H%M%S%.3fZ").to_string();
        let run_dir = tracking_dir.join(experiment).join(&run_id);
        fs::create_dir_all(&run_dir)?;
        debug!(run_id = %run_id, run_dir = %run_dir.display(), "started run");
        Ok(Self {
            run_dir,
            record: RunRecord {
                run_id,
                experiment: experiment.to_string(),
                started_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
                finished_at: None,
                error: None,
                params: BTreeMap::new(),
            },
        })
    }

    pub fn run_id(&self) -> &str {
        &self.record.run_id
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn record(&self) -> &RunRecord {
        &self.record
    }

    /// Stamps the end time and writes the record. Returns the record path.
    pub fn finish(self) -> io::Result<PathBuf> {
        self.write()
    }

    /// Writes the record of a failed run with `message` as its error.
    pub fn fail(mut self, message: impl Into<String>) -> io::Result<PathBuf> {
        self.record.error = Some(message.into());
        self.write()
    }

    fn write(mut self) -> io::Result<PathBuf> {
        self.record.finished_at = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        let json = serde_json::to_string_pretty(&self.record).map_err(io::Error::other)?;
        let path = self.run_dir.join(RUN_RECORD_FILE);
        fs::write(&path, json)?;
        match &self.record.error {
            Some(error) => {
                warn!(run_id = %self.record.run_id, path = %path.display(), error = %error, "wrote failed run record");
            }
            None => info!(run_id = %self.record.run_id, path = %path.display(), "wrote run record"),
        }
        Ok(path)
    }
}

impl ParamLogger for RunTracker {
    fn log_param(&mut self, name: &str, value: ParamValue) {
        debug!(run_id = %self.record.run_id, param = name, value = %value, "logged parameter");
        self.record.params.insert(name.to_string(), value);
    }
}
