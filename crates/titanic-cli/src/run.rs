//! A preprocessing run: ingest and split, transform each partition, export.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use titanic_ingest::{ParamLogger, RunTracker, TracingParamLogger, ingest_split};
use titanic_model::{Frame, Parameters};
use titanic_transform::{PreprocessingPipeline, build_pipeline};
use tracing::{info, info_span, warn};

use crate::export::{PARTITIONS, partition_path, write_frame_csv};

/// Model-ready partitions of one run.
///
/// Target tables carry the row key of their feature table.
#[derive(Debug, Clone)]
pub struct Processed {
    pub x_train: Frame,
    pub x_test: Frame,
    pub y_train: Frame,
    pub y_test: Frame,
    pub x_holdout: Frame,
}

impl Processed {
    /// Partitions paired with their export names, in [`PARTITIONS`] order.
    pub fn named(&self) -> [(&'static str, &Frame); 5] {
        [
            (PARTITIONS[0], &self.x_train),
            (PARTITIONS[1], &self.x_test),
            (PARTITIONS[2], &self.y_train),
            (PARTITIONS[3], &self.y_test),
            (PARTITIONS[4], &self.x_holdout),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct PartitionSummary {
    pub name: &'static str,
    pub rows: usize,
    pub columns: usize,
    /// Written file, `None` on a dry run.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub steps: Vec<String>,
    pub partitions: Vec<PartitionSummary>,
    pub output_dir: Option<PathBuf>,
    pub run_record: Option<PathBuf>,
    pub dry_run: bool,
}

/// Builds the pipeline from `params`.
pub fn pipeline_from(params: &Parameters) -> Result<PreprocessingPipeline> {
    build_pipeline(&params.pipeline).context("build preprocessing pipeline")
}

/// Ingests, splits and transforms the datasets named in `params`.
///
/// The same pipeline is applied to the train, test and holdout features.
pub fn preprocess(
    params: &Parameters,
    pipeline: &PreprocessingPipeline,
    logger: &mut dyn ParamLogger,
) -> Result<Processed> {
    let split = ingest_split(
        &params.paths.train_test_raw,
        &params.paths.holdout_raw,
        &params.target,
        &params.ingest_split,
        logger,
    )
    .context("ingest and split datasets")?;

    let x_train = pipeline
        .fit_transform(&split.x_train)
        .context("transform train partition")?;
    let x_test = pipeline
        .fit_transform(&split.x_test)
        .context("transform test partition")?;
    let x_holdout = pipeline
        .fit_transform(&split.x_holdout)
        .context("transform holdout partition")?;

    let y_train = with_row_key(&split.y_train, &x_train)?;
    let y_test = with_row_key(&split.y_test, &x_test)?;

    Ok(Processed {
        x_train,
        x_test,
        y_train,
        y_test,
        x_holdout,
    })
}

fn with_row_key(target: &Frame, features: &Frame) -> Result<Frame> {
    Frame::from_parts(target.data().clone(), features.index().cloned())
        .context("align target rows with feature row keys")
}

/// Runs the whole preprocessing job.
///
/// Unless `dry_run`, partitions are written to `paths.output_dir` and, when
/// tracking is configured, a run record is written as well. A run that fails
/// after tracking started still writes its record, with the error.
pub fn run_preprocessing(params: &Parameters, dry_run: bool) -> Result<RunReport> {
    let span = info_span!("run", target_column = %params.target, dry_run);
    let _guard = span.enter();
    let start = Instant::now();

    let output_dir = if dry_run {
        None
    } else {
        match &params.paths.output_dir {
            Some(dir) => Some(dir.clone()),
            None => bail!("no output directory configured (set paths.output_dir or pass --output-dir)"),
        }
    };

    let pipeline = pipeline_from(params)?;
    let mut tracker = match &params.tracking {
        Some(tracking) if !dry_run => Some(
            RunTracker::start(&tracking.dir, &tracking.experiment).with_context(|| {
                format!("start run under {}", tracking.dir.display())
            })?,
        ),
        _ => None,
    };
    let outcome = match tracker.as_mut() {
        Some(tracker) => produce(params, &pipeline, tracker, output_dir.as_deref()),
        None => produce(params, &pipeline, &mut TracingParamLogger, output_dir.as_deref()),
    };
    let partitions = match outcome {
        Ok(partitions) => partitions,
        Err(err) => {
            if let Some(Err(write_err)) = tracker.map(|t| t.fail(format!("{err:#}"))) {
                warn!(error = %write_err, "failed to write run record");
            }
            return Err(err);
        }
    };

    let run_record = tracker
        .map(RunTracker::finish)
        .transpose()
        .context("write run record")?;

    info!(
        partitions = partitions.len(),
        duration_ms = start.elapsed().as_millis(),
        "run complete"
    );
    Ok(RunReport {
        steps: pipeline.step_names().into_iter().map(String::from).collect(),
        partitions,
        output_dir,
        run_record,
        dry_run,
    })
}

/// Preprocesses and, when `output_dir` is set, writes every partition.
fn produce(
    params: &Parameters,
    pipeline: &PreprocessingPipeline,
    logger: &mut dyn ParamLogger,
    output_dir: Option<&Path>,
) -> Result<Vec<PartitionSummary>> {
    let processed = preprocess(params, pipeline, logger)?;

    let mut partitions = Vec::with_capacity(PARTITIONS.len());
    for (name, frame) in processed.named() {
        let path = match output_dir {
            Some(dir) => {
                let path = partition_path(dir, name);
                write_frame_csv(frame, &path, params.uid.as_deref())?;
                Some(path)
            }
            None => None,
        };
        partitions.push(PartitionSummary {
            name,
            rows: frame.height(),
            columns: frame.width(),
            path,
        });
    }
    Ok(partitions)
}

/// Plain-text step listing, one numbered line per step.
pub fn render_step_listing(pipeline: &PreprocessingPipeline) -> String {
    pipeline
        .steps()
        .enumerate()
        .map(|(position, step)| {
            format!("{}. {}: {}", position + 1, step.step_name(), step.describe())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
