use std::path::Path;

use anyhow::{Context, Result};
use titanic_cli::run::{RunReport, pipeline_from, render_step_listing, run_preprocessing};
use titanic_model::{Parameters, TrackingOptions};
use tracing::debug;

use crate::cli::{RunArgs, StepsArgs};

pub fn run_pipeline(args: &RunArgs) -> Result<RunReport> {
    let mut params = load_parameters(&args.params)?;
    apply_overrides(&mut params, args);
    run_preprocessing(&params, args.dry_run)
}

/// Prints the configured steps in execution order, one numbered line each.
pub fn list_steps(args: &StepsArgs) -> Result<()> {
    let params = load_parameters(&args.params)?;
    let pipeline = pipeline_from(&params)?;
    println!("{}", render_step_listing(&pipeline));
    Ok(())
}

fn load_parameters(path: &Path) -> Result<Parameters> {
    Parameters::from_path(path)
        .with_context(|| format!("load parameters from {}", path.display()))
}

/// Command-line paths take precedence over the parameters file.
fn apply_overrides(params: &mut Parameters, args: &RunArgs) {
    if let Some(train) = &args.train {
        params.paths.train_test_raw = train.clone();
    }
    if let Some(holdout) = &args.holdout {
        params.paths.holdout_raw = holdout.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        params.paths.output_dir = Some(output_dir.clone());
    }
    if let Some(dir) = &args.tracking_dir {
        match &mut params.tracking {
            Some(tracking) => tracking.dir = dir.clone(),
            None => {
                params.tracking = Some(TrackingOptions {
                    dir: dir.clone(),
                    experiment: "default".to_string(),
                });
            }
        }
    }
    debug!(
        train = %params.paths.train_test_raw.display(),
        holdout = %params.paths.holdout_raw.display(),
        "resolved dataset paths"
    );
}
