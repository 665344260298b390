//! CLI argument definitions for the preprocessing runner.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "titanic-prep",
    version,
    about = "Titanic preprocessing - split and transform passenger data for modelling",
    long_about = "Split the labelled Titanic passenger data into train and test partitions,\n\
                  apply the configured feature pipeline to every partition and the holdout,\n\
                  and write model-ready CSV files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ingest, split, transform and export the datasets.
    Run(RunArgs),

    /// List the pipeline steps configured in a parameters file.
    Steps(StepsArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Parameters file (TOML).
    #[arg(long = "params", value_name = "FILE")]
    pub params: PathBuf,

    /// Labelled dataset to split (overrides paths.train_test_raw).
    #[arg(long = "train", value_name = "CSV")]
    pub train: Option<PathBuf>,

    /// Holdout dataset (overrides paths.holdout_raw).
    #[arg(long = "holdout", value_name = "CSV")]
    pub holdout: Option<PathBuf>,

    /// Output directory for processed files (overrides paths.output_dir).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory for run records (overrides tracking.dir).
    #[arg(long = "tracking-dir", value_name = "DIR")]
    pub tracking_dir: Option<PathBuf>,

    /// Process and report without writing any files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct StepsArgs {
    /// Parameters file (TOML).
    #[arg(long = "params", value_name = "FILE")]
    pub params: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_overrides() {
        let cli = Cli::try_parse_from([
            "titanic-prep",
            "--log-format",
            "json",
            "run",
            "--params",
            "config/parameters.toml",
            "--output-dir",
            "out",
            "--dry-run",
        ])
        .unwrap();
        assert!(matches!(cli.log_format, LogFormatArg::Json));
        let Command::Run(args) = cli.command else {
            panic!("expected run subcommand");
        };
        assert_eq!(args.params, PathBuf::from("config/parameters.toml"));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert!(args.dry_run);
        assert!(args.train.is_none());
    }
}
