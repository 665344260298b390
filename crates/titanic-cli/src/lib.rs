//! CLI library components for the Titanic preprocessing runner.

pub mod export;
pub mod logging;
pub mod run;
