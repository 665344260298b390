use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the parameters document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read parameters file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse parameters file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid parameters: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
