use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or validating a [`SimulationConfig`](super::config::SimulationConfig).
///
/// Grid dimensions are never an error: the carver normalizes them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
