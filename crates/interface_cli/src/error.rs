//! CLI error handling

use std::path::PathBuf;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cannot read {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error
    ///
    /// Follows the BSD `sysexits` conventions.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgument(_) => 64,
            CliError::Json(_) => 65,
            CliError::Input { .. } => 66,
            CliError::Output(_) => 74,
            CliError::Config(_) => 78,
        }
    }
}
