//! CLI error types

use pricer_trs::TrsError;
use service_report::ReportError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Scenario parameters rejected by the evaluator
    #[error("Pricing error: {0}")]
    Pricing(#[from] TrsError),

    /// Table or chart output failed
    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    /// Console I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
