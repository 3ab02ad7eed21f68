//! Error types for the scenario harness.

use handout_core::HandoutError;
use thiserror::Error;

/// Errors raised by the driver (never by the simulation rule itself).
#[derive(Debug, Error)]
pub enum SimError {
    /// Simulator construction failed
    #[error(transparent)]
    Handout(#[from] HandoutError),

    /// Export file could not be written
    #[error("Export error: {0}")]
    Export(#[from] std::io::Error),

    /// Export could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Scenario name not recognised
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),

    /// Command-line options that cannot be combined
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// One or more scenario runs failed their checks
    #[error("{failed}/{total} scenario runs failed")]
    ScenariosFailed { failed: usize, total: usize },
}
