//! Error types for the handout simulator.

use thiserror::Error;

/// Errors that can occur when building a simulator.
///
/// Construction is the only fallible step: once a simulator exists, every
/// `advance` is a total function over its state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandoutError {
    /// The configuration cannot describe a population (e.g. zero agents)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl HandoutError {
    /// Creates an invalid configuration error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// Result alias for handout operations.
pub type Result<T> = std::result::Result<T, HandoutError>;
