//! Domain error types
//!
//! This module defines the error hierarchy for Veil. Only construction-time
//! problems (a malformed rule library, an invalid configuration) and preparing
//! the log directory can fail; the guardrail operations themselves are total.

use thiserror::Error;

/// Main Veil error type
///
/// This is the primary error type used throughout the library.
#[derive(Debug, Error)]
pub enum VeilError {
    /// Configuration-related errors, including malformed detection rules
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O errors outside configuration loading
    #[error("I/O error: {0}")]
    Io(String),
}

impl VeilError {
    /// Returns true for errors that must stop the engine from being used
    pub fn is_fatal(&self) -> bool {
        matches!(self, VeilError::Configuration(_))
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for VeilError {
    fn from(err: toml::de::Error) -> Self {
        VeilError::Configuration(format!("TOML parse error: {err}"))
    }
}
