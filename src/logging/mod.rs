//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Configurable log levels
//! - Console output on stderr, keeping stdout free for command output
//! - JSON-formatted local file logging with rotation
//!
//! Log events carry categories, counts, offsets and placeholders. Original values
//! never appear in a log field.
//!
//! # Example
//!
//! ```no_run
//! use veil::logging::init_logging;
//! use veil::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Guardrail ready");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the completion of a detection pass
///
/// # Example
///
/// ```no_run
/// use veil::log_scan_complete;
///
/// log_scan_complete!(3, 120);
/// ```
#[macro_export]
macro_rules! log_scan_complete {
    ($items:expr, $text_len:expr) => {
        tracing::debug!(
            items = $items,
            text_len = $text_len,
            "Detection pass completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use veil::log_error_with_context;
/// use veil::domain::VeilError;
///
/// let error = VeilError::Configuration("Invalid rule".to_string());
/// log_error_with_context!(&error, "Failed to load rule library");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
