//! Configuration management for Veil.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Veil reads an optional TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `VEIL_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`GuardrailConfig`] - Guardrail switch, rule library, disabled categories, audit
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [guardrail]
//! enabled = true
//! pattern_library = "${VEIL_RULES_DIR}/rules.toml"
//! disabled_categories = ["username"]
//!
//! [guardrail.audit]
//! enabled = true
//! log_path = "./audit/guardrail.log"
//! json_format = true
//!
//! [logging]
//! local_enabled = false
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use veil::config::load_config;
//!
//! match load_config("veil.toml") {
//!     Ok(_) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {e}"),
//! }
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use crate::guardrail::config::{AuditConfig, GuardrailConfig};
pub use loader::{load_config, load_config_from_str, load_config_or_default};
pub use schema::{ApplicationConfig, LoggingConfig, VeilConfig};
