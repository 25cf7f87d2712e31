//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::VeilConfig;
use crate::domain::errors::VeilError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

static ENV_REFERENCE: OnceLock<Regex> = OnceLock::new();

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`VeilConfig`]
/// 4. Applies environment variable overrides (`VEIL_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`VeilError::Configuration`] if the file is missing or unreadable,
/// a referenced variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use veil::config::loader::load_config;
///
/// let config = load_config("veil.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<VeilConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(VeilError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        VeilError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    load_config_from_str(&contents)
}

/// Loads configuration from a file if it exists, otherwise from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<VeilConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        finish(VeilConfig::default())
    }
}

/// Loads configuration from TOML text
pub fn load_config_from_str(contents: &str) -> Result<VeilConfig> {
    let contents = substitute_env_vars(contents)?;

    let config: VeilConfig = toml::from_str(&contents)
        .map_err(|e| VeilError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(config)
}

fn finish(mut config: VeilConfig) -> Result<VeilConfig> {
    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        VeilError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = ENV_REFERENCE
        .get_or_init(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid reference pattern"));
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            match std::env::var(&caps[1]) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == &caps[1]) {
                        missing_vars.push(caps[1].to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(VeilError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `VEIL_*` prefix
///
/// Variables follow the pattern `VEIL_<SECTION>_<KEY>`, for example
/// `VEIL_GUARDRAIL_ENABLED` or `VEIL_LOGGING_LOCAL_PATH`.
fn apply_env_overrides(config: &mut VeilConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("VEIL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Guardrail overrides
    config
        .guardrail
        .apply_env_overrides()
        .map_err(|e| VeilError::Configuration(format!("{e:#}")))?;

    // Logging overrides
    if let Ok(val) = std::env::var("VEIL_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().map_err(|_| {
            VeilError::Configuration(format!("Invalid VEIL_LOGGING_LOCAL_ENABLED value: {val}"))
        })?;
    }
    if let Ok(val) = std::env::var("VEIL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
