//! Integration tests for configuration loading and validation
//!
//! Every test takes `ENV_MUTEX` because loading applies `VEIL_*` overrides from
//! the process environment.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tempfile::NamedTempFile;
use veil::config::{load_config, load_config_from_str, load_config_or_default};
use veil::domain::VeilError;
use veil::guardrail::{GuardrailEngine, SensitiveCategory};

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const OVERRIDE_VARS: [&str; 9] = [
    "VEIL_APPLICATION_LOG_LEVEL",
    "VEIL_GUARDRAIL_ENABLED",
    "VEIL_GUARDRAIL_PATTERN_LIBRARY",
    "VEIL_GUARDRAIL_DISABLED_CATEGORIES",
    "VEIL_GUARDRAIL_AUDIT_ENABLED",
    "VEIL_GUARDRAIL_AUDIT_LOG_PATH",
    "VEIL_GUARDRAIL_AUDIT_JSON_FORMAT",
    "VEIL_LOGGING_LOCAL_ENABLED",
    "VEIL_LOGGING_LOCAL_PATH",
];

fn lock_env() -> MutexGuard<'static, ()> {
    let guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    guard
}

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in OVERRIDE_VARS {
        std::env::remove_var(var);
    }
    std::env::remove_var("TEST_VEIL_RULES_DIR");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_complete_config() {
    let _env = lock_env();
    let file = write_config(
        r#"
[application]
log_level = "debug"

[guardrail]
enabled = true
disabled_categories = ["username", "name"]

[guardrail.audit]
enabled = false
log_path = "./audit/test.log"
json_format = false

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "never"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.guardrail.enabled);
    assert_eq!(
        config.guardrail.disabled_categories,
        vec![SensitiveCategory::Username, SensitiveCategory::Name]
    );
    assert!(!config.guardrail.audit.json_format);
    assert_eq!(config.guardrail.audit.log_path, PathBuf::from("./audit/test.log"));
    assert_eq!(config.logging.local_rotation, "never");

    let engine = GuardrailEngine::new(config.guardrail).unwrap();
    assert_eq!(engine.registry().len(), SensitiveCategory::ALL.len() - 2);
}

#[test]
fn test_empty_file_uses_defaults() {
    let _env = lock_env();
    let file = write_config("");

    let config = load_config(file.path()).unwrap();
    assert_eq!(config, load_config_or_default("/nonexistent/veil.toml").unwrap());
    assert!(config.guardrail.enabled);
    assert!(config.guardrail.pattern_library.is_none());
}

#[test]
fn test_env_var_substitution() {
    let _env = lock_env();
    let library = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    let dir = library.path().parent().unwrap().to_str().unwrap().to_string();
    let name = library.path().file_name().unwrap().to_str().unwrap().to_string();
    std::env::set_var("TEST_VEIL_RULES_DIR", &dir);

    let config = load_config_from_str(&format!(
        "[guardrail]\npattern_library = \"${{TEST_VEIL_RULES_DIR}}/{name}\"\n"
    ))
    .unwrap();

    assert_eq!(
        config.guardrail.pattern_library,
        Some(PathBuf::from(format!("{dir}/{name}")))
    );
    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_is_configuration_error() {
    let _env = lock_env();
    let err = load_config_from_str("[guardrail]\npattern_library = \"${TEST_VEIL_RULES_DIR}/x.toml\"")
        .unwrap_err();

    assert!(matches!(err, VeilError::Configuration(_)));
    assert!(err.to_string().contains("TEST_VEIL_RULES_DIR"));
}

#[test]
fn test_env_overrides() {
    let _env = lock_env();
    let file = write_config("[application]\nlog_level = \"info\"\n");

    std::env::set_var("VEIL_APPLICATION_LOG_LEVEL", "warn");
    std::env::set_var("VEIL_GUARDRAIL_ENABLED", "false");
    std::env::set_var("VEIL_GUARDRAIL_DISABLED_CATEGORIES", "phone, ip_address");
    std::env::set_var("VEIL_GUARDRAIL_AUDIT_ENABLED", "true");
    std::env::set_var("VEIL_GUARDRAIL_AUDIT_LOG_PATH", "/tmp/veil-audit/guardrail.log");
    std::env::set_var("VEIL_GUARDRAIL_AUDIT_JSON_FORMAT", "false");
    std::env::set_var("VEIL_LOGGING_LOCAL_PATH", "/tmp/veil-logs");

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "warn");
    assert!(!config.guardrail.enabled);
    assert_eq!(
        config.guardrail.disabled_categories,
        vec![SensitiveCategory::Phone, SensitiveCategory::IpAddress]
    );
    assert!(config.guardrail.audit.enabled);
    assert_eq!(
        config.guardrail.audit.log_path,
        PathBuf::from("/tmp/veil-audit/guardrail.log")
    );
    assert!(!config.guardrail.audit.json_format);
    assert_eq!(config.logging.local_path, "/tmp/veil-logs");

    cleanup_env_vars();
}

#[test]
fn test_invalid_env_override_values() {
    let _env = lock_env();

    std::env::set_var("VEIL_GUARDRAIL_ENABLED", "sometimes");
    assert!(load_config_or_default("/nonexistent/veil.toml").is_err());
    cleanup_env_vars();

    std::env::set_var("VEIL_GUARDRAIL_DISABLED_CATEGORIES", "email,shoe_size");
    assert!(load_config_or_default("/nonexistent/veil.toml").is_err());
    cleanup_env_vars();

    std::env::set_var("VEIL_LOGGING_LOCAL_ENABLED", "yes");
    assert!(load_config_or_default("/nonexistent/veil.toml").is_err());
    cleanup_env_vars();
}

#[test]
fn test_validation_failures() {
    let _env = lock_env();

    let cases = [
        "[application]\nlog_level = \"chatty\"",
        "[logging]\nlocal_rotation = \"weekly\"",
        "[guardrail]\npattern_library = \"/nonexistent/rules.toml\"",
        "[guardrail]\ndisabled_categories = [\"not_a_category\"]",
    ];

    for case in cases {
        let err = load_config_from_str(case).unwrap_err();
        assert!(err.is_fatal(), "{case}: {err}");
    }
}

#[test]
fn test_every_category_disabled_is_rejected() {
    let _env = lock_env();
    let all: Vec<String> = SensitiveCategory::ALL
        .iter()
        .map(|c| format!("\"{}\"", c.as_str()))
        .collect();

    let err = load_config_from_str(&format!(
        "[guardrail]\ndisabled_categories = [{}]",
        all.join(", ")
    ))
    .unwrap_err();
    assert!(err.to_string().contains("guardrail"));
}
