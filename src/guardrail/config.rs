//! Guardrail configuration

use crate::guardrail::models::SensitiveCategory;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Guardrail settings (`[guardrail]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailConfig {
    /// Enable/disable the guardrail; when disabled text passes through untouched
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Path to a TOML rule library replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_library: Option<PathBuf>,

    /// Categories whose rules are removed from the registry
    #[serde(default)]
    pub disabled_categories: Vec<SensitiveCategory>,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for GuardrailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pattern_library: None,
            disabled_categories: Vec::new(),
            audit: AuditConfig::default(),
        }
    }
}

impl GuardrailConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Rule library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Rule library must be a TOML file: {}", path.display());
            }
        }

        let disabled: BTreeSet<SensitiveCategory> =
            self.disabled_categories.iter().copied().collect();
        if disabled.len() == SensitiveCategory::ALL.len() {
            anyhow::bail!(
                "Every category is disabled; set guardrail.enabled = false instead"
            );
        }

        self.audit.validate().context("Invalid audit configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("VEIL_GUARDRAIL_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid VEIL_GUARDRAIL_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("VEIL_GUARDRAIL_PATTERN_LIBRARY") {
            self.pattern_library = if val.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        if let Ok(val) = std::env::var("VEIL_GUARDRAIL_DISABLED_CATEGORIES") {
            self.disabled_categories = parse_categories(&val)
                .context("Invalid VEIL_GUARDRAIL_DISABLED_CATEGORIES value")?;
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Parse a comma-separated category list, ignoring blanks
pub fn parse_categories(list: &str) -> Result<Vec<SensitiveCategory>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<SensitiveCategory>().map_err(anyhow::Error::msg))
        .collect()
}

/// Audit logging configuration (`[guardrail.audit]` section)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON-lines format for audit logs
    #[serde(default = "default_true")]
    pub json_format: bool,
}

fn default_true() -> bool {
    true
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/guardrail.log")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            anyhow::bail!("guardrail.audit.log_path must not be empty when audit is enabled");
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("VEIL_GUARDRAIL_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid VEIL_GUARDRAIL_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("VEIL_GUARDRAIL_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("VEIL_GUARDRAIL_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid VEIL_GUARDRAIL_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GuardrailConfig::default();
        assert!(config.enabled);
        assert!(config.pattern_library.is_none());
        assert!(config.disabled_categories.is_empty());
        assert!(!config.audit.enabled);
        assert!(config.audit.json_format);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_section() {
        let config: GuardrailConfig = toml::from_str(
            r#"
            disabled_categories = ["name", "username"]

            [audit]
            enabled = true
            log_path = "/tmp/veil-audit.log"
            "#,
        )
        .unwrap();
        assert!(config.enabled);
        assert_eq!(
            config.disabled_categories,
            vec![SensitiveCategory::Name, SensitiveCategory::Username]
        );
        assert!(config.audit.enabled);
        assert!(config.audit.json_format);
    }

    #[test]
    fn test_missing_rule_library_rejected() {
        let config = GuardrailConfig {
            pattern_library: Some(PathBuf::from("/no/such/rules.toml")),
            ..GuardrailConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_all_categories_disabled_rejected() {
        let config = GuardrailConfig {
            disabled_categories: SensitiveCategory::ALL.to_vec(),
            ..GuardrailConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_all_categories_disabled_with_duplicates_rejected() {
        let mut disabled = SensitiveCategory::ALL.to_vec();
        disabled.push(SensitiveCategory::Email);
        disabled.push(SensitiveCategory::Phone);
        let config = GuardrailConfig {
            disabled_categories: disabled,
            ..GuardrailConfig::default()
        };
        assert!(config.validate().is_err());

        let partial = GuardrailConfig {
            disabled_categories: vec![SensitiveCategory::Email, SensitiveCategory::Email],
            ..GuardrailConfig::default()
        };
        assert!(partial.validate().is_ok());
    }

    #[test]
    fn test_parse_categories() {
        assert_eq!(
            parse_categories(" email, ip_address ,,").unwrap(),
            vec![SensitiveCategory::Email, SensitiveCategory::IpAddress]
        );
        assert!(parse_categories("email,shoe_size").is_err());
        assert!(parse_categories("").unwrap().is_empty());
    }
}
