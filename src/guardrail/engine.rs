//! Guardrail engine
//!
//! This module provides the [`GuardrailEngine`] that orchestrates detection,
//! the user's redaction decision, session mapping updates and audit logging.
//!
//! # Architecture
//!
//! The engine coordinates three components:
//! - **Detector**: scans text with the ordered rule registry
//! - **Session**: accumulates the placeholder mapping and reveal state
//! - **Audit Logger**: records confirmations with hashed values
//!
//! # Examples
//!
//! ```
//! use veil::guardrail::{GuardrailConfig, GuardrailEngine, GuardrailSession};
//!
//! # fn example() -> anyhow::Result<()> {
//! let engine = GuardrailEngine::new(GuardrailConfig::default())?;
//! let mut session = GuardrailSession::new();
//!
//! let decision = engine.begin("My SSN is 123-45-6789");
//! let outbound = engine.confirm(decision, &mut session)?;
//! assert_eq!(outbound, "My SSN is [SSN_1]");
//!
//! assert_eq!(
//!     veil::guardrail::restore_originals("Noted: [SSN_1]", session.mapping()),
//!     "Noted: 123-45-6789"
//! );
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

use crate::guardrail::{
    audit::AuditLogger,
    config::GuardrailConfig,
    decision::PendingDecision,
    detector::{patterns::PatternRegistry, Detector, Scanner},
    models::GuardrailResult,
    session::GuardrailSession,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;

/// Guardrail engine
///
/// The engine is `Send + Sync`; share it across threads with `Arc`. All mutable
/// per-conversation state lives in [`GuardrailSession`] and [`PendingDecision`].
pub struct GuardrailEngine {
    config: GuardrailConfig,
    detector: Arc<dyn Detector>,
    audit_logger: Option<AuditLogger>,
}

impl GuardrailEngine {
    /// Create a new engine
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration validation fails
    /// - The rule library file cannot be loaded or compiled
    /// - Disabled categories leave no rules
    /// - Audit logger initialization fails
    pub fn new(config: GuardrailConfig) -> Result<Self> {
        config
            .validate()
            .context("Invalid guardrail configuration")?;

        let registry = match config.pattern_library {
            Some(ref path) => PatternRegistry::from_file(path)
                .with_context(|| format!("Failed to load rule library {}", path.display()))?,
            None => PatternRegistry::builtin().clone(),
        };

        let registry = if config.disabled_categories.is_empty() {
            registry
        } else {
            registry.without_categories(&config.disabled_categories)
        };

        if registry.is_empty() {
            anyhow::bail!("Every rule in the library belongs to a disabled category");
        }

        tracing::info!(
            rules = registry.len(),
            custom_library = config.pattern_library.is_some(),
            enabled = config.enabled,
            "Guardrail engine initialized"
        );

        Self::assemble(config, Arc::new(Scanner::with_registry(registry)))
    }

    /// Create an engine around a custom detector
    pub fn with_detector(config: GuardrailConfig, detector: Arc<dyn Detector>) -> Result<Self> {
        config
            .validate()
            .context("Invalid guardrail configuration")?;

        Self::assemble(config, detector)
    }

    fn assemble(config: GuardrailConfig, detector: Arc<dyn Detector>) -> Result<Self> {
        let audit_logger = if config.audit.enabled {
            Some(AuditLogger::new(
                config.audit.log_path.clone(),
                config.audit.json_format,
            )?)
        } else {
            None
        };

        Ok(Self {
            config,
            detector,
            audit_logger,
        })
    }

    /// Detect sensitive items in a text
    ///
    /// A disabled engine reports nothing and returns the text unchanged.
    pub fn detect(&self, text: &str) -> GuardrailResult {
        if !self.config.enabled {
            return GuardrailResult::clean(text);
        }

        let start = Instant::now();
        let result = self.detector.detect(text);

        tracing::debug!(
            items = result.items.len(),
            text_len = text.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Detection pass finished"
        );

        result
    }

    /// Start a redaction decision for a text
    pub fn begin(&self, text: &str) -> PendingDecision {
        PendingDecision::new(text, self.detect(text))
    }

    /// Confirm a decision, merge its mapping into the session and audit it
    ///
    /// Returns the anonymized text, the only form of the input that may leave
    /// the process.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the audit entry fails. The session is updated
    /// before the audit write, so the mapping is never lost.
    pub fn confirm(
        &self,
        decision: PendingDecision,
        session: &mut GuardrailSession,
    ) -> Result<String> {
        let items = decision.items().to_vec();
        let confirmed = decision.confirm();

        session.apply_confirmation(&confirmed);

        tracing::info!(
            session_id = %session.id(),
            redacted = confirmed.redacted_count,
            ignored = confirmed.ignored_count,
            "Redaction confirmed"
        );

        if let Some(ref logger) = self.audit_logger {
            if !items.is_empty() {
                logger
                    .log_confirmation(session.id(), &items)
                    .context("Failed to write guardrail audit entry")?;
            }
        }

        Ok(confirmed.anonymized_text)
    }

    /// Registry the engine's detector evaluates
    pub fn registry(&self) -> &PatternRegistry {
        self.detector.registry()
    }

    /// Check if the guardrail is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Engine configuration
    pub fn config(&self) -> &GuardrailConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guardrail::models::SensitiveCategory;
    use tempfile::tempdir;

    #[test]
    fn test_engine_creation() {
        let engine = GuardrailEngine::new(GuardrailConfig::default()).unwrap();
        assert!(engine.is_enabled());
        assert_eq!(engine.registry().len(), SensitiveCategory::ALL.len());
    }

    #[test]
    fn test_disabled_engine_passes_text_through() {
        let config = GuardrailConfig {
            enabled: false,
            ..GuardrailConfig::default()
        };
        let engine = GuardrailEngine::new(config).unwrap();
        let result = engine.detect("My SSN is 123-45-6789");
        assert!(!result.has_sensitive_info);
        assert_eq!(result.anonymized_text, "My SSN is 123-45-6789");
    }

    #[test]
    fn test_disabled_categories_removed() {
        let config = GuardrailConfig {
            disabled_categories: vec![SensitiveCategory::Email],
            ..GuardrailConfig::default()
        };
        let engine = GuardrailEngine::new(config).unwrap();
        assert!(engine.registry().rule_for(SensitiveCategory::Email).is_none());

        let result = engine.detect("mail jane.doe@example.com");
        assert!(result
            .items
            .iter()
            .all(|item| item.category != SensitiveCategory::Email));
    }

    #[test]
    fn test_confirm_updates_session_and_audit() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit").join("guardrail.log");
        let mut config = GuardrailConfig::default();
        config.audit.enabled = true;
        config.audit.log_path = log_path.clone();

        let engine = GuardrailEngine::new(config).unwrap();
        let mut session = GuardrailSession::new();

        let outbound = engine
            .confirm(engine.begin("My SSN is 123-45-6789"), &mut session)
            .unwrap();

        assert_eq!(outbound, "My SSN is [SSN_1]");
        assert_eq!(session.mapping().get("[SSN_1]"), Some("123-45-6789"));

        let audit = std::fs::read_to_string(&log_path).unwrap();
        assert!(audit.contains("[SSN_1]"));
        assert!(!audit.contains("123-45-6789"));
    }

    #[test]
    fn test_custom_library_fully_disabled_fails() {
        let dir = tempdir().unwrap();
        let library = dir.path().join("rules.toml");
        std::fs::write(
            &library,
            "[[rules]]\ncategory = \"email\"\nlabel = \"Email\"\nprefix = \"EMAIL\"\npatterns = ['\\S+@\\S+']\n",
        )
        .unwrap();

        let config = GuardrailConfig {
            pattern_library: Some(library),
            disabled_categories: vec![SensitiveCategory::Email],
            ..GuardrailConfig::default()
        };
        let err = GuardrailEngine::new(config)
            .err()
            .expect("a library with every category disabled must be rejected");
        assert!(err.to_string().contains("disabled category"));
    }

    #[test]
    fn test_missing_library_fails() {
        let config = GuardrailConfig {
            pattern_library: Some("/nope/rules.toml".into()),
            ..GuardrailConfig::default()
        };
        assert!(GuardrailEngine::new(config).is_err());
    }
}
