//! Rule library for sensitive-information detection
//!
//! Rules are listed as an ordered `[[rules]]` array in TOML. Order is precedence:
//! a rule listed earlier claims character ranges before any later rule sees them,
//! so high-precision categories come first and broad, cue-driven ones last.

use super::rule::{DetectionRule, RuleDefinition};
use crate::domain::{Result, VeilError};
use crate::guardrail::models::SensitiveCategory;
use serde::Deserialize;
use std::path::Path;
use std::sync::{Arc, OnceLock};

/// Rule library container
#[derive(Debug, Deserialize)]
struct RuleLibrary {
    rules: Vec<RuleDefinition>,
}

static BUILTIN: OnceLock<PatternRegistry> = OnceLock::new();

/// Ordered, immutable set of detection rules
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    rules: Vec<Arc<DetectionRule>>,
}

impl PatternRegistry {
    /// Create a registry from a TOML rule library file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            VeilError::Configuration(format!(
                "Failed to read rule library {}: {e}",
                path.as_ref().display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Create a registry from TOML content
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::Configuration`] if the TOML is invalid, the library is
    /// empty, or any rule fails to compile.
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: RuleLibrary = toml::from_str(content)?;
        Self::from_definitions(&library.rules)
    }

    /// Compile rule definitions, keeping their order
    pub fn from_definitions(definitions: &[RuleDefinition]) -> Result<Self> {
        if definitions.is_empty() {
            return Err(VeilError::Configuration(
                "Rule library defines no rules".to_string(),
            ));
        }

        let rules = definitions
            .iter()
            .map(|def| DetectionRule::compile(def).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(rules = rules.len(), "Compiled rule library");

        Ok(Self { rules })
    }

    /// Create a registry from the embedded rule library
    pub fn default_rules() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/guardrail_rules.toml");
        Self::from_toml(default_toml)
    }

    /// Process-wide registry built once from the embedded rule library
    ///
    /// # Panics
    ///
    /// Panics if the embedded library is malformed. That is a build defect, not a
    /// runtime condition, and the engine must not become usable with it.
    pub fn builtin() -> &'static PatternRegistry {
        BUILTIN.get_or_init(|| {
            Self::default_rules().expect("embedded rule library must compile")
        })
    }

    /// Copy of this registry without the given categories, order preserved
    pub fn without_categories(&self, disabled: &[SensitiveCategory]) -> Self {
        Self {
            rules: self
                .rules
                .iter()
                .filter(|rule| !disabled.contains(&rule.category()))
                .cloned()
                .collect(),
        }
    }

    /// Rules in precedence order
    pub fn rules(&self) -> impl Iterator<Item = &DetectionRule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// First rule for a category
    pub fn rule_for(&self, category: SensitiveCategory) -> Option<&DetectionRule> {
        self.rules().find(|rule| rule.category() == category)
    }

    /// Categories in precedence order
    pub fn categories(&self) -> Vec<SensitiveCategory> {
        self.rules().map(|rule| rule.category()).collect()
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
