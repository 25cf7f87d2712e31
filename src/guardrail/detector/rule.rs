//! Detection rules
//!
//! A rule pairs a category with one or more compiled patterns, a placeholder
//! prefix, and optional acceptance checks. Patterns may declare a named group
//! `value`: the candidate span is then that group, and the remainder of the match
//! is context that must be present but is never redacted.

use crate::domain::{Result, VeilError};
use crate::guardrail::models::SensitiveCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Name of the capture group that narrows a match to the sensitive part
pub const VALUE_GROUP: &str = "value";

/// Regular-expression engine a pattern is compiled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchEngine {
    /// Linear-time engine (`regex`), no look-around
    #[default]
    Standard,
    /// Backtracking engine (`fancy-regex`) with look-ahead and look-behind
    Lookaround,
}

/// Structural acceptance check applied to a raw match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Validator {
    /// Number of ASCII digits, separators ignored, must fall in `min..=max`
    DigitCount { min: usize, max: usize },
    /// 13–19 digits with a valid Luhn checksum
    CardNumber,
}

impl Validator {
    /// Check whether a raw match passes
    pub fn accepts(&self, raw: &str) -> bool {
        match self {
            Self::DigitCount { min, max } => {
                let digits = raw.chars().filter(|c| c.is_ascii_digit()).count();
                (*min..=*max).contains(&digits)
            }
            Self::CardNumber => {
                let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
                (13..=19).contains(&digits.len()) && luhn_valid(&digits)
            }
        }
    }

    fn check(&self) -> std::result::Result<(), String> {
        match self {
            Self::DigitCount { min, max } if min > max => {
                Err(format!("digit_count min ({min}) exceeds max ({max})"))
            }
            _ => Ok(()),
        }
    }
}

fn luhn_valid(digits: &[u32]) -> bool {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// Rule definition as written in a TOML rule library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Category tag (snake_case)
    pub category: String,
    /// Human-readable label
    pub label: String,
    /// Placeholder prefix, e.g. `EMAIL` for `[EMAIL_1]`
    pub prefix: String,
    /// Patterns; candidates from all of them compete within this rule
    pub patterns: Vec<String>,
    /// Engine used to compile every pattern of this rule
    #[serde(default)]
    pub engine: MatchEngine,
    /// Optional structural check
    #[serde(default)]
    pub validator: Option<Validator>,
    /// Literal tokens that never qualify (compared case-insensitively)
    #[serde(default)]
    pub exclusions: Vec<String>,
}

enum Compiled {
    Standard(regex::Regex),
    Lookaround(fancy_regex::Regex),
}

/// One compiled pattern
pub struct Matcher {
    source: String,
    compiled: Compiled,
    has_value_group: bool,
}

impl Matcher {
    /// Compile a pattern with the given engine
    pub fn compile(pattern: &str, engine: MatchEngine) -> std::result::Result<Self, String> {
        let (compiled, has_value_group) = match engine {
            MatchEngine::Standard => {
                let re = regex::Regex::new(pattern).map_err(|e| e.to_string())?;
                let has_value = re.capture_names().flatten().any(|n| n == VALUE_GROUP);
                (Compiled::Standard(re), has_value)
            }
            MatchEngine::Lookaround => {
                let re = fancy_regex::Regex::new(pattern).map_err(|e| e.to_string())?;
                let has_value = re.capture_names().flatten().any(|n| n == VALUE_GROUP);
                (Compiled::Lookaround(re), has_value)
            }
        };

        Ok(Self {
            source: pattern.to_string(),
            compiled,
            has_value_group,
        })
    }

    /// Pattern source text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Find every non-empty candidate span in `text`, left to right
    pub fn spans(&self, text: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();

        match &self.compiled {
            Compiled::Standard(re) => {
                for caps in re.captures_iter(text) {
                    let matched = if self.has_value_group {
                        caps.name(VALUE_GROUP)
                    } else {
                        caps.get(0)
                    };
                    if let Some(m) = matched {
                        spans.push((m.start(), m.end()));
                    }
                }
            }
            Compiled::Lookaround(re) => {
                for caps in re.captures_iter(text) {
                    let caps = match caps {
                        Ok(caps) => caps,
                        Err(e) => {
                            tracing::warn!(
                                pattern = %self.source,
                                error = %e,
                                "Pattern evaluation aborted, keeping earlier matches"
                            );
                            break;
                        }
                    };
                    let matched = if self.has_value_group {
                        caps.name(VALUE_GROUP)
                    } else {
                        caps.get(0)
                    };
                    if let Some(m) = matched {
                        spans.push((m.start(), m.end()));
                    }
                }
            }
        }

        spans.retain(|(start, end)| start < end);
        spans
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = match self.compiled {
            Compiled::Standard(_) => MatchEngine::Standard,
            Compiled::Lookaround(_) => MatchEngine::Lookaround,
        };
        f.debug_struct("Matcher")
            .field("source", &self.source)
            .field("engine", &engine)
            .field("has_value_group", &self.has_value_group)
            .finish()
    }
}

/// Immutable, compiled detection rule
#[derive(Debug)]
pub struct DetectionRule {
    category: SensitiveCategory,
    label: String,
    prefix: String,
    matchers: Vec<Matcher>,
    validator: Option<Validator>,
    exclusions: HashSet<String>,
}

impl DetectionRule {
    /// Compile a rule definition
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::Configuration`] if the category is unknown, the prefix
    /// is malformed, no pattern is given, a pattern does not compile, or the
    /// validator bounds are inverted.
    pub fn compile(def: &RuleDefinition) -> Result<Self> {
        let category: SensitiveCategory = def
            .category
            .parse()
            .map_err(|e: String| VeilError::Configuration(format!("Rule '{}': {e}", def.label)))?;

        if !is_valid_prefix(&def.prefix) {
            return Err(VeilError::Configuration(format!(
                "Rule '{}': invalid placeholder prefix '{}' (expected [A-Z][A-Z0-9_]*)",
                def.label, def.prefix
            )));
        }

        if def.patterns.is_empty() {
            return Err(VeilError::Configuration(format!(
                "Rule '{}': at least one pattern is required",
                def.label
            )));
        }

        if let Some(validator) = &def.validator {
            validator.check().map_err(|e| {
                VeilError::Configuration(format!("Rule '{}': {e}", def.label))
            })?;
        }

        let matchers = def
            .patterns
            .iter()
            .map(|pattern| {
                Matcher::compile(pattern, def.engine).map_err(|e| {
                    VeilError::Configuration(format!(
                        "Rule '{}': invalid pattern {pattern:?}: {e}",
                        def.label
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            category,
            label: def.label.clone(),
            prefix: def.prefix.clone(),
            matchers,
            validator: def.validator.clone(),
            exclusions: def
                .exclusions
                .iter()
                .map(|token| token.trim().to_lowercase())
                .collect(),
        })
    }

    /// Category this rule detects
    pub fn category(&self) -> SensitiveCategory {
        self.category
    }

    /// Human-readable label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Placeholder prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Compiled patterns
    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    /// Candidate spans from every pattern, ordered by start (longer span first on ties)
    pub fn candidates(&self, text: &str) -> Vec<(usize, usize)> {
        let mut spans: Vec<(usize, usize)> =
            self.matchers.iter().flat_map(|m| m.spans(text)).collect();
        spans.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));
        spans.dedup();
        spans
    }

    /// Check a raw match against the validator and the exclusion set
    pub fn accepts(&self, raw: &str) -> bool {
        if self.exclusions.contains(&raw.trim().to_lowercase()) {
            return false;
        }
        self.validator.as_ref().map_or(true, |v| v.accepts(raw))
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
