//! Sensitive-information detection
//!
//! Provides the trait-based detection interface and the [`Scanner`], which applies
//! a [`PatternRegistry`] to one text with greedy, priority-ordered claiming: rules
//! run in registry order and a candidate overlapping any already accepted span is
//! dropped, so an earlier rule always wins a contested range.

pub mod patterns;
pub mod rule;

use crate::guardrail::anonymizer::{apply_replacements, PlaceholderAllocator};
use crate::guardrail::models::{GuardrailResult, SensitiveItem};
use patterns::PatternRegistry;
use std::sync::Arc;

/// Trait for detector implementations
pub trait Detector: Send + Sync {
    /// Detect sensitive items in a text and build its anonymized form
    fn detect(&self, text: &str) -> GuardrailResult;

    /// Registry the detector evaluates
    fn registry(&self) -> &PatternRegistry;
}

/// Registry-driven detector
#[derive(Debug, Clone)]
pub struct Scanner {
    registry: Arc<PatternRegistry>,
}

impl Scanner {
    /// Create a scanner over a shared registry
    pub fn new(registry: Arc<PatternRegistry>) -> Self {
        Self { registry }
    }

    /// Create a scanner that owns its registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self::new(Arc::new(registry))
    }
}

impl Detector for Scanner {
    fn detect(&self, text: &str) -> GuardrailResult {
        scan(&self.registry, text)
    }

    fn registry(&self) -> &PatternRegistry {
        &self.registry
    }
}

/// Run one detection pass of `registry` over `text`
///
/// Never fails on well-formed input. A pass that finds nothing returns the text
/// unchanged with `has_sensitive_info == false`.
pub fn scan(registry: &PatternRegistry, text: &str) -> GuardrailResult {
    if text.is_empty() {
        return GuardrailResult::clean(text);
    }

    let mut allocator = PlaceholderAllocator::new();
    let mut items: Vec<SensitiveItem> = Vec::new();

    for rule in registry.rules() {
        for (start, end) in rule.candidates(text) {
            let raw = &text[start..end];

            if !rule.accepts(raw) {
                tracing::trace!(
                    category = %rule.category(),
                    start,
                    end,
                    "Candidate rejected by validator or exclusion"
                );
                continue;
            }

            if items.iter().any(|item| item.overlaps(start, end)) {
                continue;
            }

            let placeholder = allocator.allocate(rule.prefix());
            items.push(SensitiveItem::new(
                rule.category(),
                rule.label(),
                raw,
                placeholder,
                start,
                end,
            ));
        }
    }

    if items.is_empty() {
        return GuardrailResult::clean(text);
    }

    items.sort_by_key(|item| item.start);
    let anonymized_text = apply_replacements(text, &items);

    crate::log_scan_complete!(items.len(), text.len());

    GuardrailResult {
        has_sensitive_info: true,
        items,
        anonymized_text,
    }
}
