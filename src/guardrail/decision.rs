//! Pending redaction decisions
//!
//! A [`PendingDecision`] is what a calling surface holds between a detection pass
//! and the user's answer: the original text, the detected items, and the user's
//! per-item ignore choices. Confirming it produces the outbound text and the
//! mapping; cancelling it discards everything.

use super::anonymizer::{apply_replacements, build_replacement_mapping};
use super::models::{GuardrailResult, ReplacementMapping, SensitiveItem};

/// One detection pass awaiting the user's decision
#[derive(Debug, Clone)]
pub struct PendingDecision {
    original_text: String,
    result: GuardrailResult,
}

/// Outcome of a confirmed decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedRedaction {
    /// Text safe to send to the backend
    pub anonymized_text: String,
    /// Placeholder → original for every redacted item
    pub mapping: ReplacementMapping,
    /// Items replaced by a placeholder
    pub redacted_count: usize,
    /// Items the user chose to leave untouched
    pub ignored_count: usize,
}

impl PendingDecision {
    /// Wrap a detection result for the text it was computed from
    pub fn new(original_text: impl Into<String>, result: GuardrailResult) -> Self {
        Self {
            original_text: original_text.into(),
            result,
        }
    }

    /// Text the items index into
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    /// Detected items sorted by start offset
    pub fn items(&self) -> &[SensitiveItem] {
        &self.result.items
    }

    /// Check if anything was detected
    pub fn has_sensitive_info(&self) -> bool {
        self.result.has_sensitive_info
    }

    /// Set an item's ignore flag, returning false if no item has that id
    pub fn set_ignored(&mut self, id: &str, ignored: bool) -> bool {
        match self.result.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.ignored = ignored;
                true
            }
            None => false,
        }
    }

    /// Flip an item's ignore flag, returning the new value
    pub fn toggle_ignored(&mut self, id: &str) -> Option<bool> {
        let item = self.result.items.iter_mut().find(|item| item.id == id)?;
        item.ignored = !item.ignored;
        Some(item.ignored)
    }

    /// Anonymized text reflecting the current ignore choices
    pub fn preview(&self) -> String {
        apply_replacements(&self.original_text, &self.result.items)
    }

    /// Finalize the decision
    pub fn confirm(self) -> ConfirmedRedaction {
        let items = &self.result.items;
        let ignored_count = items.iter().filter(|item| item.ignored).count();

        ConfirmedRedaction {
            anonymized_text: apply_replacements(&self.original_text, items),
            mapping: build_replacement_mapping(items),
            redacted_count: items.len() - ignored_count,
            ignored_count,
        }
    }

    /// Abandon the decision; nothing is sent and no mapping is produced
    pub fn cancel(self) {
        tracing::debug!(items = self.result.items.len(), "Redaction decision cancelled");
    }
}
