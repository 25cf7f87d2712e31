//! Reversible sensitive-information guardrail
//!
//! Detects personally identifying or confidential substrings, swaps each for a
//! typed placeholder such as `[EMAIL_1]`, and restores originals on demand for
//! local display only.
//!
//! # Flow
//!
//! 1. [`detect`] (or [`GuardrailEngine::begin`]) scans a text with the ordered
//!    [`PatternRegistry`] and returns a [`GuardrailResult`].
//! 2. The user may mark items ignored on a [`PendingDecision`].
//! 3. Confirmation yields the anonymized text and a [`ReplacementMapping`], merged
//!    into the [`GuardrailSession`].
//! 4. Replies are shown with placeholders until a surface is revealed, at which
//!    point [`restore_originals`] maps them back.
//!
//! # Examples
//!
//! ```
//! use veil::guardrail::{
//!     apply_replacements, build_replacement_mapping, detect, restore_originals,
//! };
//!
//! let text = "Contact me at jane.doe@example.com or call 415-555-0199";
//! let result = detect(text);
//! assert_eq!(result.anonymized_text, "Contact me at [EMAIL_1] or call [PHONE_1]");
//!
//! let mapping = build_replacement_mapping(&result.items);
//! let outbound = apply_replacements(text, &result.items);
//! assert_eq!(restore_originals(&outbound, &mapping), text);
//! ```

pub mod anonymizer;
pub mod audit;
pub mod config;
pub mod decision;
pub mod detector;
pub mod engine;
pub mod models;
pub mod restore;
pub mod reveal;
pub mod session;

pub use anonymizer::{apply_replacements, build_replacement_mapping, PlaceholderAllocator};
pub use audit::AuditLogger;
pub use config::{AuditConfig, GuardrailConfig};
pub use decision::{ConfirmedRedaction, PendingDecision};
pub use detector::patterns::PatternRegistry;
pub use detector::rule::{DetectionRule, MatchEngine, RuleDefinition, Validator};
pub use detector::{Detector, Scanner};
pub use engine::GuardrailEngine;
pub use models::{GuardrailResult, ReplacementMapping, SensitiveCategory, SensitiveItem};
pub use restore::{has_mappable_placeholders, restore_originals};
pub use reveal::{RevealController, RevealState};
pub use session::GuardrailSession;

/// Detect sensitive items in `text` with the built-in rule library
pub fn detect(text: &str) -> GuardrailResult {
    detector::scan(PatternRegistry::builtin(), text)
}
