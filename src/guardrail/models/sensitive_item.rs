//! Sensitive item data models

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of sensitive information a detection rule targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitiveCategory {
    /// Email addresses
    Email,
    /// Telephone numbers
    Phone,
    /// Payment card numbers
    CreditCard,
    /// Social Security Numbers and similar national IDs
    Ssn,
    /// API keys and access tokens
    ApiKey,
    /// Passwords, passcodes and PINs introduced by a cue word
    Password,
    /// Street and postal addresses
    Address,
    /// Personal names
    Name,
    /// Usernames, logins and handles
    Username,
    /// IPv4 addresses
    IpAddress,
    /// Dates of birth
    DateOfBirth,
    /// IBANs, account and routing numbers
    BankReference,
    /// Medical record, patient and insurance numbers
    MedicalReference,
}

impl SensitiveCategory {
    /// All categories in declaration order
    pub const ALL: [SensitiveCategory; 13] = [
        Self::Email,
        Self::Phone,
        Self::CreditCard,
        Self::Ssn,
        Self::ApiKey,
        Self::Password,
        Self::Address,
        Self::Name,
        Self::Username,
        Self::IpAddress,
        Self::DateOfBirth,
        Self::BankReference,
        Self::MedicalReference,
    ];

    /// Get the snake_case tag used in rule libraries and configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::CreditCard => "credit_card",
            Self::Ssn => "ssn",
            Self::ApiKey => "api_key",
            Self::Password => "password",
            Self::Address => "address",
            Self::Name => "name",
            Self::Username => "username",
            Self::IpAddress => "ip_address",
            Self::DateOfBirth => "date_of_birth",
            Self::BankReference => "bank_reference",
            Self::MedicalReference => "medical_reference",
        }
    }
}

impl fmt::Display for SensitiveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SensitiveCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("Unknown sensitive category: {s}"))
    }
}

/// One detected, categorized span of the original text
///
/// Offsets are UTF-8 byte offsets into the text the item was detected in,
/// forming the half-open range `start..end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensitiveItem {
    /// Identifier derived from category and span, stable within one scan
    pub id: String,
    /// Category of the detecting rule
    pub category: SensitiveCategory,
    /// Human-readable label of the detecting rule
    pub label: String,
    /// Original substring
    pub original: String,
    /// Placeholder token substituted for the original
    pub placeholder: String,
    /// Start offset (inclusive)
    pub start: usize,
    /// End offset (exclusive)
    pub end: usize,
    /// Set by the user to leave this span untouched
    #[serde(default)]
    pub ignored: bool,
}

impl SensitiveItem {
    /// Create a new, non-ignored item
    pub fn new(
        category: SensitiveCategory,
        label: impl Into<String>,
        original: impl Into<String>,
        placeholder: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            id: Self::make_id(category, start, end),
            category,
            label: label.into(),
            original: original.into(),
            placeholder: placeholder.into(),
            start,
            end,
            ignored: false,
        }
    }

    /// Build the identifier for a category and span
    pub fn make_id(category: SensitiveCategory, start: usize, end: usize) -> String {
        format!("{}-{}-{}", category.as_str(), start, end)
    }

    /// Check whether this item's range intersects `start..end`
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.start < end && start < self.end
    }

    /// Length of the original span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Output of one detection pass over one text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardrailResult {
    /// True iff at least one item was detected
    pub has_sensitive_info: bool,
    /// Detected items sorted ascending by start offset
    pub items: Vec<SensitiveItem>,
    /// Input text with every item replaced by its placeholder
    pub anonymized_text: String,
}

impl GuardrailResult {
    /// Result for a text with nothing to protect
    pub fn clean(text: &str) -> Self {
        Self {
            has_sensitive_info: false,
            items: Vec::new(),
            anonymized_text: text.to_string(),
        }
    }

    /// Count items per category
    pub fn count_by_category(&self) -> std::collections::BTreeMap<SensitiveCategory, usize> {
        let mut counts = std::collections::BTreeMap::new();
        for item in &self.items {
            *counts.entry(item.category).or_insert(0) += 1;
        }
        counts
    }
}
