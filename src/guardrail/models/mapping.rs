//! Placeholder → original replacement mapping
//!
//! Original values are the very data the guardrail exists to protect, so they are
//! held in `secrecy` containers: memory is zeroed on drop and `Debug` output never
//! shows them. Callers only see an original through [`ReplacementMapping::get`],
//! [`ReplacementMapping::iter`] or restoration.

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use zeroize::Zeroize;

/// Newtype wrapper for an original value that implements the traits `Secret` needs
#[derive(Clone, Zeroize)]
pub struct OriginalValue(String);

impl CloneableSecret for OriginalValue {}
impl DebugSecret for OriginalValue {}
impl SerializableSecret for OriginalValue {}

impl From<String> for OriginalValue {
    fn from(s: String) -> Self {
        OriginalValue(s)
    }
}

impl OriginalValue {
    /// Borrow the original text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for OriginalValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for OriginalValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OriginalValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(OriginalValue)
    }
}

/// Secret container for an original value
pub type SecretOriginal = Secret<OriginalValue>;

/// Placeholder → original lookup scoped to one session
///
/// Serializes as a flat JSON object, e.g. `{"[EMAIL_1]": "jane.doe@example.com"}`.
///
/// # Examples
///
/// ```
/// use veil::guardrail::ReplacementMapping;
///
/// let mut session = ReplacementMapping::new();
/// session.insert("[EMAIL_1]", "old@example.com");
/// session.insert("[PHONE_1]", "415-555-0199");
///
/// let fresh: ReplacementMapping = [("[EMAIL_1]", "new@example.com")].into_iter().collect();
/// session.merge(fresh);
///
/// assert_eq!(session.get("[EMAIL_1]"), Some("new@example.com"));
/// assert_eq!(session.get("[PHONE_1]"), Some("415-555-0199"));
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplacementMapping {
    entries: BTreeMap<String, SecretOriginal>,
}

impl ReplacementMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one entry
    pub fn insert(&mut self, placeholder: impl Into<String>, original: impl Into<String>) {
        self.entries.insert(
            placeholder.into(),
            Secret::new(OriginalValue::from(original.into())),
        );
    }

    /// Look up the original for a placeholder
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.entries
            .get(placeholder)
            .map(|secret| secret.expose_secret().as_str())
    }

    /// Check if a placeholder is mapped
    pub fn contains_key(&self, placeholder: &str) -> bool {
        self.entries.contains_key(placeholder)
    }

    /// Remove a placeholder, returning whether it was present
    pub fn remove(&mut self, placeholder: &str) -> bool {
        self.entries.remove(placeholder).is_some()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the mapping is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate placeholders in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate `(placeholder, original)` pairs in sorted placeholder order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.expose_secret().as_str()))
    }

    /// Merge a newer mapping into this one
    ///
    /// Entries of `newer` override same-key entries; every other existing entry
    /// is retained.
    pub fn merge(&mut self, newer: ReplacementMapping) {
        self.entries.extend(newer.entries);
    }

    /// Clear every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Debug for ReplacementMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplacementMapping")
            .field("placeholders", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PartialEq for ReplacementMapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl Eq for ReplacementMapping {}

impl<K, V> FromIterator<(K, V)> for ReplacementMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = ReplacementMapping::new();
        for (placeholder, original) in iter {
            mapping.insert(placeholder, original);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut mapping = ReplacementMapping::new();
        mapping.insert("[SSN_1]", "123-45-6789");
        assert_eq!(mapping.get("[SSN_1]"), Some("123-45-6789"));
        assert_eq!(mapping.get("[SSN_2]"), None);
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_merge_overrides_and_retains() {
        let mut old: ReplacementMapping =
            [("[EMAIL_1]", "a@example.com"), ("[NAME_1]", "Ada Lovelace")]
                .into_iter()
                .collect();
        let newer: ReplacementMapping = [("[EMAIL_1]", "b@example.com"), ("[PHONE_1]", "4155550199")]
            .into_iter()
            .collect();

        old.merge(newer);

        assert_eq!(old.len(), 3);
        assert_eq!(old.get("[EMAIL_1]"), Some("b@example.com"));
        assert_eq!(old.get("[NAME_1]"), Some("Ada Lovelace"));
        assert_eq!(old.get("[PHONE_1]"), Some("4155550199"));
    }

    #[test]
    fn test_debug_hides_originals() {
        let mapping: ReplacementMapping = [("[PASSWORD_1]", "hunter2")].into_iter().collect();
        let debug_output = format!("{mapping:?}");
        assert!(debug_output.contains("[PASSWORD_1]"));
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_serializes_as_flat_object() {
        let mapping: ReplacementMapping = [("[EMAIL_1]", "jane.doe@example.com")].into_iter().collect();
        let json = serde_json::to_string(&mapping).unwrap();
        assert_eq!(json, r#"{"[EMAIL_1]":"jane.doe@example.com"}"#);

        let parsed: ReplacementMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, mapping);
    }

    #[test]
    fn test_keys_sorted() {
        let mapping: ReplacementMapping = [("[PHONE_1]", "x"), ("[EMAIL_2]", "y"), ("[EMAIL_1]", "z")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = mapping.keys().collect();
        assert_eq!(keys, vec!["[EMAIL_1]", "[EMAIL_2]", "[PHONE_1]"]);
    }
}
