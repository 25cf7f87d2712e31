//! Restoration of placeholders back to their originals

use crate::guardrail::models::ReplacementMapping;

/// Replace every literal occurrence of every mapping key with its original
///
/// The input is scanned once, left to right. At each position the longest key
/// that starts there is substituted; substituted values are never scanned again,
/// so the output does not depend on key order even when an original itself
/// contains another placeholder's token. Text that merely looks like a
/// placeholder but is not a key is copied through untouched.
///
/// # Examples
///
/// ```
/// use veil::guardrail::{restore_originals, ReplacementMapping};
///
/// let mapping: ReplacementMapping = [("[EMAIL_1]", "jane.doe@example.com")].into_iter().collect();
/// assert_eq!(
///     restore_originals("Reach [EMAIL_1] for info", &mapping),
///     "Reach jane.doe@example.com for info"
/// );
/// ```
pub fn restore_originals(text: &str, mapping: &ReplacementMapping) -> String {
    if mapping.is_empty() || text.is_empty() {
        return text.to_string();
    }

    let mut keys: Vec<(&str, &str)> = mapping.iter().filter(|(k, _)| !k.is_empty()).collect();
    keys.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut output = String::with_capacity(text.len());
    let mut copied_up_to = 0;
    let mut position = 0;

    while position < text.len() {
        let rest = &text[position..];
        match keys.iter().find(|(key, _)| rest.starts_with(key)) {
            Some((key, original)) => {
                output.push_str(&text[copied_up_to..position]);
                output.push_str(original);
                position += key.len();
                copied_up_to = position;
            }
            None => {
                position += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    output.push_str(&text[copied_up_to..]);
    output
}

/// Check whether at least one mapping key occurs literally in `text`
pub fn has_mappable_placeholders(text: &str, mapping: &ReplacementMapping) -> bool {
    mapping.keys().any(|key| !key.is_empty() && text.contains(key))
}
