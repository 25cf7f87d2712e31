//! Redaction of accepted items into placeholder text

use crate::guardrail::models::{ReplacementMapping, SensitiveItem};

/// Replace every non-ignored item's span with its placeholder
///
/// Splicing runs from the highest start offset to the lowest over a single copy
/// of `text`, so earlier offsets stay valid. Items with an empty, inverted or
/// out-of-bounds range, a range not on a char boundary, or a range overlapping
/// one already spliced are skipped. An empty or fully ignored list returns `text`
/// unchanged.
pub fn apply_replacements(text: &str, items: &[SensitiveItem]) -> String {
    let mut active: Vec<&SensitiveItem> = items.iter().filter(|item| !item.ignored).collect();
    if active.is_empty() {
        return text.to_string();
    }

    active.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut output = text.to_string();
    // Lowest start spliced so far; anything reaching past it would overlap.
    let mut boundary = text.len();

    for item in active {
        if item.start >= item.end
            || item.end > text.len()
            || !text.is_char_boundary(item.start)
            || !text.is_char_boundary(item.end)
        {
            tracing::debug!(id = %item.id, start = item.start, end = item.end, "Skipping item with invalid range");
            continue;
        }

        if item.end > boundary {
            tracing::debug!(id = %item.id, "Skipping item overlapping a replaced range");
            continue;
        }

        output.replace_range(item.start..item.end, &item.placeholder);
        boundary = item.start;
    }

    output
}

/// Build the placeholder → original mapping for non-ignored items
pub fn build_replacement_mapping(items: &[SensitiveItem]) -> ReplacementMapping {
    items
        .iter()
        .filter(|item| !item.ignored)
        .map(|item| (item.placeholder.clone(), item.original.clone()))
        .collect()
}
