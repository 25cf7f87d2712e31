//! Placeholder allocation

use std::collections::HashMap;

/// Per-scan placeholder allocator - issues `[PREFIX_N]` tokens
///
/// Each prefix has its own counter starting at 1. An allocator belongs to a single
/// detection pass; two passes never share one.
#[derive(Debug, Default)]
pub struct PlaceholderAllocator {
    counters: HashMap<String, usize>,
}

impl PlaceholderAllocator {
    /// Create a new allocator with every counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next placeholder for a prefix
    pub fn allocate(&mut self, prefix: &str) -> String {
        let counter = self.counters.entry(prefix.to_string()).or_insert(0);
        *counter += 1;
        format_placeholder(prefix, *counter)
    }
}

/// Render a placeholder token
pub fn format_placeholder(prefix: &str, index: usize) -> String {
    format!("[{prefix}_{index}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_per_prefix() {
        let mut allocator = PlaceholderAllocator::new();
        assert_eq!(allocator.allocate("EMAIL"), "[EMAIL_1]");
        assert_eq!(allocator.allocate("PHONE"), "[PHONE_1]");
        assert_eq!(allocator.allocate("EMAIL"), "[EMAIL_2]");
        assert_eq!(allocator.allocate("SSN"), "[SSN_1]");
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut first = PlaceholderAllocator::new();
        let mut second = PlaceholderAllocator::new();
        first.allocate("NAME");
        first.allocate("NAME");
        assert_eq!(second.allocate("NAME"), "[NAME_1]");
    }

    #[test]
    fn test_uniqueness_over_many() {
        let mut allocator = PlaceholderAllocator::new();
        let tokens: Vec<String> = (0..50).map(|_| allocator.allocate("API_KEY")).collect();
        let expected: Vec<String> = (1..=50).map(|i| format_placeholder("API_KEY", i)).collect();
        assert_eq!(tokens, expected);
    }
}
