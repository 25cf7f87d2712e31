//! Anonymization of detected items
//!
//! Allocates typed placeholders during a scan, splices them into text, and builds
//! the mapping needed to reverse the substitution later.

pub mod placeholder;
pub mod redaction;

pub use placeholder::{format_placeholder, PlaceholderAllocator};
pub use redaction::{apply_replacements, build_replacement_mapping};
