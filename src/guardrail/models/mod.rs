//! Guardrail data models

pub mod mapping;
pub mod sensitive_item;

pub use mapping::{OriginalValue, ReplacementMapping, SecretOriginal};
pub use sensitive_item::{GuardrailResult, SensitiveCategory, SensitiveItem};
