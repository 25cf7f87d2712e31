// Veil - Reversible Sensitive-Information Guardrail
// Copyright (c) 2025 Veil Contributors
// Licensed under the MIT License

//! # Veil - Reversible Sensitive-Information Guardrail
//!
//! Veil finds personally identifying and secret information in free text before
//! it leaves the user's control, swaps each finding for a placeholder token such
//! as `[EMAIL_1]`, and puts the originals back into whatever text comes back.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** sensitive spans with an ordered, data-driven rule library
//! - **Redacting** the spans the user did not choose to ignore
//! - **Restoring** originals into returned text from a replacement mapping
//! - **Revealing** originals per display surface, hidden by default
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`guardrail`] - Detection, redaction, restoration, reveal and audit
//! - [`domain`] - Error types and identifiers
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use veil::guardrail::{build_replacement_mapping, detect, restore_originals};
//!
//! let result = detect("Contact me at jane.doe@example.com or call 415-555-0199");
//! assert_eq!(
//!     result.anonymized_text,
//!     "Contact me at [EMAIL_1] or call [PHONE_1]"
//! );
//!
//! let mapping = build_replacement_mapping(&result.items);
//! let reply = "I will email [EMAIL_1] today.";
//! assert_eq!(
//!     restore_originals(reply, &mapping),
//!     "I will email jane.doe@example.com today."
//! );
//! ```
//!
//! ## Sessions
//!
//! A [`guardrail::GuardrailEngine`] drives the user's decision and accumulates
//! mappings in a [`guardrail::GuardrailSession`]:
//!
//! ```rust
//! use veil::guardrail::{GuardrailConfig, GuardrailEngine, GuardrailSession};
//!
//! # fn example() -> anyhow::Result<()> {
//! let engine = GuardrailEngine::new(GuardrailConfig::default())?;
//! let mut session = GuardrailSession::new();
//!
//! let mut decision = engine.begin("My SSN is 123-45-6789");
//! decision.set_ignored("ssn-10-21", true);
//! let outbound = engine.confirm(decision, &mut session)?;
//!
//! assert_eq!(outbound, "My SSN is 123-45-6789");
//! assert!(session.mapping().is_empty());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Error Handling
//!
//! Only construction can fail. Malformed rule libraries and invalid configuration
//! surface as [`domain::VeilError::Configuration`]; detection, redaction and
//! restoration are total over every input.
//!
//! ## Logging
//!
//! Veil uses structured logging with the `tracing` crate. Events carry categories,
//! counts, offsets and placeholders, never original values.

pub mod cli;
pub mod config;
pub mod domain;
pub mod guardrail;
pub mod logging;
