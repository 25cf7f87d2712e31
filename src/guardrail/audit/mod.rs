//! Audit logging module
//!
//! Records confirmed redactions with SHA-256 hashes in place of original values.

pub mod logger;

pub use logger::AuditLogger;
