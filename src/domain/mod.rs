//! Domain types for Veil.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`SessionId`], [`SurfaceId`])
//! - **Error types** ([`VeilError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, VeilError>`]:
//!
//! ```rust
//! use veil::domain::Result;
//! use veil::guardrail::PatternRegistry;
//!
//! fn example() -> Result<()> {
//!     let registry = PatternRegistry::default_rules()?;
//!     assert!(!registry.is_empty());
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::VeilError;
pub use ids::{SessionId, SurfaceId};
pub use result::Result;
