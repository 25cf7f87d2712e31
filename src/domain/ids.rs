//! Domain identifier types with validation
//!
//! Newtype wrappers keep session identifiers and display-surface identifiers from
//! being mixed up, and reject empty values at construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Session identifier newtype wrapper
///
/// Identifies the conversation or single-shot exchange that owns a
/// replacement mapping.
///
/// # Examples
///
/// ```
/// use veil::domain::ids::SessionId;
/// use std::str::FromStr;
///
/// let session_id = SessionId::from_str("chat-42").unwrap();
/// assert_eq!(session_id.as_str(), "chat-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Creates a new SessionId from a string
    ///
    /// # Arguments
    ///
    /// * `id` - The session identifier string
    ///
    /// # Returns
    ///
    /// Returns `Ok(SessionId)` if the ID is valid, `Err` otherwise
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Session ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a random session identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the session ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SessionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Display surface identifier
///
/// One displayed text unit (a chat message, a translation pane, a summary box)
/// whose reveal state is tracked independently of every other surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SurfaceId(String);

impl SurfaceId {
    /// Creates a new SurfaceId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Surface ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Builds the identifier of the n-th message in a history
    pub fn message(index: usize) -> Self {
        Self(format!("message-{index}"))
    }

    /// Returns the surface ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SurfaceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for SurfaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
