//! In-memory guardrail session
//!
//! Holds the session-scoped mapping accumulated across confirmations and the
//! reveal state of every surface displayed in that session. Persisting either is
//! left to the caller; the mapping serializes as a flat JSON object.

use super::decision::ConfirmedRedaction;
use super::models::ReplacementMapping;
use super::reveal::{RevealController, RevealState};
use crate::domain::{SessionId, SurfaceId};
use std::borrow::Cow;

/// Session-scoped mapping and reveal state
#[derive(Debug, Clone)]
pub struct GuardrailSession {
    id: SessionId,
    mapping: ReplacementMapping,
    reveal: RevealController<SurfaceId>,
}

impl GuardrailSession {
    /// Start an empty session with a generated id
    pub fn new() -> Self {
        Self::with_id(SessionId::generate())
    }

    /// Start an empty session with a known id
    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            mapping: ReplacementMapping::new(),
            reveal: RevealController::new(),
        }
    }

    /// Resume a session from a previously stored mapping
    pub fn resume(id: SessionId, mapping: ReplacementMapping) -> Self {
        Self {
            id,
            mapping,
            reveal: RevealController::new(),
        }
    }

    /// Session identifier
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Accumulated mapping
    pub fn mapping(&self) -> &ReplacementMapping {
        &self.mapping
    }

    /// Merge a confirmation's mapping and hide every surface
    ///
    /// Same-key entries from the confirmation replace older ones; all other
    /// entries are kept.
    pub fn apply_confirmation(&mut self, confirmed: &ConfirmedRedaction) {
        self.mapping.merge(confirmed.mapping.clone());
        self.reveal.hide_all();

        tracing::debug!(
            session_id = %self.id,
            merged = confirmed.mapping.len(),
            total = self.mapping.len(),
            "Applied confirmation to session mapping"
        );
    }

    /// Flip one surface between hidden and revealed
    pub fn toggle_reveal(&mut self, surface: &SurfaceId) -> RevealState {
        self.reveal.toggle(surface)
    }

    /// Reveal state of one surface
    pub fn reveal_state(&self, surface: &SurfaceId) -> RevealState {
        self.reveal.state(surface)
    }

    /// Text a surface should display in its current state
    pub fn display<'a>(&self, surface: &SurfaceId, text: &'a str) -> Cow<'a, str> {
        self.reveal.render(surface, text, &self.mapping)
    }

    /// Whether a reveal control should be offered for `text`
    pub fn can_reveal(&self, text: &str) -> bool {
        self.reveal.can_reveal(text, &self.mapping)
    }

    /// The view was cleared; every surface returns to hidden
    pub fn clear_view(&mut self) {
        self.reveal.hide_all();
    }

    /// The surface switched mode; every surface returns to hidden
    pub fn switch_mode(&mut self) {
        self.reveal.hide_all();
    }
}

impl Default for GuardrailSession {
    fn default() -> Self {
        Self::new()
    }
}
