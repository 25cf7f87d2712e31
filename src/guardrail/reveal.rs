//! Per-surface reveal state
//!
//! Every displayed text unit starts HIDDEN and shows its placeholder text. Only an
//! explicit toggle on that one surface moves it to REVEALED, where it shows the
//! restored originals. Session-level events force every surface back to HIDDEN.

use super::models::ReplacementMapping;
use super::restore::{has_mappable_placeholders, restore_originals};
use crate::domain::SurfaceId;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

/// Display state of one surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealState {
    /// Placeholder text is shown
    #[default]
    Hidden,
    /// Restored originals are shown
    Revealed,
}

impl fmt::Display for RevealState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hidden => write!(f, "hidden"),
            Self::Revealed => write!(f, "revealed"),
        }
    }
}

/// Tracks which surfaces are revealed
///
/// Surfaces absent from the set are HIDDEN, so a controller never needs to be told
/// about a surface before it is rendered.
#[derive(Debug, Clone)]
pub struct RevealController<K = SurfaceId>
where
    K: Eq + Hash,
{
    revealed: HashSet<K>,
}

impl<K: Eq + Hash> Default for RevealController<K> {
    fn default() -> Self {
        Self {
            revealed: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> RevealController<K> {
    /// Create a controller with every surface hidden
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a surface
    pub fn state(&self, surface: &K) -> RevealState {
        if self.revealed.contains(surface) {
            RevealState::Revealed
        } else {
            RevealState::Hidden
        }
    }

    /// Check if a surface is revealed
    pub fn is_revealed(&self, surface: &K) -> bool {
        self.revealed.contains(surface)
    }

    /// Flip one surface, returning its new state
    pub fn toggle(&mut self, surface: &K) -> RevealState {
        if self.revealed.remove(surface) {
            RevealState::Hidden
        } else {
            self.revealed.insert(surface.clone());
            RevealState::Revealed
        }
    }

    /// Force one surface hidden
    pub fn hide(&mut self, surface: &K) {
        self.revealed.remove(surface);
    }

    /// Force every surface hidden
    pub fn hide_all(&mut self) {
        if !self.revealed.is_empty() {
            tracing::debug!(surfaces = self.revealed.len(), "Hiding all revealed surfaces");
        }
        self.revealed.clear();
    }

    /// Number of surfaces currently revealed
    pub fn revealed_count(&self) -> usize {
        self.revealed.len()
    }

    /// Text a surface should display
    ///
    /// Borrowed placeholder text while hidden; restored text while revealed.
    pub fn render<'a>(&self, surface: &K, text: &'a str, mapping: &ReplacementMapping) -> Cow<'a, str> {
        match self.state(surface) {
            RevealState::Hidden => Cow::Borrowed(text),
            RevealState::Revealed => Cow::Owned(restore_originals(text, mapping)),
        }
    }

    /// Whether a reveal control should be offered for `text`
    pub fn can_reveal(&self, text: &str, mapping: &ReplacementMapping) -> bool {
        has_mappable_placeholders(text, mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping() -> ReplacementMapping {
        [("[EMAIL_1]", "jane.doe@example.com")].into_iter().collect()
    }

    #[test]
    fn test_default_hidden() {
        let controller: RevealController = RevealController::new();
        let surface = SurfaceId::message(0);
        assert_eq!(controller.state(&surface), RevealState::Hidden);
        assert_eq!(
            controller.render(&surface, "Reach [EMAIL_1]", &mapping()),
            "Reach [EMAIL_1]"
        );
    }

    #[test]
    fn test_toggle_flips_one_surface() {
        let mut controller = RevealController::new();
        let first = SurfaceId::message(0);
        let second = SurfaceId::message(1);

        assert_eq!(controller.toggle(&first), RevealState::Revealed);
        assert!(controller.is_revealed(&first));
        assert!(!controller.is_revealed(&second));
        assert_eq!(
            controller.render(&first, "Reach [EMAIL_1]", &mapping()),
            "Reach jane.doe@example.com"
        );
        assert_eq!(
            controller.render(&second, "Reach [EMAIL_1]", &mapping()),
            "Reach [EMAIL_1]"
        );

        assert_eq!(controller.toggle(&first), RevealState::Hidden);
        assert_eq!(controller.revealed_count(), 0);
    }

    #[test]
    fn test_hide_all() {
        let mut controller: RevealController<&str> = RevealController::new();
        controller.toggle(&"a");
        controller.toggle(&"b");
        assert_eq!(controller.revealed_count(), 2);

        controller.hide_all();
        assert_eq!(controller.state(&"a"), RevealState::Hidden);
        assert_eq!(controller.state(&"b"), RevealState::Hidden);
    }

    #[test]
    fn test_hide_single() {
        let mut controller: RevealController<u32> = RevealController::new();
        controller.toggle(&1);
        controller.toggle(&2);
        controller.hide(&1);
        assert!(!controller.is_revealed(&1));
        assert!(controller.is_revealed(&2));
    }

    #[test]
    fn test_can_reveal() {
        let controller: RevealController = RevealController::new();
        assert!(controller.can_reveal("Reach [EMAIL_1]", &mapping()));
        assert!(!controller.can_reveal("Reach [EMAIL_1]", &ReplacementMapping::new()));
        assert!(!controller.can_reveal("nothing to map", &mapping()));
    }
}
