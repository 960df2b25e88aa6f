#![forbid(unsafe_code)]

//! One-shot fade-in reveal.
//!
//! The host registers each qualifying element with a [`RevealTracker`] and
//! forwards intersection callbacks by slot. The first intersecting report for
//! a slot yields [`RevealAction::RevealAndUnobserve`]; every later report for
//! that slot is ignored, so an element is revealed at most once.

use crate::config::RevealConfig;
use crate::css;

/// Index assigned to an observed element.
pub type RevealSlot = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// What the host should do in response to an intersection report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Apply the revealed style and stop observing the element.
    RevealAndUnobserve,
    Ignore,
}

#[derive(Debug, Default, Clone)]
pub struct RevealTracker {
    states: Vec<RevealState>,
}

impl RevealTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hidden element and return its slot.
    pub fn observe(&mut self) -> RevealSlot {
        self.states.push(RevealState::Hidden);
        self.states.len() - 1
    }

    /// Handle one intersection report. Unknown slots are ignored.
    pub fn on_intersection(&mut self, slot: RevealSlot, is_intersecting: bool) -> RevealAction {
        let Some(state) = self.states.get_mut(slot) else {
            return RevealAction::Ignore;
        };
        if *state == RevealState::Hidden && is_intersecting {
            *state = RevealState::Revealed;
            RevealAction::RevealAndUnobserve
        } else {
            RevealAction::Ignore
        }
    }

    #[must_use]
    pub fn state(&self, slot: RevealSlot) -> Option<RevealState> {
        self.states.get(slot).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of elements still waiting for their first intersection.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.states
            .iter()
            .filter(|s| **s == RevealState::Hidden)
            .count()
    }
}

/// Inline style declarations applied to an element before it is observed.
#[must_use]
pub fn hidden_declarations(cfg: &RevealConfig) -> [(&'static str, String); 3] {
    [
        ("opacity", "0".to_string()),
        (
            "transform",
            format!("translateY({})", css::px(cfg.hidden_offset_px)),
        ),
        ("transition", cfg.transition.clone()),
    ]
}

/// Inline style declarations applied on reveal.
pub const REVEALED_DECLARATIONS: [(&str, &str); 2] =
    [("opacity", "1"), ("transform", "translateY(0)")];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn first_intersection_reveals() {
        let mut tracker = RevealTracker::new();
        let slot = tracker.observe();
        assert_eq!(tracker.state(slot), Some(RevealState::Hidden));
        assert_eq!(
            tracker.on_intersection(slot, true),
            RevealAction::RevealAndUnobserve
        );
        assert_eq!(tracker.state(slot), Some(RevealState::Revealed));
    }

    #[test]
    fn reentry_is_ignored() {
        let mut tracker = RevealTracker::new();
        let slot = tracker.observe();
        tracker.on_intersection(slot, true);
        assert_eq!(tracker.on_intersection(slot, false), RevealAction::Ignore);
        assert_eq!(tracker.on_intersection(slot, true), RevealAction::Ignore);
    }

    #[test]
    fn non_intersecting_report_keeps_hidden() {
        let mut tracker = RevealTracker::new();
        let slot = tracker.observe();
        assert_eq!(tracker.on_intersection(slot, false), RevealAction::Ignore);
        assert_eq!(tracker.pending(), 1);
    }

    #[test]
    fn slots_are_independent() {
        let mut tracker = RevealTracker::new();
        let a = tracker.observe();
        let b = tracker.observe();
        tracker.on_intersection(b, true);
        assert_eq!(tracker.state(a), Some(RevealState::Hidden));
        assert_eq!(tracker.pending(), 1);
        assert_eq!(tracker.len(), 2);
    }

    #[test]
    fn unknown_slot_ignored() {
        let mut tracker = RevealTracker::new();
        assert!(tracker.is_empty());
        assert_eq!(tracker.on_intersection(3, true), RevealAction::Ignore);
    }

    #[test]
    fn hidden_style_matches_defaults() {
        let decls = hidden_declarations(&RevealConfig::default());
        assert_eq!(decls[0], ("opacity", "0".to_string()));
        assert_eq!(decls[1], ("transform", "translateY(30px)".to_string()));
        assert_eq!(
            decls[2].1,
            "opacity 0.8s ease-out, transform 0.8s cubic-bezier(0.2, 0, 0.2, 1)"
        );
    }
}
