#![forbid(unsafe_code)]

//! Custom cursor follower.
//!
//! The dot snaps to every pointer sample; the outline is animated toward the
//! same point by the host. Hover state over interactive elements is tracked
//! with an enter/leave depth so nested interactive elements (a link inside a
//! card) do not clear the state while the pointer is still inside the outer
//! one.

use crate::css;

/// Style updates for one pointer move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorMove {
    pub left: String,
    pub top: String,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct CursorFollower {
    position: Option<(f64, f64)>,
    hover_depth: u32,
}

impl CursorFollower {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_move(&mut self, client_x: f64, client_y: f64) -> CursorMove {
        self.position = Some((client_x, client_y));
        CursorMove {
            left: css::px(client_x),
            top: css::px(client_y),
        }
    }

    /// Last pointer sample, if any.
    #[must_use]
    pub const fn position(&self) -> Option<(f64, f64)> {
        self.position
    }

    /// Pointer entered an interactive element. Returns `Some(true)` when the
    /// hover class should be added.
    pub fn on_enter(&mut self) -> Option<bool> {
        self.hover_depth += 1;
        (self.hover_depth == 1).then_some(true)
    }

    /// Pointer left an interactive element. Returns `Some(false)` when the
    /// hover class should be removed. Unbalanced leaves are ignored.
    pub fn on_leave(&mut self) -> Option<bool> {
        if self.hover_depth == 0 {
            return None;
        }
        self.hover_depth -= 1;
        (self.hover_depth == 0).then_some(false)
    }

    #[must_use]
    pub const fn is_hovering(&self) -> bool {
        self.hover_depth > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn move_mirrors_pointer_in_px() {
        let mut c = CursorFollower::new();
        assert_eq!(c.position(), None);
        assert_eq!(
            c.on_move(12.0, 340.5),
            CursorMove {
                left: "12px".into(),
                top: "340.5px".into(),
            }
        );
        assert_eq!(c.position(), Some((12.0, 340.5)));
    }

    #[test]
    fn hover_toggles_on_single_element() {
        let mut c = CursorFollower::new();
        assert_eq!(c.on_enter(), Some(true));
        assert!(c.is_hovering());
        assert_eq!(c.on_leave(), Some(false));
        assert!(!c.is_hovering());
    }

    #[test]
    fn nested_elements_keep_hover() {
        let mut c = CursorFollower::new();
        assert_eq!(c.on_enter(), Some(true)); // card
        assert_eq!(c.on_enter(), None); // link inside card
        assert_eq!(c.on_leave(), None); // back on the card
        assert!(c.is_hovering());
        assert_eq!(c.on_leave(), Some(false));
    }

    #[test]
    fn unbalanced_leave_is_ignored() {
        let mut c = CursorFollower::new();
        assert_eq!(c.on_leave(), None);
        assert_eq!(c.on_enter(), Some(true));
    }
}
