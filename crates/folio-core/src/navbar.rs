#![forbid(unsafe_code)]

//! Scroll-reactive navbar styling.
//!
//! A pure function of the vertical scroll offset. There is no hysteresis, so
//! an offset oscillating around the threshold flips the class each time.

/// Whether the navbar carries its scrolled presentation at `scroll_y`.
#[must_use]
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Tracks the applied navbar state so the host only touches the DOM on change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavbarStyle {
    threshold: f64,
    applied: Option<bool>,
}

impl NavbarStyle {
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            applied: None,
        }
    }

    /// Feed a scroll offset. Returns the new state when it differs from the
    /// last one applied; the first call always returns a state.
    pub fn update(&mut self, scroll_y: f64) -> Option<bool> {
        let scrolled = is_scrolled(scroll_y, self.threshold);
        if self.applied == Some(scrolled) {
            return None;
        }
        self.applied = Some(scrolled);
        Some(scrolled)
    }

    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.applied.unwrap_or(false)
    }
}
