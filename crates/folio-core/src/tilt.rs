#![forbid(unsafe_code)]

//! Tilt-on-hover for cards.
//!
//! The pointer's offset from the card center, normalized by the half extents,
//! maps linearly to a rotation of at most `max_deg` on each axis. Pointer
//! positions outside the rect (possible when events lag behind layout) are
//! clamped so the bound always holds.

use crate::config::TiltConfig;
use crate::css;

/// Card bounds in client coordinates, as reported by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// 3D orientation of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x_deg: f64,
    pub rotate_y_deg: f64,
    pub scale: f64,
}

impl Tilt {
    pub const NEUTRAL: Self = Self {
        rotate_x_deg: 0.0,
        rotate_y_deg: 0.0,
        scale: 1.0,
    };

    /// CSS `transform` value for this tilt.
    #[must_use]
    pub fn to_css(&self, perspective_px: f64) -> String {
        let scale = css::number(self.scale);
        format!(
            "perspective({}) rotateX({}) rotateY({}) scale3d({scale}, {scale}, {scale})",
            css::px(perspective_px),
            css::deg(self.rotate_x_deg),
            css::deg(self.rotate_y_deg),
        )
    }
}

/// Tilt for a pointer at client `(x, y)` over `rect`.
///
/// Pointer below center tips the top edge away (negative X rotation); pointer
/// right of center turns the card right (positive Y rotation). A degenerate
/// rect yields [`Tilt::NEUTRAL`].
#[must_use]
pub fn tilt_for_pointer(rect: CardRect, x: f64, y: f64, cfg: &TiltConfig) -> Tilt {
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    if !(half_w > 0.0 && half_h > 0.0) {
        return Tilt::NEUTRAL;
    }
    let dx = ((x - rect.left - half_w) / half_w).clamp(-1.0, 1.0);
    let dy = ((y - rect.top - half_h) / half_h).clamp(-1.0, 1.0);
    Tilt {
        rotate_x_deg: dy * -cfg.max_deg,
        rotate_y_deg: dx * cfg.max_deg,
        scale: cfg.hover_scale,
    }
}

/// Transform applied when the pointer leaves a card.
#[must_use]
pub fn neutral_css(perspective_px: f64) -> String {
    format!(
        "perspective({}) rotateX(0) rotateY(0) scale3d(1, 1, 1)",
        css::px(perspective_px)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RECT: CardRect = CardRect {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 100.0,
    };

    #[test]
    fn center_has_no_rotation() {
        let t = tilt_for_pointer(RECT, 200.0, 100.0, &TiltConfig::default());
        assert_eq!(t.rotate_x_deg, 0.0);
        assert_eq!(t.rotate_y_deg, 0.0);
        assert_eq!(t.scale, 1.02);
    }

    #[test]
    fn corners_reach_the_maximum() {
        let cfg = TiltConfig::default();
        let top_left = tilt_for_pointer(RECT, 100.0, 50.0, &cfg);
        assert_eq!(top_left.rotate_x_deg, 10.0);
        assert_eq!(top_left.rotate_y_deg, -10.0);
        let bottom_right = tilt_for_pointer(RECT, 300.0, 150.0, &cfg);
        assert_eq!(bottom_right.rotate_x_deg, -10.0);
        assert_eq!(bottom_right.rotate_y_deg, 10.0);
    }

    #[test]
    fn outside_pointer_is_clamped() {
        let t = tilt_for_pointer(RECT, 1000.0, -500.0, &TiltConfig::default());
        assert_eq!(t.rotate_y_deg, 10.0);
        assert_eq!(t.rotate_x_deg, 10.0);
    }

    #[test]
    fn zero_size_rect_is_neutral() {
        let rect = CardRect {
            width: 0.0,
            ..RECT
        };
        assert_eq!(
            tilt_for_pointer(rect, 0.0, 0.0, &TiltConfig::default()),
            Tilt::NEUTRAL
        );
    }

    #[test]
    fn hover_css_format() {
        let t = tilt_for_pointer(RECT, 150.0, 75.0, &TiltConfig::default());
        assert_eq!(
            t.to_css(1000.0),
            "perspective(1000px) rotateX(5deg) rotateY(-5deg) scale3d(1.02, 1.02, 1.02)"
        );
    }

    #[test]
    fn neutral_css_matches_reset_transform() {
        assert_eq!(
            neutral_css(1000.0),
            "perspective(1000px) rotateX(0) rotateY(0) scale3d(1, 1, 1)"
        );
    }
}
