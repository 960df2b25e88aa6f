//! Property-based invariant tests for the scroll and pointer effects.
//!
//! Verifies:
//! 1. Navbar: offsets above the threshold are scrolled, all others are not
//! 2. Navbar: NavbarStyle reports a change only when the state flips
//! 3. Reveal: each slot yields RevealAndUnobserve at most once
//! 4. Tilt: rotation never exceeds the configured maximum on either axis
//! 5. Tilt: the card center has zero rotation
//! 6. Scroll-spy: the result equals the last qualifying section in order, or
//!    the empty id when none qualifies
//! 7. Cursor: hover depth never goes negative and the class state matches depth
//! 8. Particles: every generated coordinate lies inside the cube

use folio_core::config::TiltConfig;
use folio_core::cursor::CursorFollower;
use folio_core::navbar::{NavbarStyle, is_scrolled};
use folio_core::particles::ParticleField;
use folio_core::reveal::{RevealAction, RevealTracker};
use folio_core::scrollspy::active_section;
use folio_core::tilt::{CardRect, tilt_for_pointer};
use proptest::prelude::*;

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_rect() -> impl Strategy<Value = CardRect> {
    (-500.0f64..500.0, -500.0f64..500.0, 1.0f64..800.0, 1.0f64..800.0).prop_map(
        |(left, top, width, height)| CardRect {
            left,
            top,
            width,
            height,
        },
    )
}

fn arb_sections() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::vec(("[a-z]{1,8}", 0.0f64..10_000.0), 0..10)
}

proptest! {
    #[test]
    fn navbar_threshold_partition(y in -1000.0f64..10_000.0) {
        prop_assert_eq!(is_scrolled(y, 50.0), y > 50.0);
    }

    #[test]
    fn navbar_reports_only_flips(ys in prop::collection::vec(0.0f64..200.0, 1..50)) {
        let mut nav = NavbarStyle::new(50.0);
        let mut last: Option<bool> = None;
        for y in ys {
            let expected = is_scrolled(y, 50.0);
            let change = nav.update(y);
            if last == Some(expected) {
                prop_assert_eq!(change, None);
            } else {
                prop_assert_eq!(change, Some(expected));
            }
            last = Some(expected);
        }
    }
}

proptest! {
    #[test]
    fn reveal_fires_at_most_once(
        slots in 1usize..8,
        reports in prop::collection::vec((0usize..8, any::<bool>()), 0..100),
    ) {
        let mut tracker = RevealTracker::new();
        for _ in 0..slots {
            tracker.observe();
        }
        let mut fired = vec![0u32; 8];
        for (slot, hit) in reports {
            if tracker.on_intersection(slot, hit) == RevealAction::RevealAndUnobserve {
                fired[slot] += 1;
            }
        }
        prop_assert!(fired.iter().all(|n| *n <= 1));
        prop_assert!(fired[slots..].iter().all(|n| *n == 0));
    }
}

proptest! {
    #[test]
    fn tilt_is_bounded(rect in arb_rect(), x in -2000.0f64..2000.0, y in -2000.0f64..2000.0, max in 0.0f64..45.0) {
        let cfg = TiltConfig { max_deg: max, ..TiltConfig::default() };
        let t = tilt_for_pointer(rect, x, y, &cfg);
        prop_assert!(t.rotate_x_deg.abs() <= max);
        prop_assert!(t.rotate_y_deg.abs() <= max);
    }

    #[test]
    fn tilt_center_is_flat(rect in arb_rect()) {
        let cx = rect.left + rect.width / 2.0;
        let cy = rect.top + rect.height / 2.0;
        let t = tilt_for_pointer(rect, cx, cy, &TiltConfig::default());
        prop_assert!(t.rotate_x_deg.abs() < 1e-9);
        prop_assert!(t.rotate_y_deg.abs() < 1e-9);
    }
}

proptest! {
    #[test]
    fn scrollspy_last_match_wins(sections in arb_sections(), scroll in 0.0f64..12_000.0, lookahead in 0.0f64..400.0) {
        let expected = sections
            .iter()
            .filter(|(_, top)| scroll >= top - lookahead)
            .map(|(id, _)| id.as_str())
            .last()
            .unwrap_or("");
        let got = active_section(
            sections.iter().map(|(id, top)| (Some(id.as_str()), *top)),
            scroll,
            lookahead,
        );
        prop_assert_eq!(got, expected);
    }
}

proptest! {
    #[test]
    fn cursor_hover_depth_consistent(ops in prop::collection::vec(any::<bool>(), 0..60)) {
        let mut cursor = CursorFollower::new();
        let mut depth: u32 = 0;
        for enter in ops {
            if enter {
                let change = cursor.on_enter();
                depth += 1;
                prop_assert_eq!(change, (depth == 1).then_some(true));
            } else {
                let change = cursor.on_leave();
                if depth == 0 {
                    prop_assert_eq!(change, None);
                } else {
                    depth -= 1;
                    prop_assert_eq!(change, (depth == 0).then_some(false));
                }
            }
            prop_assert_eq!(cursor.is_hovering(), depth > 0);
        }
    }
}

proptest! {
    #[test]
    fn particles_inside_cube(count in 1u32..512, spread in 0.1f32..50.0, seed in any::<u64>()) {
        let field = ParticleField::generate(count, spread, seed);
        prop_assert_eq!(field.len(), count as usize);
        let half = spread / 2.0;
        prop_assert!(field.positions().iter().all(|c| c.abs() <= half));
    }
}
