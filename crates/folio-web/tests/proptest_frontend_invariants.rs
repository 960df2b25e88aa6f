//! Property tests for the target-independent parts of the web frontend.

use folio_web::Behavior;
use folio_web::renderer::surface_size;
use proptest::prelude::*;

proptest! {
    #[test]
    fn surface_size_never_zero(
        w in -10.0f64..10_000.0,
        h in -10.0f64..10_000.0,
        dpr in -1.0f64..4.0,
    ) {
        let (pw, ph) = surface_size(w, h, dpr);
        prop_assert!(pw >= 1);
        prop_assert!(ph >= 1);
    }

    #[test]
    fn surface_size_scales_with_dpr(w in 1.0f64..4096.0, h in 1.0f64..4096.0) {
        let (w1, h1) = surface_size(w, h, 1.0);
        let (w2, h2) = surface_size(w, h, 2.0);
        prop_assert!(w2 + 1 >= 2 * w1 && w2 <= 2 * w1 + 1);
        prop_assert!(h2 + 1 >= 2 * h1 && h2 <= 2 * h1 + 1);
    }

    #[test]
    fn non_finite_dpr_is_treated_as_one(w in 1.0f64..4096.0, h in 1.0f64..4096.0) {
        prop_assert_eq!(surface_size(w, h, f64::NAN), surface_size(w, h, 1.0));
        prop_assert_eq!(surface_size(w, h, f64::INFINITY), surface_size(w, h, 1.0));
    }
}

#[test]
fn behavior_names_are_unique() {
    let mut names: Vec<_> = Behavior::ALL.iter().map(|b| b.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), Behavior::ALL.len());
}

#[test]
fn native_controller_is_inert() {
    let controller = folio_web::UiEffectsController::new();
    assert!(!controller.is_initialized());
    assert!(controller.installed_behaviors().is_empty());
}
