#![forbid(unsafe_code)]

//! 3D tilt on hover for cards.

use folio_core::EffectsConfig;
use folio_core::tilt::{CardRect, neutral_css, tilt_for_pointer};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::MouseEvent;

use crate::dom::{EventListener, Page, Teardown, set_style};

pub fn install(page: &Page, cfg: &EffectsConfig, teardown: &mut Teardown) -> Result<bool, JsValue> {
    let cards = page.query_all(&cfg.selectors.tilt_cards);
    if cards.is_empty() {
        return Ok(false);
    }

    for card in cards {
        let tilt_cfg = cfg.tilt.clone();
        let el = card.clone();
        let on_move = EventListener::new(&card, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let r = el.get_bounding_client_rect();
            let rect = CardRect {
                left: r.left(),
                top: r.top(),
                width: r.width(),
                height: r.height(),
            };
            let tilt = tilt_for_pointer(
                rect,
                f64::from(mouse.client_x()),
                f64::from(mouse.client_y()),
                &tilt_cfg,
            );
            let _ = set_style(&el, "transform", &tilt.to_css(tilt_cfg.perspective_px));
        })?;

        let neutral = neutral_css(cfg.tilt.perspective_px);
        let el = card.clone();
        let on_leave = EventListener::new(&card, "mouseleave", move |_event| {
            let _ = set_style(&el, "transform", &neutral);
        })?;

        teardown.hold(on_move);
        teardown.hold(on_leave);
    }
    Ok(true)
}
