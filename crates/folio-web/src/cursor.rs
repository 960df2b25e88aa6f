#![forbid(unsafe_code)]

//! Custom cursor: snapping dot, trailing outline, hover state.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::EffectsConfig;
use folio_core::cursor::CursorFollower;
use js_sys::{Array, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, KeyframeAnimationOptions, MouseEvent};

use crate::dom::{EventListener, Page, Teardown, set_style};

/// `{ duration, fill: "forwards" }`.
fn trail_options(duration_ms: f64) -> Result<KeyframeAnimationOptions, JsValue> {
    let options = Object::new();
    Reflect::set(&options, &"duration".into(), &JsValue::from_f64(duration_ms))?;
    Reflect::set(&options, &"fill".into(), &"forwards".into())?;
    Ok(options.unchecked_into())
}

/// Single keyframe `{ left, top }`.
fn trail_keyframes(left: &str, top: &str) -> Result<Object, JsValue> {
    let frame = Object::new();
    Reflect::set(&frame, &"left".into(), &left.into())?;
    Reflect::set(&frame, &"top".into(), &top.into())?;
    let frames = Array::new();
    frames.push(&frame);
    Ok(frames.into())
}

fn toggle_hover(outline: &Element, class: &str, on: Option<bool>) {
    if let Some(on) = on {
        let _ = outline.class_list().toggle_with_force(class, on);
    }
}

pub fn install(page: &Page, cfg: &EffectsConfig, teardown: &mut Teardown) -> Result<bool, JsValue> {
    let (Some(dot), Some(outline)) = (
        page.query(&cfg.selectors.cursor_dot),
        page.query(&cfg.selectors.cursor_outline),
    ) else {
        return Ok(false);
    };

    let follower = Rc::new(RefCell::new(CursorFollower::new()));
    let options = trail_options(cfg.cursor.trail_ms)?;

    let on_move = {
        let follower = Rc::clone(&follower);
        let outline = outline.clone();
        EventListener::new(&page.window, "mousemove", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pos = follower
                .borrow_mut()
                .on_move(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
            let _ = set_style(&dot, "left", &pos.left);
            let _ = set_style(&dot, "top", &pos.top);
            if let Ok(frames) = trail_keyframes(&pos.left, &pos.top) {
                outline.animate_with_keyframe_animation_options(Some(&frames), &options);
            }
        })?
    };
    teardown.hold(on_move);

    let hover_class = cfg.cursor.hover_class.clone();
    for el in page.query_all(&cfg.selectors.interactive) {
        let enter = {
            let follower = Rc::clone(&follower);
            let outline = outline.clone();
            let class = hover_class.clone();
            EventListener::new(&el, "mouseenter", move |_event| {
                let change = follower.borrow_mut().on_enter();
                toggle_hover(&outline, &class, change);
            })?
        };
        let leave = {
            let follower = Rc::clone(&follower);
            let outline = outline.clone();
            let class = hover_class.clone();
            EventListener::new(&el, "mouseleave", move |_event| {
                let change = follower.borrow_mut().on_leave();
                toggle_hover(&outline, &class, change);
            })?
        };
        teardown.hold(enter);
        teardown.hold(leave);
    }
    Ok(true)
}
