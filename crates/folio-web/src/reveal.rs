#![forbid(unsafe_code)]

//! Fade-in reveal driven by an `IntersectionObserver`.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::EffectsConfig;
use folio_core::reveal::{REVEALED_DECLARATIONS, RevealAction, RevealTracker, hidden_declarations};
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::dom::{Page, Teardown, set_style};

/// Disconnects the observer when dropped.
struct ObserverGuard {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn install(page: &Page, cfg: &EffectsConfig, teardown: &mut Teardown) -> Result<bool, JsValue> {
    let elements = page.query_all(&cfg.selectors.reveal_targets);
    if elements.is_empty() {
        return Ok(false);
    }

    let tracker = Rc::new(RefCell::new(RevealTracker::new()));
    let observed: Rc<Vec<Element>> = Rc::new(elements);

    let callback = {
        let tracker = Rc::clone(&tracker);
        let observed = Rc::clone(&observed);
        Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let target = entry.target();
                    let Some(slot) = observed.iter().position(|el| *el == target) else {
                        continue;
                    };
                    let action = tracker
                        .borrow_mut()
                        .on_intersection(slot, entry.is_intersecting());
                    if action == RevealAction::RevealAndUnobserve {
                        for (property, value) in REVEALED_DECLARATIONS {
                            let _ = set_style(&target, property, value);
                        }
                        observer.unobserve(&target);
                    }
                }
            },
        )
    };

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(cfg.reveal.threshold));
    init.set_root_margin(&cfg.reveal.root_margin);
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

    let hidden = hidden_declarations(&cfg.reveal);
    for el in observed.iter() {
        for (property, value) in &hidden {
            set_style(el, property, value)?;
        }
        tracker.borrow_mut().observe();
        observer.observe(el);
    }

    teardown.hold(ObserverGuard {
        observer,
        _callback: callback,
    });
    Ok(true)
}
