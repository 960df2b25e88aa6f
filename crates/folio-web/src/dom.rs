#![forbid(unsafe_code)]

//! Small DOM helpers: scoped event listeners, queries, inline styles.

use std::any::Any;

use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, Window,
};

use crate::behavior::{Behavior, Withdrawal, Withdrawals};

/// Everything an installer needs to reach the page.
pub struct Page {
    pub window: Window,
    pub document: Document,
}

impl Page {
    pub fn current() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self { window, document })
    }

    /// First element matching `selector`. An invalid selector matches nothing.
    pub fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                tracing::debug!(target: "folio::dom", selector, error = ?err, "invalid selector");
                None
            }
        }
    }

    /// Every element matching `selector`, in document order.
    pub fn query_all(&self, selector: &str) -> Vec<Element> {
        let list = match self.document.query_selector_all(selector) {
            Ok(list) => list,
            Err(err) => {
                tracing::debug!(target: "folio::dom", selector, error = ?err, "invalid selector");
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    pub fn viewport(&self) -> (f64, f64) {
        viewport(&self.window)
    }
}

/// `innerWidth` × `innerHeight` in CSS pixels.
pub fn viewport(window: &Window) -> (f64, f64) {
    let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (read(window.inner_width()), read(window.inner_height()))
}

/// Set one inline style property. Non-HTML elements are left untouched.
pub fn set_style(el: &Element, property: &str, value: &str) -> Result<(), JsValue> {
    match el.dyn_ref::<HtmlElement>() {
        Some(html) => html.style().set_property(property, value),
        None => Ok(()),
    }
}

/// Resolve once the document has been parsed (`DOMContentLoaded`).
pub async fn document_ready(document: &Document) -> Result<(), JsValue> {
    let state = Reflect::get(document, &JsValue::from_str("readyState"))?.as_string();
    if state.as_deref() != Some("loading") {
        return Ok(());
    }
    let mut listen_error = None;
    let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        if let Err(err) = document.add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            &resolve,
            &options,
        ) {
            listen_error = Some(err);
        }
    });
    if let Some(err) = listen_error {
        return Err(err);
    }
    JsFuture::from(promise).await.map(|_| ())
}

// ---------------------------------------------------------------------------
// Listeners and teardown
// ---------------------------------------------------------------------------

/// An event listener that is removed when dropped.
pub struct EventListener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Owns whatever keeps an installed behavior alive. Dropping it tears the
/// behavior down (listeners removed, loops cancelled, observers disconnected).
#[derive(Default)]
pub struct Teardown {
    held: Vec<Box<dyn Any>>,
    withdrawals: Withdrawals,
}

impl Teardown {
    pub fn hold<T: 'static>(&mut self, item: T) {
        self.held.push(Box::new(item));
    }

    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// For behaviors that finish setting up after their installer returned.
    pub fn withdrawal(&self, behavior: Behavior) -> Withdrawal {
        self.withdrawals.handle(behavior)
    }

    pub fn withdrawals(&self) -> &Withdrawals {
        &self.withdrawals
    }
}
