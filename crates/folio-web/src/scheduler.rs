#![forbid(unsafe_code)]

//! Cancellable timer and animation-frame loops.
//!
//! Both loops re-arm themselves from inside their own callback. The callback
//! lives in a shared slot and only holds a weak reference to it, so dropping
//! the loop handle frees the closure. Drop also cancels the pending browser
//! timer and fires the stop signal, so a callback that is already queued
//! returns without running.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use folio_core::lifecycle::{StopSignal, StopTrigger};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

type Slot<F> = Rc<RefCell<Option<Closure<F>>>>;

// ---------------------------------------------------------------------------
// setTimeout loop
// ---------------------------------------------------------------------------

/// A self-rescheduling `setTimeout` chain.
///
/// `step` runs once right away (on the next task) and then again after
/// whatever delay it returns. Returning `None` ends the loop.
pub struct TimeoutLoop {
    window: Window,
    trigger: StopTrigger,
    handle: Rc<Cell<Option<i32>>>,
    _slot: Slot<dyn FnMut()>,
}

impl TimeoutLoop {
    pub fn start<F>(window: &Window, mut step: F) -> Result<Self, JsValue>
    where
        F: FnMut() -> Option<Duration> + 'static,
    {
        let (signal, trigger) = StopSignal::new();
        let slot: Slot<dyn FnMut()> = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let weak: Weak<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::downgrade(&slot);
        let win = window.clone();
        let pending = Rc::clone(&handle);
        let callback = Closure::<dyn FnMut()>::new(move || {
            pending.set(None);
            if signal.is_stopped() {
                return;
            }
            let Some(delay) = step() else {
                return;
            };
            let Some(slot) = weak.upgrade() else {
                return;
            };
            if let Some(cb) = slot.borrow().as_ref() {
                match arm_timeout(&win, cb, delay) {
                    Ok(id) => pending.set(Some(id)),
                    Err(err) => tracing::warn!(target: "folio::scheduler", error = ?err, "failed to re-arm timer"),
                }
            }
        });

        let first = arm_timeout(window, &callback, Duration::ZERO)?;
        handle.set(Some(first));
        *slot.borrow_mut() = Some(callback);

        Ok(Self {
            window: window.clone(),
            trigger,
            handle,
            _slot: slot,
        })
    }
}

fn arm_timeout(window: &Window, cb: &Closure<dyn FnMut()>, delay: Duration) -> Result<i32, JsValue> {
    let ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), ms)
}

impl Drop for TimeoutLoop {
    fn drop(&mut self) {
        self.trigger.stop();
        if let Some(id) = self.handle.take() {
            self.window.clear_timeout_with_handle(id);
        }
    }
}

// ---------------------------------------------------------------------------
// requestAnimationFrame loop
// ---------------------------------------------------------------------------

/// A `requestAnimationFrame` loop. `frame` receives the frame timestamp in
/// milliseconds (same clock as `performance.now()`) and returns whether to
/// keep going.
pub struct FrameLoop {
    window: Window,
    trigger: StopTrigger,
    handle: Rc<Cell<Option<i32>>>,
    _slot: Slot<dyn FnMut(f64)>,
}

impl FrameLoop {
    pub fn start<F>(window: &Window, mut frame: F) -> Result<Self, JsValue>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        let (signal, trigger) = StopSignal::new();
        let slot: Slot<dyn FnMut(f64)> = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let weak: Weak<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::downgrade(&slot);
        let win = window.clone();
        let pending = Rc::clone(&handle);
        let callback = Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            pending.set(None);
            if signal.is_stopped() || !frame(now) {
                return;
            }
            let Some(slot) = weak.upgrade() else {
                return;
            };
            if let Some(cb) = slot.borrow().as_ref() {
                match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => pending.set(Some(id)),
                    Err(err) => tracing::warn!(target: "folio::scheduler", error = ?err, "failed to request frame"),
                }
            }
        });

        let first = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
        handle.set(Some(first));
        *slot.borrow_mut() = Some(callback);

        Ok(Self {
            window: window.clone(),
            trigger,
            handle,
            _slot: slot,
        })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.trigger.stop();
        if let Some(id) = self.handle.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
    }
}
