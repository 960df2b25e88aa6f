#![forbid(unsafe_code)]

//! Cancellation for page-lifetime tasks.
//!
//! Timer loops, animation-frame loops and pending async setups hold a
//! [`StopSignal`]; their owner keeps the matching [`StopTrigger`]. Firing or
//! dropping the trigger stops the task the next time it checks the signal.
//!
//! The browser event loop is the only executor, so the shared flag is a plain
//! `Rc<Cell<bool>>`: no locking, no cross-thread use.

use std::cell::Cell;
use std::rc::Rc;

/// Read side of a stop flag, held by the running task.
#[derive(Debug, Clone)]
pub struct StopSignal {
    inner: Rc<Cell<bool>>,
}

impl StopSignal {
    /// Create a new stop signal pair (signal, trigger).
    #[allow(clippy::new_ret_no_self)]
    #[must_use]
    pub fn new() -> (Self, StopTrigger) {
        let inner = Rc::new(Cell::new(false));
        let signal = Self {
            inner: Rc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Check if the stop signal has been triggered.
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.inner.get()
    }
}

/// Write side of a stop flag, held by the task's owner.
///
/// Dropping the trigger stops the task, so a task can never outlive the
/// component that started it.
#[derive(Debug)]
pub struct StopTrigger {
    inner: Rc<Cell<bool>>,
}

impl StopTrigger {
    /// Signal the task to stop.
    pub fn stop(&self) {
        self.inner.set(true);
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.inner.get()
    }

    /// Another read handle onto the same flag.
    #[must_use]
    pub fn signal(&self) -> StopSignal {
        StopSignal {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl Drop for StopTrigger {
    fn drop(&mut self) {
        self.inner.set(true);
    }
}
