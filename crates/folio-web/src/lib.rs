#![forbid(unsafe_code)]

//! WASM frontend for the folio page effects.
//!
//! This crate is intentionally host-specific (web/WASM). It exposes a single
//! `wasm-bindgen` object, `UiEffectsController`, which:
//! - waits for the document to be parsed,
//! - installs each page behavior independently (a missing element disables
//!   only its own behavior),
//! - renders the particle field with WebGPU,
//! - tears everything down again on `destroy()`.
//!
//! All state machines and math live in `folio-core`; the modules here only
//! read the DOM, forward events and apply the returned changes.

pub mod behavior;
pub mod renderer;

pub use behavior::Behavior;

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod contact;
#[cfg(target_arch = "wasm32")]
mod cursor;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod menu;
#[cfg(target_arch = "wasm32")]
mod particles;
#[cfg(target_arch = "wasm32")]
mod reveal;
#[cfg(target_arch = "wasm32")]
mod scheduler;
#[cfg(target_arch = "wasm32")]
mod scroll;
#[cfg(target_arch = "wasm32")]
mod tilt;
#[cfg(target_arch = "wasm32")]
mod typing;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::UiEffectsController;

/// Native builds compile this crate as a stub so `cargo check --workspace` stays
/// green on non-wasm targets.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct UiEffectsController;

#[cfg(not(target_arch = "wasm32"))]
impl UiEffectsController {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }

    /// There is no DOM to attach to outside the browser.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        false
    }

    #[must_use]
    pub fn installed_behaviors(&self) -> Vec<&'static str> {
        Vec::new()
    }
}
