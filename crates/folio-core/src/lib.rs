#![forbid(unsafe_code)]

//! `folio-core` holds the host-independent half of the portfolio page effects.
//!
//! Design goals:
//! - **Host-driven**: the embedding layer (the `folio-web` crate) reads the
//!   DOM, forwards events and applies the returned style/class changes.
//! - **Deterministic**: timers, clocks and random seeds come from the host,
//!   so every state machine can be driven step by step in tests.
//! - **No DOM, no threads**: builds on native targets and on
//!   `wasm32-unknown-unknown`.
//!
//! Each module covers one page behavior:
//!
//! | Module | Behavior |
//! |---|---|
//! | [`menu`] | mobile menu toggle, staggered nav entrance |
//! | [`navbar`] | scrolled navbar styling |
//! | [`anchor`] | smooth in-page anchor scrolling |
//! | [`reveal`] | one-shot fade-in on intersection |
//! | [`typewriter`] | typing/deleting word cycler |
//! | [`particles`] | particle field, camera and frame uniforms |
//! | [`tilt`] | 3D tilt on hover |
//! | [`cursor`] | custom cursor follower |
//! | [`scrollspy`] | active nav link for the scrolled section |
//! | [`contact`] | contact form relay state |

pub mod anchor;
pub mod config;
pub mod contact;
pub mod css;
pub mod cursor;
pub mod lifecycle;
pub mod logging;
pub mod menu;
pub mod navbar;
pub mod particles;
pub mod reveal;
pub mod scrollspy;
pub mod tilt;
pub mod typewriter;

pub use config::{ConfigError, EffectsConfig};
pub use lifecycle::{StopSignal, StopTrigger};
