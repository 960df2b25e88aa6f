#![forbid(unsafe_code)]

//! Browser console sink for the tracing layer.

use folio_core::logging::{ConsoleLayer, ConsoleSink};
use tracing::Level;
use tracing_subscriber::prelude::*;
use wasm_bindgen::JsValue;

/// Routes each line to the console method matching its level.
pub struct BrowserConsole;

impl ConsoleSink for BrowserConsole {
    fn write_line(&self, level: Level, line: &str) {
        let line = JsValue::from_str(line);
        match level {
            Level::ERROR => web_sys::console::error_1(&line),
            Level::WARN => web_sys::console::warn_1(&line),
            Level::INFO => web_sys::console::info_1(&line),
            _ => web_sys::console::debug_1(&line),
        }
    }
}

/// Install the console layer as the global subscriber.
///
/// Only the first call per page takes effect; returns whether this call did.
pub fn install_logging(max_level: Level) -> bool {
    let subscriber =
        tracing_subscriber::registry().with(ConsoleLayer::new(BrowserConsole).max_level(max_level));
    tracing::subscriber::set_global_default(subscriber).is_ok()
}
