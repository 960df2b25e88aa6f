#![forbid(unsafe_code)]

//! Typewriter text driven by a self-rescheduling timeout.

use folio_core::EffectsConfig;
use folio_core::typewriter::Typewriter;
use wasm_bindgen::JsValue;

use crate::dom::{Page, Teardown};
use crate::scheduler::TimeoutLoop;

pub fn install(page: &Page, cfg: &EffectsConfig, teardown: &mut Teardown) -> Result<bool, JsValue> {
    let Some(el) = page.query(&cfg.selectors.typing_text) else {
        return Ok(false);
    };
    let mut typewriter = Typewriter::new(cfg.typewriter.words.clone(), cfg.typewriter.timings())
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let timer = TimeoutLoop::start(&page.window, move || {
        let step = typewriter.tick();
        el.set_text_content(Some(step.text));
        Some(step.delay)
    })?;
    teardown.hold(timer);
    Ok(true)
}
