#![forbid(unsafe_code)]

use folio_core::EffectsConfig;
use js_sys::Array;
use wasm_bindgen::prelude::*;

use crate::behavior::Behavior;
use crate::console::install_logging;
use crate::dom::{Page, Teardown, document_ready};
use crate::{contact, cursor, menu, particles, reveal, scroll, tilt, typing};

type Installer = fn(&Page, &EffectsConfig, &mut Teardown) -> Result<bool, JsValue>;

fn installer(behavior: Behavior) -> Installer {
    match behavior {
        Behavior::Menu => menu::install_toggle,
        Behavior::Navbar => scroll::install_navbar,
        Behavior::NavStagger => menu::install_stagger,
        Behavior::SmoothScroll => scroll::install_smooth_scroll,
        Behavior::Reveal => reveal::install,
        Behavior::Typewriter => typing::install,
        Behavior::Particles => particles::install,
        Behavior::Tilt => tilt::install,
        Behavior::Cursor => cursor::install,
        Behavior::ScrollSpy => scroll::install_scroll_spy,
        Behavior::ContactForm => contact::install,
    }
}

/// Options object (or nothing) to a validated config.
fn parse_options(options: Option<JsValue>) -> Result<EffectsConfig, JsValue> {
    let json = match options {
        Some(value) if !value.is_undefined() && !value.is_null() => js_sys::JSON::stringify(&value)?
            .as_string()
            .unwrap_or_else(|| "{}".to_string()),
        _ => "{}".to_string(),
    };
    EffectsConfig::from_json_str(&json).map_err(|err| JsValue::from_str(&err.to_string()))
}

/// Installed page effects.
///
/// Every behavior is installed on its own: an element that is missing from
/// the page disables only the behavior that needs it.
struct Installation {
    installed: Vec<Behavior>,
    // Dropping this removes listeners, cancels loops and stops the field.
    teardown: Teardown,
}

/// Page effects controller exposed to JS.
#[wasm_bindgen]
pub struct UiEffectsController {
    installation: Option<Installation>,
}

#[wasm_bindgen]
impl UiEffectsController {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self { installation: None }
    }

    /// Wait for the document to be parsed, then install every behavior.
    ///
    /// Calling `init` again tears the previous installation down first.
    /// Rejects only on invalid options or when there is no window/document.
    pub async fn init(&mut self, options: Option<JsValue>) -> Result<(), JsValue> {
        let cfg = parse_options(options)?;
        let level = cfg
            .max_log_level()
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        install_logging(level);

        let page = Page::current()?;
        document_ready(&page.document).await?;
        self.destroy();

        let mut teardown = Teardown::default();
        let mut installed = Vec::new();
        for behavior in Behavior::ALL {
            match installer(behavior)(&page, &cfg, &mut teardown) {
                Ok(true) => {
                    tracing::debug!(target: "folio::controller", behavior = behavior.name(), "behavior installed");
                    installed.push(behavior);
                }
                Ok(false) => {
                    tracing::debug!(target: "folio::controller", behavior = behavior.name(), "behavior skipped");
                }
                Err(err) => {
                    tracing::warn!(target: "folio::controller", behavior = behavior.name(), error = ?err, "behavior failed to install");
                }
            }
        }

        tracing::info!(
            target: "folio::controller",
            installed = installed.len(),
            held = teardown.len(),
            "controller initialized"
        );
        self.installation = Some(Installation {
            installed,
            teardown,
        });
        Ok(())
    }

    /// Remove every listener, stop every loop and release the GPU surface.
    pub fn destroy(&mut self) {
        if self.installation.take().is_some() {
            tracing::info!(target: "folio::controller", "controller destroyed");
        }
    }

    #[wasm_bindgen(js_name = isInitialized)]
    pub fn is_initialized(&self) -> bool {
        self.installation.is_some()
    }

    /// Names of the behaviors the last `init` installed, in install order.
    ///
    /// The particle field drops out of this list if its GPU setup fails
    /// after `init` resolved.
    #[wasm_bindgen(js_name = installedBehaviors)]
    pub fn installed_behaviors(&self) -> Array {
        let Some(installation) = &self.installation else {
            return Array::new();
        };
        installation
            .teardown
            .withdrawals()
            .live(&installation.installed)
            .into_iter()
            .map(|behavior| JsValue::from_str(behavior.name()))
            .collect()
    }
}

impl Default for UiEffectsController {
    fn default() -> Self {
        Self::new()
    }
}
