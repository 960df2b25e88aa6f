#![forbid(unsafe_code)]

//! Mobile menu toggle and nav item stagger.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::EffectsConfig;
use folio_core::menu::{MenuToggle, stagger_delay};
use wasm_bindgen::JsValue;

use crate::dom::{EventListener, Page, Teardown, set_style};

pub fn install_toggle(
    page: &Page,
    cfg: &EffectsConfig,
    teardown: &mut Teardown,
) -> Result<bool, JsValue> {
    let (Some(trigger), Some(links)) = (
        page.query(&cfg.selectors.menu_toggle),
        page.query(&cfg.selectors.nav_links),
    ) else {
        return Ok(false);
    };

    let menu_cfg = cfg.menu.clone();
    let icon_selector = cfg.selectors.menu_icon.clone();
    let state = Rc::new(RefCell::new(MenuToggle::new(
        links.class_list().contains(&menu_cfg.open_class),
    )));

    let icon_host = trigger.clone();
    let listener = EventListener::new(&trigger, "click", move |_event| {
        let transition = state.borrow_mut().toggle();
        if let Err(err) = links
            .class_list()
            .toggle_with_force(&menu_cfg.open_class, transition.open)
        {
            tracing::debug!(target: "folio::menu", error = ?err, "class toggle failed");
        }
        if let Ok(Some(icon)) = icon_host.query_selector(&icon_selector) {
            let classes = icon.class_list();
            let _ = classes.remove_1(transition.hide.class(&menu_cfg));
            let _ = classes.add_1(transition.show.class(&menu_cfg));
        }
    })?;
    teardown.hold(listener);
    Ok(true)
}

pub fn install_stagger(
    page: &Page,
    cfg: &EffectsConfig,
    _teardown: &mut Teardown,
) -> Result<bool, JsValue> {
    let items = page.query_all(&cfg.selectors.nav_items);
    if items.is_empty() {
        return Ok(false);
    }
    for (index, item) in items.iter().enumerate() {
        set_style(
            item,
            "animation-delay",
            &stagger_delay(index, cfg.menu.stagger_step_secs),
        )?;
    }
    Ok(true)
}
