#![forbid(unsafe_code)]

//! Scroll-driven behaviors: navbar styling, scroll-spy and smooth anchors.

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::EffectsConfig;
use folio_core::anchor::{AnchorHref, scroll_offset};
use folio_core::navbar::NavbarStyle;
use folio_core::scrollspy::{active_section, link_is_active};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, ScrollBehavior, ScrollToOptions, Window};

use crate::dom::{EventListener, Page, Teardown};

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn install_navbar(
    page: &Page,
    cfg: &EffectsConfig,
    teardown: &mut Teardown,
) -> Result<bool, JsValue> {
    let Some(navbar) = page.query(&cfg.selectors.navbar) else {
        return Ok(false);
    };
    let class = cfg.navbar.scrolled_class.clone();
    let style = Rc::new(RefCell::new(NavbarStyle::new(cfg.navbar.scrolled_threshold)));
    let window = page.window.clone();

    let listener = EventListener::new(&page.window, "scroll", move |_event| {
        let change = style.borrow_mut().update(scroll_y(&window));
        if let Some(scrolled) = change {
            let _ = navbar.class_list().toggle_with_force(&class, scrolled);
        }
    })?;
    teardown.hold(listener);
    Ok(true)
}

pub fn install_scroll_spy(
    page: &Page,
    cfg: &EffectsConfig,
    teardown: &mut Teardown,
) -> Result<bool, JsValue> {
    let sections: Vec<HtmlElement> = page
        .query_all(&cfg.selectors.sections)
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let links = page.query_all(&cfg.selectors.spy_links);
    if sections.is_empty() || links.is_empty() {
        return Ok(false);
    }

    let lookahead = cfg.scroll_spy.lookahead;
    let active_class = cfg.scroll_spy.active_class.clone();
    let window = page.window.clone();

    let listener = EventListener::new(&page.window, "scroll", move |_event| {
        let ids: Vec<String> = sections.iter().map(|s| s.id()).collect();
        let current = active_section(
            ids.iter()
                .zip(&sections)
                .map(|(id, s)| (Some(id.as_str()), f64::from(s.offset_top()))),
            scroll_y(&window),
            lookahead,
        );
        for link in &links {
            let href = link.get_attribute("href").unwrap_or_default();
            let _ = link
                .class_list()
                .toggle_with_force(&active_class, link_is_active(&href, current));
        }
    })?;
    teardown.hold(listener);
    Ok(true)
}

pub fn install_smooth_scroll(
    page: &Page,
    cfg: &EffectsConfig,
    teardown: &mut Teardown,
) -> Result<bool, JsValue> {
    let anchors = page.query_all(&cfg.selectors.in_page_anchors);
    if anchors.is_empty() {
        return Ok(false);
    }

    let nav_height = cfg.anchor.nav_height;
    for anchor in anchors {
        let window = page.window.clone();
        let document = page.document.clone();
        let link = anchor.clone();
        let listener = EventListener::new(&anchor, "click", move |event| {
            let href = link.get_attribute("href").unwrap_or_default();
            let id = match AnchorHref::classify(&href) {
                AnchorHref::External => return,
                AnchorHref::Root => {
                    event.prevent_default();
                    return;
                }
                AnchorHref::Fragment(id) => id,
            };
            event.prevent_default();
            let Some(target) = document.get_element_by_id(id) else {
                return;
            };
            let top = scroll_offset(
                target.get_bounding_client_rect().top(),
                window.page_y_offset().unwrap_or(0.0),
                nav_height,
            );
            let options = ScrollToOptions::new();
            options.set_top(top);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })?;
        teardown.hold(listener);
    }
    Ok(true)
}
