#![forbid(unsafe_code)]

//! Smooth scrolling for in-page anchor links.

/// Classification of an intercepted link's `href`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorHref<'a> {
    /// The bare `#`: default jump is cancelled and nothing else happens.
    Root,
    /// `#id`, carrying the id without the hash.
    Fragment(&'a str),
    /// Anything not starting with `#`; left to the browser.
    External,
}

impl<'a> AnchorHref<'a> {
    #[must_use]
    pub fn classify(href: &'a str) -> Self {
        match href.strip_prefix('#') {
            None => Self::External,
            Some("") => Self::Root,
            Some(id) => Self::Fragment(id),
        }
    }
}

/// Document-space scroll offset that places the target just below the navbar.
///
/// `target_top` is the target's top edge relative to the viewport (as
/// reported by `getBoundingClientRect`), `page_offset` the current vertical
/// scroll position.
#[must_use]
pub fn scroll_offset(target_top: f64, page_offset: f64, nav_height: f64) -> f64 {
    target_top + page_offset - nav_height
}
