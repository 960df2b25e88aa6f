#![forbid(unsafe_code)]

//! Scroll-spy navigation highlight.

/// Id of the last section (in document order) whose top, minus `lookahead`,
/// is at or above `scroll_y`.
///
/// Sections are `(id, offset_top)` pairs; a section without an id counts as
/// an empty id. Returns `""` when no section qualifies.
#[must_use]
pub fn active_section<'a, I>(sections: I, scroll_y: f64, lookahead: f64) -> &'a str
where
    I: IntoIterator<Item = (Option<&'a str>, f64)>,
{
    let mut current = "";
    for (id, top) in sections {
        if scroll_y >= top - lookahead {
            current = id.unwrap_or("");
        }
    }
    current
}

/// Whether a nav link with `href` should be marked active for `current`.
///
/// Matching is by containment, so an empty `current` (nothing reached yet)
/// marks every link active.
#[must_use]
pub fn link_is_active(href: &str, current: &str) -> bool {
    href.contains(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<(Option<&'static str>, f64)> {
        vec![
            (Some("home"), 0.0),
            (Some("about"), 800.0),
            (Some("contact"), 1600.0),
        ]
    }

    #[test]
    fn resolves_second_section() {
        assert_eq!(active_section(sections(), 850.0, 200.0), "about");
    }

    #[test]
    fn lookahead_activates_early() {
        assert_eq!(active_section(sections(), 600.0, 200.0), "about");
        assert_eq!(active_section(sections(), 599.0, 200.0), "home");
    }

    #[test]
    fn last_match_wins() {
        assert_eq!(active_section(sections(), 5000.0, 200.0), "contact");
    }

    #[test]
    fn nothing_qualifies_marks_every_link() {
        let s = vec![(Some("about"), 900.0), (Some("contact"), 1800.0)];
        let current = active_section(s, 0.0, 200.0);
        assert_eq!(current, "");
        let active: Vec<bool> = ["#about", "#contact"]
            .iter()
            .map(|href| link_is_active(href, current))
            .collect();
        assert_eq!(active, vec![true, true]);
    }

    #[test]
    fn anonymous_section_clears_current() {
        let s = vec![(Some("a"), 0.0), (None, 100.0), (Some(""), 50.0)];
        assert_eq!(active_section(s, 500.0, 0.0), "");
    }

    #[test]
    fn link_matching_uses_containment() {
        assert!(link_is_active("#about", "about"));
        assert!(link_is_active("/index.html#about", "about"));
        assert!(!link_is_active("#home", "about"));
        assert!(link_is_active("#about", ""));
    }
}
