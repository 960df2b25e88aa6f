#![forbid(unsafe_code)]

//! Mobile menu toggle and the staggered entrance of nav items.

use crate::config::MenuConfig;
use crate::css;

/// Icon shown on the menu trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuIcon {
    /// Hamburger, shown while the menu is closed.
    Bars,
    /// Close cross, shown while the menu is open.
    Times,
}

impl MenuIcon {
    #[must_use]
    pub fn class(self, cfg: &MenuConfig) -> &str {
        match self {
            Self::Bars => &cfg.closed_icon,
            Self::Times => &cfg.open_icon,
        }
    }

    #[must_use]
    pub const fn for_state(open: bool) -> Self {
        if open { Self::Times } else { Self::Bars }
    }
}

/// Class and icon changes produced by one activation of the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTransition {
    /// New open state of the nav list.
    pub open: bool,
    pub show: MenuIcon,
    pub hide: MenuIcon,
}

/// Open/closed state of the mobile navigation list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MenuToggle {
    open: bool,
}

impl MenuToggle {
    /// Start from the state currently reflected in the DOM.
    #[must_use]
    pub const fn new(open: bool) -> Self {
        Self { open }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the state. Repeated activation alternates open and closed.
    pub fn toggle(&mut self) -> MenuTransition {
        self.open = !self.open;
        let show = MenuIcon::for_state(self.open);
        let hide = MenuIcon::for_state(!self.open);
        MenuTransition {
            open: self.open,
            show,
            hide,
        }
    }
}

/// `animation-delay` value for the nav item at `index`.
#[must_use]
pub fn stagger_delay(index: usize, step_secs: f64) -> String {
    css::seconds(index as f64 * step_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toggle_alternates_state_and_icon() {
        let mut menu = MenuToggle::default();
        assert!(!menu.is_open());

        let t = menu.toggle();
        assert_eq!(
            t,
            MenuTransition {
                open: true,
                show: MenuIcon::Times,
                hide: MenuIcon::Bars,
            }
        );

        let t = menu.toggle();
        assert_eq!(
            t,
            MenuTransition {
                open: false,
                show: MenuIcon::Bars,
                hide: MenuIcon::Times,
            }
        );
    }

    #[test]
    fn starts_from_dom_state() {
        let mut menu = MenuToggle::new(true);
        assert!(menu.is_open());
        assert!(!menu.toggle().open);
    }

    #[test]
    fn icon_classes_come_from_config() {
        let cfg = MenuConfig::default();
        assert_eq!(MenuIcon::Bars.class(&cfg), "fa-bars");
        assert_eq!(MenuIcon::Times.class(&cfg), "fa-times");
    }

    #[test]
    fn stagger_delays_grow_by_step() {
        let delays: Vec<String> = (0..4).map(|i| stagger_delay(i, 0.1)).collect();
        assert_eq!(delays, vec!["0s", "0.1s", "0.2s", "0.3s"]);
    }
}
