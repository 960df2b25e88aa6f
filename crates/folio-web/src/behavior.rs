#![forbid(unsafe_code)]

//! Names of the independently installable page behaviors.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// One page behavior. Each is installed, skipped or failed on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    Menu,
    Navbar,
    NavStagger,
    SmoothScroll,
    Reveal,
    Typewriter,
    Particles,
    Tilt,
    Cursor,
    ScrollSpy,
    ContactForm,
}

impl Behavior {
    /// Installation order.
    pub const ALL: [Self; 11] = [
        Self::Menu,
        Self::Navbar,
        Self::NavStagger,
        Self::SmoothScroll,
        Self::Reveal,
        Self::Typewriter,
        Self::Particles,
        Self::Tilt,
        Self::Cursor,
        Self::ScrollSpy,
        Self::ContactForm,
    ];

    /// Stable name reported to JS.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Navbar => "navbar",
            Self::NavStagger => "navStagger",
            Self::SmoothScroll => "smoothScroll",
            Self::Reveal => "reveal",
            Self::Typewriter => "typewriter",
            Self::Particles => "particles",
            Self::Tilt => "tilt",
            Self::Cursor => "cursor",
            Self::ScrollSpy => "scrollSpy",
            Self::ContactForm => "contactForm",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Withdrawals
// ---------------------------------------------------------------------------

/// Behaviors that reported themselves installed but whose deferred setup
/// (GPU adapter and device acquisition) failed afterwards.
#[derive(Debug, Clone, Default)]
pub struct Withdrawals(Rc<RefCell<Vec<Behavior>>>);

impl Withdrawals {
    /// Handle a deferred setup keeps to withdraw `behavior` later.
    #[must_use]
    pub fn handle(&self, behavior: Behavior) -> Withdrawal {
        Withdrawal {
            behavior,
            set: Rc::downgrade(&self.0),
        }
    }

    #[must_use]
    pub fn contains(&self, behavior: Behavior) -> bool {
        self.0.borrow().contains(&behavior)
    }

    /// `installed` without the withdrawn behaviors, order kept.
    #[must_use]
    pub fn live(&self, installed: &[Behavior]) -> Vec<Behavior> {
        let withdrawn = self.0.borrow();
        installed
            .iter()
            .copied()
            .filter(|b| !withdrawn.contains(b))
            .collect()
    }
}

/// Withdraws one behavior from its [`Withdrawals`]. A no-op once the set is
/// gone (the installation was torn down).
#[derive(Debug, Clone)]
pub struct Withdrawal {
    behavior: Behavior,
    set: Weak<RefCell<Vec<Behavior>>>,
}

impl Withdrawal {
    pub fn withdraw(&self) {
        let Some(set) = self.set.upgrade() else {
            return;
        };
        let mut set = set.borrow_mut();
        if !set.contains(&self.behavior) {
            set.push(self.behavior);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn failed_deferred_setup_leaves_installed_list() {
        let installed = [Behavior::Reveal, Behavior::Particles, Behavior::Tilt];
        let withdrawals = Withdrawals::default();
        let particles = withdrawals.handle(Behavior::Particles);
        assert_eq!(withdrawals.live(&installed), installed.to_vec());

        particles.withdraw();
        particles.withdraw();
        assert!(withdrawals.contains(Behavior::Particles));
        assert_eq!(
            withdrawals.live(&installed),
            vec![Behavior::Reveal, Behavior::Tilt]
        );
    }

    #[test]
    fn withdrawal_after_teardown_is_ignored() {
        let withdrawals = Withdrawals::default();
        let handle = withdrawals.handle(Behavior::Particles);
        drop(withdrawals);
        handle.withdraw();
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<&str> = Behavior::ALL.iter().map(|b| b.name()).collect();
        assert_eq!(names.len(), Behavior::ALL.len());
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Behavior::ScrollSpy.to_string(), "scrollSpy");
    }
}
