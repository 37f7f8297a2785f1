//! Navbar visual state with a single writer.
//!
//! Both the scroll-direction heuristic ([`crate::nav`]) and the swipe gesture
//! ([`crate::mobile`]) want to hide or show the navbar. They go through
//! [`Navbar::set_hidden`], which applies one precedence rule: while a touch is
//! in progress, scroll-driven changes are dropped and the swipe decided at
//! touch end wins.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use log::debug;

use crate::consts::{CLASS_NAV_HIDDEN, CLASS_SCROLLED, NAVBAR};
use crate::host::{Host, NodeId};

/// Who is asking to change navbar visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Scroll,
    Swipe,
}

#[derive(Debug, Clone, Default)]
pub struct Navbar {
    node: Option<NodeId>,
    scrolled: bool,
    hidden: bool,
    touch_active: bool,
}

impl Navbar {
    /// Bind to the page's `.nav-bar`, if present.
    pub fn attach<H: Host + ?Sized>(host: &mut H) -> Self {
        Self { node: host.query(NAVBAR), ..Self::default() }
    }

    #[must_use]
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    #[must_use]
    pub fn touch_active(&self) -> bool {
        self.touch_active
    }

    pub fn begin_touch(&mut self) {
        self.touch_active = true;
    }

    pub fn end_touch(&mut self) {
        self.touch_active = false;
    }

    pub fn set_scrolled<H: Host + ?Sized>(&mut self, host: &mut H, scrolled: bool) {
        let Some(node) = self.node else {
            return;
        };
        self.scrolled = scrolled;
        if scrolled {
            host.add_class(node, CLASS_SCROLLED);
        } else {
            host.remove_class(node, CLASS_SCROLLED);
        }
    }

    /// Hide or show the navbar. Returns whether the request was applied.
    pub fn set_hidden<H: Host + ?Sized>(&mut self, host: &mut H, hidden: bool, source: Source) -> bool {
        let Some(node) = self.node else {
            return false;
        };
        if source == Source::Scroll && self.touch_active {
            debug!("navbar: scroll visibility change deferred to swipe");
            return false;
        }
        self.hidden = hidden;
        if hidden {
            host.add_class(node, CLASS_NAV_HIDDEN);
        } else {
            host.remove_class(node, CLASS_NAV_HIDDEN);
        }
        true
    }
}
