//! Navigation controller.
//!
//! Menu links scroll to their section instead of navigating, the navbar
//! tracks scroll offset and direction, and the link for the section in view
//! is marked active.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use log::debug;

use crate::consts::{
    ABOUT_TARGET, ALL_NAV_LINKS, CLASS_ACTIVE, CLASS_HERO, CLASS_MENU_SECTION, CONTACT_SECTION, HERO, HOME_LINK,
    MENU_SECTION, NAV_LINKS, TRACKED_SECTIONS,
};
use crate::event::Outcome;
use crate::host::{EventKind, Host, NodeId, Observer, ObserverOptions, Target};
use crate::navbar::{Navbar, Source};
use crate::page::Ctx;

/// Link text that the active-section tracker looks for on the menu link.
const MENU_LINK_TEXT: &str = "MENUS";

/// Section selector for a navigation link's visible text.
///
/// Matching is exact and case-sensitive on the trimmed text.
#[must_use]
pub fn section_for_link(text: &str) -> Option<&'static str> {
    match text.trim() {
        "HOME" => Some(HERO),
        "MENUS" => Some(MENU_SECTION),
        "ABOUT US" => Some(ABOUT_TARGET),
        "CONTACT" => Some(CONTACT_SECTION),
        _ => None,
    }
}

/// Smooth-scroll so `node` sits just below the fixed header.
pub fn scroll_to_node<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>, node: NodeId) {
    let top = ctx.host.offset_top(node) - ctx.config.nav_offset_px;
    debug!("nav: smooth scroll to {top}");
    ctx.host.smooth_scroll_to(top);
}

#[must_use]
pub fn section_observer_options() -> ObserverOptions {
    ObserverOptions { threshold: 0.3, root_margin: "-20% 0px -20% 0px".to_owned() }
}

#[derive(Debug, Clone, Default)]
pub struct Navigation {
    links: Vec<NodeId>,
    sections: Vec<NodeId>,
    last_scroll_y: f64,
}

impl Navigation {
    pub fn start<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>) -> Self {
        let links = ctx.host.query_all(NAV_LINKS);
        for link in &links {
            ctx.host.listen(Target::Node(*link), EventKind::Click);
        }
        ctx.host.listen(Target::Window, EventKind::Scroll);

        let sections = ctx.host.query_all(TRACKED_SECTIONS);
        let options = section_observer_options();
        for section in &sections {
            ctx.host.observe(Observer::Sections, *section, &options);
        }

        Self { links, sections, last_scroll_y: ctx.host.scroll_y() }
    }

    #[must_use]
    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    #[must_use]
    pub fn sections(&self) -> &[NodeId] {
        &self.sections
    }

    /// Handle a click on a navigation link. Unknown text is a no-op.
    pub fn on_click<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId) -> Outcome {
        if !self.links.contains(&node) {
            return Outcome::default();
        }
        let text = ctx.host.text(node);
        let Some(selector) = section_for_link(&text) else {
            return Outcome::default();
        };
        let Some(section) = ctx.host.query(selector) else {
            return Outcome::default();
        };
        scroll_to_node(ctx, section);
        Outcome::prevent()
    }

    pub fn on_scroll<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, navbar: &mut Navbar) {
        let y = ctx.host.scroll_y();
        navbar.set_scrolled(ctx.host, y > ctx.config.scrolled_threshold_px);
        let hide = y > self.last_scroll_y && y > ctx.config.hide_threshold_px;
        navbar.set_hidden(ctx.host, hide, Source::Scroll);
        self.last_scroll_y = y;
    }

    /// Mark the link for a section that scrolled into view.
    pub fn on_intersection<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, section: NodeId, intersecting: bool) {
        if !intersecting || !self.sections.contains(&section) {
            return;
        }
        let all_links = ctx.host.query_all(ALL_NAV_LINKS);
        for link in &all_links {
            ctx.host.remove_class(*link, CLASS_ACTIVE);
        }

        let active = if ctx.host.has_class(section, CLASS_HERO) {
            ctx.host.query(HOME_LINK)
        } else if ctx.host.has_class(section, CLASS_MENU_SECTION) {
            all_links.into_iter().find(|link| ctx.host.text(*link).contains(MENU_LINK_TEXT))
        } else {
            None
        };
        if let Some(link) = active {
            ctx.host.add_class(link, CLASS_ACTIVE);
        }
    }
}
