//! Newsletter popup, shown at most once per browser.
//!
//! The popup is built hidden at start and revealed after a delay unless the
//! storage flag says it was shown before. Closing removes it for the rest of
//! the page's life. The subscribe button has no behavior.

#[cfg(test)]
#[path = "newsletter_test.rs"]
mod newsletter_test;

use log::info;

use crate::consts::{CLASS_NEWSLETTER, CLASS_SHOW};
use crate::host::{EventKind, Host, NodeId, Target};
use crate::page::{Ctx, Task};

const SHOWN_VALUE: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Newsletter {
    popup: NodeId,
    close: NodeId,
}

impl Newsletter {
    /// Build the popup under `<body>` and schedule the reveal.
    pub fn start<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>) -> Option<Self> {
        let body = ctx.host.body()?;
        let newsletter = build(ctx.host);
        ctx.host.append_child(body, newsletter.popup);
        ctx.host.listen(Target::Node(newsletter.close), EventKind::Click);
        let delay = ctx.config.newsletter_delay_ms;
        ctx.after(delay, Task::NewsletterReveal);
        Some(newsletter)
    }

    #[must_use]
    pub fn popup(&self) -> NodeId {
        self.popup
    }

    #[must_use]
    pub fn close_button(&self) -> NodeId {
        self.close
    }

    /// Reveal the popup unless it was shown before or has been closed.
    /// Returns whether it was revealed.
    pub fn try_show<H: Host + ?Sized>(&self, ctx: &mut Ctx<'_, H>) -> bool {
        if !ctx.host.is_connected(self.popup) {
            return false;
        }
        let key = &ctx.config.newsletter_storage_key;
        if ctx.host.storage_get(key).is_some() {
            return false;
        }
        ctx.host.add_class(self.popup, CLASS_SHOW);
        ctx.host.storage_set(key, SHOWN_VALUE);
        info!("newsletter: popup shown");
        true
    }

    /// Remove the popup when its close button is clicked.
    pub fn on_click<H: Host + ?Sized>(&self, ctx: &mut Ctx<'_, H>, node: NodeId) {
        if node == self.close {
            ctx.host.remove(self.popup);
        }
    }
}

fn build<H: Host + ?Sized>(host: &mut H) -> Newsletter {
    let popup = element(host, "div", CLASS_NEWSLETTER, None);
    let content = element(host, "div", "newsletter-content", None);
    host.append_child(popup, content);

    let close = element(host, "button", "close-newsletter", Some("×"));
    let heading = element(host, "h3", "", Some("Stay Updated!"));
    let blurb = element(host, "p", "", Some("Get notified about our special menus and offers"));
    let form = element(host, "div", "newsletter-form", None);
    for child in [close, heading, blurb, form] {
        host.append_child(content, child);
    }

    let input = element(host, "input", "", None);
    host.set_attr(input, "type", "email");
    host.set_attr(input, "placeholder", "Enter your email");
    let subscribe = element(host, "button", "subscribe-btn", Some("Subscribe"));
    host.set_attr(subscribe, "type", "button");
    host.append_child(form, input);
    host.append_child(form, subscribe);

    Newsletter { popup, close }
}

fn element<H: Host + ?Sized>(host: &mut H, tag: &str, class: &str, text: Option<&str>) -> NodeId {
    let node = host.create_element(tag);
    if !class.is_empty() {
        host.add_class(node, class);
    }
    if let Some(text) = text {
        host.set_text(node, text);
    }
    node
}
