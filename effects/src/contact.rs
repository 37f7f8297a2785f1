//! Booking buttons and contact link tracking.
//!
//! A booking click shows a toast, switches the button into a disabled
//! loading state, and once the delay elapses opens the WhatsApp deep link and
//! restores the button. Contact links (`tel:` / `mailto:`) only announce the
//! app being opened; their default action is left alone.

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

use std::collections::HashMap;
use std::fmt;

use log::info;

use crate::consts::{BOOKING_BUTTONS, BOOKING_LABEL, BOOKING_TOAST, CONTACT_LINKS};
use crate::host::{EventKind, Host, NodeId, Target};
use crate::page::{Ctx, Task};
use crate::toast::{self, ToastKind};

const BOOKING_TARGET: &str = "_blank";

/// Per-button booking state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BookingState {
    #[default]
    Idle,
    /// Waiting to open the deep link; holds the label to restore.
    Booking { label: String },
}

/// App a contact link hands off to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Phone,
    Email,
}

impl Channel {
    /// Phone when the href mentions `tel`, email otherwise.
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        if href.contains("tel") { Self::Phone } else { Self::Email }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Phone => "phone",
            Self::Email => "email",
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Contact {
    buttons: HashMap<NodeId, BookingState>,
    links: Vec<NodeId>,
}

impl Contact {
    pub fn start<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>) -> Self {
        let mut buttons = HashMap::new();
        for button in ctx.host.query_all(BOOKING_BUTTONS) {
            ctx.host.listen(Target::Node(button), EventKind::Click);
            buttons.insert(button, BookingState::Idle);
        }
        let links = ctx.host.query_all(CONTACT_LINKS);
        for link in &links {
            ctx.host.listen(Target::Node(*link), EventKind::Click);
        }
        Self { buttons, links }
    }

    #[must_use]
    pub fn state(&self, button: NodeId) -> Option<&BookingState> {
        self.buttons.get(&button)
    }

    pub fn on_click<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId) {
        if self.buttons.contains_key(&node) {
            self.begin_booking(ctx, node);
        }
        if self.links.contains(&node) {
            track_contact(ctx, node);
        }
    }

    fn begin_booking<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, button: NodeId) {
        let Some(state) = self.buttons.get_mut(&button) else {
            return;
        };
        if matches!(state, BookingState::Booking { .. }) {
            return;
        }
        toast::show(ctx, BOOKING_TOAST, ToastKind::Info);
        *state = BookingState::Booking { label: ctx.host.text(button) };
        ctx.host.set_text(button, BOOKING_LABEL);
        ctx.host.set_disabled(button, true);
        let delay = ctx.config.booking_delay_ms;
        ctx.after(delay, Task::BookingRestore { node: button });
    }

    /// Open the deep link and put the button back to idle.
    pub fn finish_booking<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, button: NodeId) {
        let Some(state) = self.buttons.get_mut(&button) else {
            return;
        };
        let BookingState::Booking { label } = std::mem::take(state) else {
            return;
        };
        let url = ctx.config.booking_url();
        info!("contact: opening booking link");
        ctx.host.open_url(&url, BOOKING_TARGET);
        ctx.host.set_text(button, &label);
        ctx.host.set_disabled(button, false);
    }
}

fn track_contact<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>, link: NodeId) {
    let href = ctx.host.attr(link, "href").unwrap_or_default();
    let channel = Channel::from_href(&href);
    toast::show(ctx, &format!("Opening {channel} app..."), ToastKind::Info);
    info!("contact interaction: {channel} - {href}");
}
