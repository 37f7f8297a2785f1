//! Browser driver for the effects engine.
//!
//! [`Page`] owns the engine and the DOM host. DOM callbacks reach it through
//! [`deliver`] and [`deliver_intersections`]; one `gloo` timeout stays armed
//! for the engine's next timer deadline. Callbacks that arrive while the page
//! is already borrowed are dropped with a debug log. Time comes from
//! `performance.now()`, which wall-clock changes do not move.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use effects::config::Config;
use effects::event::Event;
use effects::host::Observer;
use effects::page::PageEffects;
use effects::timer::Millis;
use effects::toast::ToastKind;
use gloo_timers::callback::Timeout;
use log::{debug, info};
use web_sys::{Document, Element, Performance, Window};

use crate::dom::DomHost;
use crate::error::BootError;

pub struct Page {
    effects: PageEffects,
    host: DomHost,
    timer: Option<Timeout>,
    /// The timeout whose callback is running; dropped on the next tick.
    fired: Option<Timeout>,
    armed_for: Option<Millis>,
    clock: Option<Performance>,
    epoch_ms: f64,
}

impl Page {
    /// Build the page, bind the host callbacks and start every controller.
    pub fn launch(window: Window, document: Document, config: Config, seed: u64) -> Result<Rc<RefCell<Self>>, BootError> {
        let clock = window.performance();
        let epoch_ms = clock_ms(clock.as_ref());
        let host = DomHost::new(window, document)?;
        let page = Rc::new(RefCell::new(Self {
            effects: PageEffects::new(config, seed),
            host,
            timer: None,
            fired: None,
            armed_for: None,
            clock,
            epoch_ms,
        }));
        {
            let mut this = page.borrow_mut();
            this.host.bind(Rc::downgrade(&page));
            this.start();
        }
        Ok(page)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn now(&self) -> Millis {
        (clock_ms(self.clock.as_ref()) - self.epoch_ms).max(0.0) as Millis
    }

    fn start(&mut self) {
        let now = self.now();
        if self.effects.start(&mut self.host, now) {
            info!("djinn: page effects running");
        }
        self.rearm();
    }

    fn handle(&mut self, event: &Event, raw: &web_sys::Event) {
        let now = self.now();
        let outcome = self.effects.dispatch(&mut self.host, event, now);
        if outcome.prevent_default {
            raw.prevent_default();
        }
        self.rearm();
    }

    fn intersections(&mut self, observer: Observer, entries: Vec<(Element, bool)>) {
        let now = self.now();
        for (element, intersecting) in entries {
            let node = self.host.node_for(element);
            self.effects.dispatch(&mut self.host, &Event::Intersection { observer, node, intersecting }, now);
        }
        self.rearm();
    }

    fn tick(&mut self) {
        self.fired = self.timer.take();
        self.armed_for = None;
        let now = self.now();
        let ran = self.effects.advance(&mut self.host, now);
        debug!("djinn: {ran} timers fired at {now}ms");
        self.rearm();
    }

    /// Keep exactly one timeout armed for the earliest pending deadline.
    fn rearm(&mut self) {
        let Some(deadline) = self.effects.next_deadline() else {
            self.timer = None;
            self.armed_for = None;
            return;
        };
        let now = self.now();
        if self.armed_for == Some(deadline) && deadline > now {
            return;
        }
        let delay = timeout_delay(deadline, now);
        let page = self.host.page();
        self.timer = Some(Timeout::new(delay, move || with_page(&page, Page::tick)));
        self.armed_for = Some(deadline);
    }

    pub fn notify(&mut self, message: &str, kind: ToastKind) {
        let now = self.now();
        self.effects.notify(&mut self.host, message, kind, now);
        self.rearm();
    }

    /// Stop all timers and unbind from the document.
    pub fn shutdown(&mut self) -> usize {
        let now = self.now();
        self.timer = None;
        self.armed_for = None;
        let cancelled = self.effects.shutdown(&mut self.host, now);
        self.host.detach();
        cancelled
    }
}

fn clock_ms(clock: Option<&Performance>) -> f64 {
    clock.map_or_else(js_sys::Date::now, Performance::now)
}

/// Delay for `setTimeout`, which fires at once for anything past `i32::MAX`.
/// A clamped timeout fires early and re-arms for the rest.
fn timeout_delay(deadline: Millis, now: Millis) -> u32 {
    let max = i32::MAX.unsigned_abs();
    u32::try_from(deadline.saturating_sub(now)).map_or(max, |delay| delay.min(max))
}

fn with_page(page: &Weak<RefCell<Page>>, run: impl FnOnce(&mut Page)) {
    let Some(page) = page.upgrade() else {
        return;
    };
    let Ok(mut page) = page.try_borrow_mut() else {
        debug!("djinn: page busy, callback dropped");
        return;
    };
    run(&mut page);
}

/// Route a translated DOM event into the page.
pub fn deliver(page: &Weak<RefCell<Page>>, event: &Event, raw: &web_sys::Event) {
    with_page(page, |page| page.handle(event, raw));
}

/// Route a batch of intersection entries into the page.
pub fn deliver_intersections(page: &Weak<RefCell<Page>>, observer: Observer, entries: Vec<(Element, bool)>) {
    with_page(page, |page| page.intersections(observer, entries));
}
