//! Top-level page engine.
//!
//! [`PageEffects`] owns the configuration, the timer queue, the navbar state
//! and every controller. The host calls [`PageEffects::start`] once the
//! document is parsed, forwards DOM events to [`PageEffects::dispatch`], and
//! calls [`PageEffects::advance`] whenever [`PageEffects::next_deadline`]
//! passes. Handlers run to completion; nothing here blocks or suspends.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use log::{debug, info};

use crate::config::Config;
use crate::contact::Contact;
use crate::event::{Event, Outcome};
use crate::host::{Host, NodeId, Observer};
use crate::interact::Interactions;
use crate::intro::{self, TypeStep, Typewriter};
use crate::mobile::Mobile;
use crate::nav::Navigation;
use crate::navbar::Navbar;
use crate::newsletter::Newsletter;
use crate::reveal::Reveal;
use crate::rotator::{self, Rotator, RotatorStep};
use crate::scroll_fx::ScrollEffects;
use crate::styles::STYLES;
use crate::timer::{Millis, TimerHandle, TimerQueue};
use crate::toast::{self, ToastKind, ToastStep};

/// Delayed work owned by a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    Toast { node: NodeId, step: ToastStep },
    RippleRemove { node: NodeId },
    SocialBounce { node: NodeId },
    Typewriter(TypeStep),
    BookingRestore { node: NodeId },
    Rotator(RotatorStep),
    NewsletterReveal,
}

/// Everything a handler may touch while it runs.
pub struct Ctx<'a, H: Host + ?Sized> {
    pub host: &'a mut H,
    pub timers: &'a mut TimerQueue<Task>,
    pub config: &'a Config,
    pub now: Millis,
}

impl<H: Host + ?Sized> Ctx<'_, H> {
    /// Schedule `task` to run `delay` ms from now.
    pub fn after(&mut self, delay: Millis, task: Task) -> TimerHandle {
        debug!("timer: {task:?} in {delay}ms");
        self.timers.schedule(self.now, delay, task)
    }
}

struct Controllers {
    nav: Navigation,
    scroll: ScrollEffects,
    reveal: Reveal,
    typewriter: Typewriter,
    interactions: Interactions,
    rotator: Rotator,
    contact: Contact,
    newsletter: Option<Newsletter>,
    mobile: Mobile,
}

pub struct PageEffects {
    config: Config,
    timers: TimerQueue<Task>,
    navbar: Navbar,
    seed: u64,
    controllers: Option<Controllers>,
}

impl PageEffects {
    /// `seed` drives the featured-dish choice and jitter.
    #[must_use]
    pub fn new(config: Config, seed: u64) -> Self {
        Self { config, timers: TimerQueue::new(), navbar: Navbar::default(), seed, controllers: None }
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.controllers.is_some()
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    #[must_use]
    pub fn timers(&self) -> &TimerQueue<Task> {
        &self.timers
    }

    #[must_use]
    pub fn newsletter(&self) -> Option<Newsletter> {
        self.controllers.as_ref().and_then(|c| c.newsletter)
    }

    #[must_use]
    pub fn mobile_toggle(&self) -> Option<NodeId> {
        self.controllers.as_ref().and_then(|c| c.mobile.toggle())
    }

    #[must_use]
    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.controllers.as_ref().is_some_and(|c| c.reveal.is_revealed(node))
    }

    /// Wire every controller to the document. Runs once; later calls return `false`.
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H, now: Millis) -> bool {
        if self.controllers.is_some() {
            return false;
        }
        host.inject_styles(STYLES);
        self.navbar = Navbar::attach(host);

        let mut ctx = Ctx { host, timers: &mut self.timers, config: &self.config, now };
        let nav = Navigation::start(&mut ctx);
        let scroll = ScrollEffects::start(&mut ctx);
        let reveal = Reveal::start(&mut ctx);
        let typewriter = Typewriter::start(&mut ctx);
        intro::start_floating(&mut ctx);
        let interactions = Interactions::start(&mut ctx);
        rotator::apply_daypart(&mut ctx);
        let rotator = Rotator::start(&mut ctx, self.seed);
        let contact = Contact::start(&mut ctx);
        let newsletter = Newsletter::start(&mut ctx);
        let mobile = Mobile::start(&mut ctx, &self.navbar);

        info!(
            "page effects started: {} nav links, {} reveal targets, {} timers pending",
            nav.links().len(),
            reveal.targets().len(),
            self.timers.len()
        );
        self.controllers =
            Some(Controllers { nav, scroll, reveal, typewriter, interactions, rotator, contact, newsletter, mobile });
        true
    }

    /// Route one event through every controller in registration order.
    pub fn dispatch<H: Host + ?Sized>(&mut self, host: &mut H, event: &Event, now: Millis) -> Outcome {
        let Some(c) = self.controllers.as_mut() else {
            return Outcome::default();
        };
        let navbar = &mut self.navbar;
        let mut ctx = Ctx { host, timers: &mut self.timers, config: &self.config, now };

        match *event {
            Event::Click { node, pointer } => {
                let outcome = c.nav.on_click(&mut ctx, node);
                c.scroll.on_click(&mut ctx, node);
                c.interactions.on_click(&mut ctx, node, pointer);
                c.contact.on_click(&mut ctx, node);
                if let Some(newsletter) = &c.newsletter {
                    newsletter.on_click(&mut ctx, node);
                }
                c.mobile.on_click(&mut ctx, node);
                return outcome;
            }
            Event::MouseEnter { node } => c.interactions.on_enter(&mut ctx, node),
            Event::MouseLeave { node } => c.interactions.on_leave(&mut ctx, node),
            Event::MouseMove { node, pointer } => c.interactions.on_move(&mut ctx, node, pointer),
            Event::Load { node } => c.interactions.on_load(&mut ctx, node),
            Event::Error { node } => c.interactions.on_error(&mut ctx, node),
            Event::Scroll => {
                c.nav.on_scroll(&mut ctx, navbar);
                c.scroll.on_scroll(&mut ctx);
            }
            Event::TouchStart { screen_y } => c.mobile.on_touch_start(navbar, screen_y),
            Event::TouchEnd { screen_y } => c.mobile.on_touch_end(&mut ctx, navbar, screen_y),
            Event::TouchCancel => c.mobile.on_touch_cancel(navbar),
            Event::Intersection { observer: Observer::Sections, node, intersecting } => {
                c.nav.on_intersection(&mut ctx, node, intersecting);
            }
            Event::Intersection { observer: Observer::Reveal, node, intersecting } => {
                c.reveal.on_intersection(&mut ctx, node, intersecting);
            }
        }
        Outcome::default()
    }

    /// Run every task due at `now`, including tasks they schedule that are
    /// already due. Returns how many ran.
    pub fn advance<H: Host + ?Sized>(&mut self, host: &mut H, now: Millis) -> usize {
        let Some(c) = self.controllers.as_mut() else {
            return 0;
        };
        let mut ran = 0;
        while let Some((_, task)) = self.timers.pop_due(now) {
            let mut ctx = Ctx { host: &mut *host, timers: &mut self.timers, config: &self.config, now };
            run_task(c, &mut ctx, task);
            ran += 1;
        }
        ran
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_deadline()
    }

    /// Show a toast through the shared notification helper.
    pub fn notify<H: Host + ?Sized>(&mut self, host: &mut H, message: &str, kind: ToastKind, now: Millis) -> Option<NodeId> {
        let mut ctx = Ctx { host, timers: &mut self.timers, config: &self.config, now };
        toast::show(&mut ctx, message, kind)
    }

    /// Run the newsletter show path immediately. Returns whether it was revealed.
    pub fn show_newsletter<H: Host + ?Sized>(&mut self, host: &mut H, now: Millis) -> bool {
        let Some(newsletter) = self.newsletter() else {
            return false;
        };
        let mut ctx = Ctx { host, timers: &mut self.timers, config: &self.config, now };
        newsletter.try_show(&mut ctx)
    }

    /// Stop the featured-dish rotation, leaving other timers running.
    pub fn stop_rotation<H: Host + ?Sized>(&mut self, host: &mut H, now: Millis) {
        let Some(c) = self.controllers.as_mut() else {
            return;
        };
        let mut ctx = Ctx { host, timers: &mut self.timers, config: &self.config, now };
        c.rotator.stop(&mut ctx);
    }

    /// Cancel all background work. Returns how many timers were pending.
    pub fn shutdown<H: Host + ?Sized>(&mut self, host: &mut H, now: Millis) -> usize {
        self.stop_rotation(host, now);
        let cancelled = self.timers.clear();
        info!("page effects shut down, {cancelled} timers cancelled");
        cancelled
    }
}

fn run_task<H: Host + ?Sized>(c: &mut Controllers, ctx: &mut Ctx<'_, H>, task: Task) {
    match task {
        Task::Toast { node, step } => toast::step(ctx, node, step),
        Task::RippleRemove { node } => c.interactions.remove_ripple(ctx, node),
        Task::SocialBounce { node } => c.interactions.bounce(ctx, node),
        Task::Typewriter(step) => c.typewriter.step(ctx, step),
        Task::BookingRestore { node } => c.contact.finish_booking(ctx, node),
        Task::Rotator(step) => c.rotator.step(ctx, step),
        Task::NewsletterReveal => {
            if let Some(newsletter) = &c.newsletter {
                newsletter.try_show(ctx);
            }
        }
    }
}
