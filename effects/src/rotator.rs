//! Featured-dish rotation in the hero paragraph, plus the time-of-day class
//! on the menu section.
//!
//! The rotation repeats on its own timer until [`Rotator::stop`]. Each cycle
//! waits a random jitter, shows `"<original> Today's special: <dish>!"` with
//! a highlight, then restores the original text.

#[cfg(test)]
#[path = "rotator_test.rs"]
mod rotator_test;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::consts::{CLASS_BREAKFAST, CLASS_DINNER, CLASS_HIGHLIGHT_TEXT, CLASS_LUNCH, HERO_TEXT, MENU_SECTION};
use crate::host::{Host, NodeId};
use crate::page::{Ctx, Task};
use crate::timer::TimerHandle;

/// Rotator timer stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotatorStep {
    /// Interval tick: pick a dish and schedule its display.
    Tick,
    /// Show the dish at this index of the configured list.
    Show { dish: usize },
    Revert,
}

/// Meal period used to tint the menu section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Daypart {
    Breakfast,
    Lunch,
    Dinner,
}

impl Daypart {
    #[must_use]
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..12 => Self::Breakfast,
            12..17 => Self::Lunch,
            _ => Self::Dinner,
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Breakfast => CLASS_BREAKFAST,
            Self::Lunch => CLASS_LUNCH,
            Self::Dinner => CLASS_DINNER,
        }
    }
}

/// Tag the menu section with the current meal period.
pub fn apply_daypart<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>) {
    let Some(menu) = ctx.host.query(MENU_SECTION) else {
        return;
    };
    let daypart = Daypart::from_hour(ctx.host.local_hour());
    ctx.host.add_class(menu, daypart.class());
}

#[must_use]
pub fn special_text(original: &str, dish: &str) -> String {
    format!("{original} Today's special: {dish}!")
}

#[derive(Debug, Clone)]
pub struct Rotator {
    paragraph: Option<NodeId>,
    original: String,
    rng: StdRng,
    tick: Option<TimerHandle>,
}

impl Rotator {
    /// Capture the paragraph text and start the repeating timer.
    pub fn start<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>, seed: u64) -> Self {
        let rng = StdRng::seed_from_u64(seed);
        let Some(paragraph) = ctx.host.query(HERO_TEXT) else {
            return Self { paragraph: None, original: String::new(), rng, tick: None };
        };
        let original = ctx.host.text(paragraph);
        let interval = ctx.config.rotation_interval_ms;
        let tick = Some(ctx.after(interval, Task::Rotator(RotatorStep::Tick)));
        Self { paragraph: Some(paragraph), original, rng, tick }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    pub fn step<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, step: RotatorStep) {
        let Some(paragraph) = self.paragraph else {
            return;
        };
        match step {
            RotatorStep::Tick => {
                if self.tick.is_none() {
                    return;
                }
                let dish = self.rng.random_range(0..ctx.config.dishes.len().max(1));
                let jitter = match ctx.config.rotation_jitter_ms {
                    0 => 0,
                    max => self.rng.random_range(0..max),
                };
                ctx.after(jitter, Task::Rotator(RotatorStep::Show { dish }));
                let interval = ctx.config.rotation_interval_ms;
                self.tick = Some(ctx.after(interval, Task::Rotator(RotatorStep::Tick)));
            }
            RotatorStep::Show { dish } => {
                let Some(name) = ctx.config.dishes.get(dish) else {
                    return;
                };
                debug!("rotator: featuring {name}");
                let text = special_text(&self.original, name);
                ctx.host.set_text(paragraph, &text);
                ctx.host.add_class(paragraph, CLASS_HIGHLIGHT_TEXT);
                let duration = ctx.config.special_duration_ms;
                ctx.after(duration, Task::Rotator(RotatorStep::Revert));
            }
            RotatorStep::Revert => self.restore(ctx, paragraph),
        }
    }

    /// Cancel the repeating timer and any cycle in flight, restoring the text.
    pub fn stop<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>) {
        if self.tick.take().is_none() {
            return;
        }
        let cancelled = ctx.timers.cancel_where(|task| matches!(task, Task::Rotator(_)));
        debug!("rotator: stopped, {cancelled} pending steps cancelled");
        if let Some(paragraph) = self.paragraph {
            self.restore(ctx, paragraph);
        }
    }

    fn restore<H: Host + ?Sized>(&self, ctx: &mut Ctx<'_, H>, paragraph: NodeId) {
        ctx.host.set_text(paragraph, &self.original);
        ctx.host.remove_class(paragraph, CLASS_HIGHLIGHT_TEXT);
    }
}
