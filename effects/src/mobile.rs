//! Mobile behavior: menu toggle, swipe gestures, shorter animations.

#[cfg(test)]
#[path = "mobile_test.rs"]
mod mobile_test;

use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;

use crate::consts::{CLASS_MOBILE_OPEN, CLASS_MOBILE_TOGGLE, GLYPH_MENU_CLOSED, GLYPH_MENU_OPEN, INLINE_ANIMATED, NAV_MENU};
use crate::host::{EventKind, Host, NodeId, Target};
use crate::navbar::{Navbar, Source};
use crate::page::Ctx;

static DURATION_TOKEN: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| Regex::new(r"\d+s"));

/// Rewrite every `<digits>s` token in an animation shorthand to `1s`.
///
/// Tokens are matched textually, so `0.6s` becomes `0.1s`.
#[must_use]
pub fn normalize_durations(animation: &str) -> String {
    match DURATION_TOKEN.as_ref() {
        Ok(re) => re.replace_all(animation, "1s").into_owned(),
        Err(err) => {
            warn!("mobile: duration pattern unavailable: {err}");
            animation.to_owned()
        }
    }
}

/// Outcome of a completed vertical swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Up,
    Down,
}

impl Swipe {
    /// Classify a swipe from touch start/end `screenY`; short swipes are `None`.
    #[must_use]
    pub fn classify(start_y: f64, end_y: f64, threshold: f64) -> Option<Self> {
        let distance = start_y - end_y;
        if distance.abs() <= threshold {
            return None;
        }
        Some(if distance > 0.0 { Self::Up } else { Self::Down })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Mobile {
    toggle: Option<NodeId>,
    touch_start_y: f64,
}

impl Mobile {
    /// Inject the menu toggle on narrow screens and bind touch gestures.
    pub fn start<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>, navbar: &Navbar) -> Self {
        let narrow = ctx.host.viewport_width() <= ctx.config.mobile_breakpoint_px;
        let toggle = match navbar.node() {
            Some(bar) if narrow => {
                let toggle = ctx.host.create_element("button");
                ctx.host.add_class(toggle, CLASS_MOBILE_TOGGLE);
                ctx.host.set_text(toggle, GLYPH_MENU_CLOSED);
                ctx.host.append_child(bar, toggle);
                ctx.host.listen(Target::Node(toggle), EventKind::Click);
                Some(toggle)
            }
            _ => None,
        };

        ctx.host.listen(Target::Document, EventKind::TouchStart);
        ctx.host.listen(Target::Document, EventKind::TouchEnd);
        ctx.host.listen(Target::Document, EventKind::TouchCancel);

        if narrow {
            shorten_animations(ctx);
        }
        Self { toggle, touch_start_y: 0.0 }
    }

    #[must_use]
    pub fn toggle(&self) -> Option<NodeId> {
        self.toggle
    }

    pub fn on_click<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId) {
        if self.toggle != Some(node) {
            return;
        }
        let Some(menu) = ctx.host.query(NAV_MENU) else {
            return;
        };
        let open = !ctx.host.has_class(menu, CLASS_MOBILE_OPEN);
        if open {
            ctx.host.add_class(menu, CLASS_MOBILE_OPEN);
        } else {
            ctx.host.remove_class(menu, CLASS_MOBILE_OPEN);
        }
        ctx.host.set_text(node, if open { GLYPH_MENU_OPEN } else { GLYPH_MENU_CLOSED });
    }

    pub fn on_touch_start(&mut self, navbar: &mut Navbar, screen_y: f64) {
        self.touch_start_y = screen_y;
        navbar.begin_touch();
    }

    /// The touch ended without a usable end point; keep the navbar as is.
    pub fn on_touch_cancel(&mut self, navbar: &mut Navbar) {
        debug!("mobile: touch cancelled");
        self.touch_start_y = 0.0;
        navbar.end_touch();
    }

    /// Resolve the swipe: up always shows the navbar, down hides it once the
    /// page is scrolled past the `scrolled` threshold.
    pub fn on_touch_end<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, navbar: &mut Navbar, screen_y: f64) {
        navbar.end_touch();
        match Swipe::classify(self.touch_start_y, screen_y, ctx.config.swipe_threshold_px) {
            Some(Swipe::Up) => {
                navbar.set_hidden(ctx.host, false, Source::Swipe);
            }
            Some(Swipe::Down) if ctx.host.scroll_y() > ctx.config.scrolled_threshold_px => {
                navbar.set_hidden(ctx.host, true, Source::Swipe);
            }
            _ => {}
        }
    }
}

fn shorten_animations<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>) {
    let mut rewritten = 0;
    for node in ctx.host.query_all(INLINE_ANIMATED) {
        let animation = ctx.host.style(node, "animation");
        if animation.is_empty() {
            continue;
        }
        ctx.host.set_style(node, "animation", &normalize_durations(&animation));
        rewritten += 1;
    }
    debug!("mobile: shortened {rewritten} inline animations");
}
