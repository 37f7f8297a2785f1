//! Per-element hover, tilt and ripple effects.
//!
//! Every effect is bound per element and touches only that element (the menu
//! options also highlight the sample menus). Nothing here keeps state between
//! events apart from the registered element lists.

#[cfg(test)]
#[path = "interact_test.rs"]
mod interact_test;

use log::warn;

use crate::consts::{
    BUTTONS, CARDS, CLASS_HIGHLIGHT, CLASS_LOADED, CLASS_MENU_HOVER, IMAGES, MENU_OPTIONS, SAMPLE_MENUS, SOCIAL_ICONS,
};
use crate::event::Pointer;
use crate::host::{EventKind, Host, NodeId, Rect, Target};
use crate::page::{Ctx, Task};

/// Maximum card rotation in degrees at the card edge.
pub const MAX_TILT_DEG: f64 = 10.0;

const TILT_RESET: &str = "perspective(1000px) rotateX(0) rotateY(0) translateZ(0)";
const BOUNCE_ANIMATION: &str = "bounceIn 0.6s ease-out";
const HOVER_TRANSITION: &str = "transform 0.3s ease";

/// 3-D transform for a pointer over a card, `None` for a zero-sized card.
#[must_use]
pub fn tilt_transform(rect: Rect, pointer: Pointer) -> Option<String> {
    if rect.width <= 0.0 || rect.height <= 0.0 {
        return None;
    }
    // Pointer right of centre turns the card away (negative Y rotation).
    let dx = ((rect.center_x() - pointer.x) / (rect.width / 2.0)).clamp(-1.0, 1.0);
    let dy = ((pointer.y - rect.center_y()) / (rect.height / 2.0)).clamp(-1.0, 1.0);
    let tilt_x = dy * MAX_TILT_DEG;
    let tilt_y = dx * MAX_TILT_DEG;
    Some(format!("perspective(1000px) rotateX({tilt_x}deg) rotateY({tilt_y}deg) translateZ(20px)"))
}

/// Ripple circle placement relative to the clicked element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl Ripple {
    /// A circle as large as the element's longer side, centred on the click.
    #[must_use]
    pub fn at(rect: Rect, pointer: Pointer) -> Self {
        let size = rect.width.max(rect.height);
        Self {
            size,
            left: pointer.x - rect.left - size / 2.0,
            top: pointer.y - rect.top - size / 2.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Interactions {
    images: Vec<NodeId>,
    buttons: Vec<NodeId>,
    options: Vec<NodeId>,
    samples: Vec<NodeId>,
    cards: Vec<NodeId>,
    social: Vec<NodeId>,
}

impl Interactions {
    pub fn start<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>) -> Self {
        let images = ctx.host.query_all(IMAGES);
        listen_all(ctx, &images, &[EventKind::Load, EventKind::MouseEnter, EventKind::MouseLeave, EventKind::Error]);

        let buttons = ctx.host.query_all(BUTTONS);
        listen_all(ctx, &buttons, &[EventKind::Click, EventKind::MouseEnter, EventKind::MouseLeave]);

        let options = ctx.host.query_all(MENU_OPTIONS);
        let samples = ctx.host.query_all(SAMPLE_MENUS);
        listen_all(ctx, &options, &[EventKind::MouseEnter, EventKind::MouseLeave]);

        let cards = ctx.host.query_all(CARDS);
        listen_all(ctx, &cards, &[EventKind::MouseMove, EventKind::MouseLeave]);

        let social = ctx.host.query_all(SOCIAL_ICONS);
        let step = ctx.config.social_bounce_step_ms;
        for (index, icon) in (0_u64..).zip(&social) {
            ctx.after(index * step, Task::SocialBounce { node: *icon });
        }
        listen_all(ctx, &social, &[EventKind::MouseEnter, EventKind::MouseLeave]);

        Self { images, buttons, options, samples, cards, social }
    }

    pub fn on_click<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId, pointer: Pointer) {
        if !self.buttons.contains(&node) {
            return;
        }
        let Ripple { size, left, top } = Ripple::at(ctx.host.bounding_rect(node), pointer);
        let ripple = ctx.host.create_element("span");
        let styles = [
            ("position", "absolute".to_owned()),
            ("border-radius", "50%".to_owned()),
            ("background", "rgba(255, 255, 255, 0.6)".to_owned()),
            ("transform", "scale(0)".to_owned()),
            ("animation", "ripple 0.6s linear".to_owned()),
            ("width", format!("{size}px")),
            ("height", format!("{size}px")),
            ("left", format!("{left}px")),
            ("top", format!("{top}px")),
            ("pointer-events", "none".to_owned()),
        ];
        for (property, value) in &styles {
            ctx.host.set_style(ripple, property, value);
        }
        ctx.host.set_style(node, "position", "relative");
        ctx.host.set_style(node, "overflow", "hidden");
        ctx.host.append_child(node, ripple);
        let lifetime = ctx.config.ripple_ms;
        ctx.after(lifetime, Task::RippleRemove { node: ripple });
    }

    pub fn on_enter<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId) {
        if self.images.contains(&node) {
            ctx.host.set_style(node, "transform", "scale(1.05)");
            ctx.host.set_style(node, "transition", HOVER_TRANSITION);
        }
        if self.buttons.contains(&node) {
            ctx.host.set_style(node, "transform", "translateY(-2px)");
            ctx.host.set_style(node, "box-shadow", "0 5px 15px rgba(0,0,0,0.2)");
        }
        if self.options.contains(&node) {
            ctx.host.add_class(node, CLASS_MENU_HOVER);
            for sample in &self.samples {
                ctx.host.add_class(*sample, CLASS_HIGHLIGHT);
            }
        }
        if self.social.contains(&node) {
            ctx.host.set_style(node, "transform", "rotate(15deg) scale(1.1)");
            ctx.host.set_style(node, "transition", HOVER_TRANSITION);
        }
    }

    pub fn on_leave<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId) {
        if self.images.contains(&node) {
            ctx.host.set_style(node, "transform", "scale(1)");
        }
        if self.buttons.contains(&node) {
            ctx.host.set_style(node, "transform", "translateY(0)");
            ctx.host.set_style(node, "box-shadow", "none");
        }
        if self.options.contains(&node) {
            ctx.host.remove_class(node, CLASS_MENU_HOVER);
            for sample in &self.samples {
                ctx.host.remove_class(*sample, CLASS_HIGHLIGHT);
            }
        }
        if self.cards.contains(&node) {
            ctx.host.set_style(node, "transform", TILT_RESET);
        }
        if self.social.contains(&node) {
            ctx.host.set_style(node, "transform", "rotate(0deg) scale(1)");
        }
    }

    pub fn on_move<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId, pointer: Pointer) {
        if !self.cards.contains(&node) {
            return;
        }
        if let Some(transform) = tilt_transform(ctx.host.bounding_rect(node), pointer) {
            ctx.host.set_style(node, "transform", &transform);
        }
    }

    pub fn on_load<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId) {
        if self.images.contains(&node) {
            ctx.host.add_class(node, CLASS_LOADED);
        }
    }

    /// Hide a broken image and report it.
    pub fn on_error<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId) {
        if !self.images.contains(&node) {
            return;
        }
        ctx.host.set_style(node, "display", "none");
        let src = ctx.host.attr(node, "src").unwrap_or_default();
        warn!("image failed to load: {src}");
    }

    pub fn bounce<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId) {
        ctx.host.set_style(node, "animation", BOUNCE_ANIMATION);
    }

    pub fn remove_ripple<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, ripple: NodeId) {
        ctx.host.remove(ripple);
    }
}

fn listen_all<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>, nodes: &[NodeId], kinds: &[EventKind]) {
    for node in nodes {
        for kind in kinds {
            ctx.host.listen(Target::Node(*node), *kind);
        }
    }
}
