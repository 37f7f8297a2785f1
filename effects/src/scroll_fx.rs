//! Hero parallax and the scroll indicator.

#[cfg(test)]
#[path = "scroll_fx_test.rs"]
mod scroll_fx_test;

use crate::consts::{HERO, SCROLL_INDICATOR, SERVICE_SECTION};
use crate::host::{EventKind, Host, NodeId, Target};
use crate::nav::scroll_to_node;
use crate::page::Ctx;

/// Indicator opacity for a scroll offset, fading linearly to zero.
#[must_use]
pub fn indicator_opacity(scroll_y: f64, fade_px: f64) -> f64 {
    (1.0 - scroll_y / fade_px).clamp(0.0, 1.0)
}

#[must_use]
pub fn parallax_transform(scroll_y: f64, speed: f64) -> String {
    format!("translateY({}px)", scroll_y * speed)
}

#[derive(Debug, Clone, Default)]
pub struct ScrollEffects {
    hero: Option<NodeId>,
    indicator: Option<NodeId>,
}

impl ScrollEffects {
    pub fn start<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>) -> Self {
        let hero = ctx.host.query(HERO);
        let indicator = ctx.host.query(SCROLL_INDICATOR);
        ctx.host.listen(Target::Window, EventKind::Scroll);
        if let Some(indicator) = indicator {
            ctx.host.listen(Target::Node(indicator), EventKind::Click);
        }
        Self { hero, indicator }
    }

    pub fn on_scroll<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>) {
        let y = ctx.host.scroll_y();
        if let Some(hero) = self.hero {
            ctx.host.set_style(hero, "transform", &parallax_transform(y, ctx.config.parallax_speed));
        }
        if let Some(indicator) = self.indicator {
            let opacity = indicator_opacity(y, ctx.config.indicator_fade_px);
            ctx.host.set_style(indicator, "opacity", &opacity.to_string());
        }
    }

    pub fn on_click<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId) {
        if self.indicator != Some(node) {
            return;
        }
        if let Some(service) = ctx.host.query(SERVICE_SECTION) {
            scroll_to_node(ctx, service);
        }
    }
}
