//! Reveal-on-scroll animations.
//!
//! Registered elements start hidden via the `reveal-element` class and gain
//! `revealed` the first time they intersect the viewport. The class is never
//! removed. Elements inside a card grid re-stagger their siblings on reveal.

#[cfg(test)]
#[path = "reveal_test.rs"]
mod reveal_test;

use std::collections::HashSet;

use crate::consts::{CLASS_REVEAL, CLASS_REVEALED, REVEAL_GRIDS, REVEAL_TARGETS};
use crate::host::{Host, NodeId, Observer, ObserverOptions};
use crate::page::Ctx;

/// Stagger step for registration order, in milliseconds.
const REGISTER_STAGGER_MS: u64 = 100;
/// Stagger step for siblings in a grid, in milliseconds.
const GRID_STAGGER_MS: u64 = 200;

/// Format a millisecond delay as a CSS seconds value, e.g. `300 -> "0.3s"`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn css_seconds(ms: u64) -> String {
    format!("{}s", ms as f64 / 1000.0)
}

#[must_use]
pub fn reveal_observer_options() -> ObserverOptions {
    ObserverOptions { threshold: 0.1, root_margin: "0px 0px -50px 0px".to_owned() }
}

#[derive(Debug, Clone, Default)]
pub struct Reveal {
    targets: Vec<NodeId>,
    revealed: HashSet<NodeId>,
}

impl Reveal {
    pub fn start<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>) -> Self {
        let targets = ctx.host.query_all(REVEAL_TARGETS);
        let options = reveal_observer_options();
        for (index, node) in (0_u64..).zip(&targets) {
            ctx.host.add_class(*node, CLASS_REVEAL);
            ctx.host.set_style(*node, "animation-delay", &css_seconds(index * REGISTER_STAGGER_MS));
            ctx.host.observe(Observer::Reveal, *node, &options);
        }
        Self { targets, revealed: HashSet::new() }
    }

    #[must_use]
    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    #[must_use]
    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.contains(&node)
    }

    pub fn on_intersection<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, node: NodeId, intersecting: bool) {
        if !intersecting || !self.targets.contains(&node) {
            return;
        }
        self.revealed.insert(node);
        ctx.host.add_class(node, CLASS_REVEALED);

        if ctx.host.closest(node, REVEAL_GRIDS).is_some() {
            stagger_siblings(ctx, node);
        }
    }
}

/// Re-stagger every reveal sibling by its position among the parent's children.
fn stagger_siblings<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>, node: NodeId) {
    let Some(parent) = ctx.host.parent(node) else {
        return;
    };
    let siblings = ctx.host.children(parent);
    for (position, sibling) in (0_u64..).zip(siblings) {
        if ctx.host.has_class(sibling, CLASS_REVEAL) {
            ctx.host.set_style(sibling, "animation-delay", &css_seconds(position * GRID_STAGGER_MS));
        }
    }
}
