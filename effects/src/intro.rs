//! Hero intro: typewriter title and floating decorations.

#[cfg(test)]
#[path = "intro_test.rs"]
mod intro_test;

use log::debug;

use crate::consts::{CLASS_FADE_IN_UP, FLOATING, HERO_TEXT, HERO_TITLE};
use crate::host::{Host, NodeId};
use crate::page::{Ctx, Task};
use crate::reveal::css_seconds;

const CARET: &str = "3px solid #d4af37";
const FLOAT_ANIMATION: &str = "float 3s ease-in-out infinite";
const FLOAT_STAGGER_MS: u64 = 500;

/// Typewriter timer stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeStep {
    /// Append the next character.
    Char,
    /// Fade in the paragraph under the finished title.
    Paragraph,
}

/// Types the hero title one character at a time.
#[derive(Debug, Clone, Default)]
pub struct Typewriter {
    title: Option<NodeId>,
    paragraph: Option<NodeId>,
    chars: Vec<char>,
    typed: usize,
}

impl Typewriter {
    /// Clear the title and schedule typing. Inert unless both the title and
    /// the paragraph exist.
    pub fn start<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>) -> Self {
        let (Some(title), Some(paragraph)) = (ctx.host.query(HERO_TITLE), ctx.host.query(HERO_TEXT)) else {
            return Self::default();
        };
        let chars = ctx.host.text(title).chars().collect();
        ctx.host.set_text(title, "");
        ctx.host.set_style(title, "border-right", CARET);
        let delay = ctx.config.typewriter_start_ms;
        ctx.after(delay, Task::Typewriter(TypeStep::Char));
        Self { title: Some(title), paragraph: Some(paragraph), chars, typed: 0 }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.typed >= self.chars.len()
    }

    pub fn step<H: Host + ?Sized>(&mut self, ctx: &mut Ctx<'_, H>, step: TypeStep) {
        let (Some(title), Some(paragraph)) = (self.title, self.paragraph) else {
            return;
        };
        match step {
            TypeStep::Char if !self.is_finished() => {
                self.typed += 1;
                let shown: String = self.chars[..self.typed].iter().collect();
                ctx.host.set_text(title, &shown);
                let delay = ctx.config.typewriter_char_ms;
                ctx.after(delay, Task::Typewriter(TypeStep::Char));
            }
            TypeStep::Char => {
                ctx.host.set_style(title, "border-right", "none");
                let delay = ctx.config.typewriter_follow_ms;
                ctx.after(delay, Task::Typewriter(TypeStep::Paragraph));
                debug!("intro: title typed");
            }
            TypeStep::Paragraph => ctx.host.add_class(paragraph, CLASS_FADE_IN_UP),
        }
    }
}

/// Give floating decorations a looping animation with staggered starts.
pub fn start_floating<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>) {
    for (index, node) in (0_u64..).zip(ctx.host.query_all(FLOATING)) {
        ctx.host.set_style(node, "animation", FLOAT_ANIMATION);
        ctx.host.set_style(node, "animation-delay", &css_seconds(index * FLOAT_STAGGER_MS));
    }
}
