//! Notification toasts.
//!
//! Each call to [`show`] creates an independent element and schedules its own
//! lifecycle: shown after a short delay so the CSS transition runs, hidden
//! after the visible period, then removed once the exit transition ends.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::fmt;

use crate::consts::{CLASS_NOTIFICATION, CLASS_SHOW};
use crate::host::{Host, NodeId};
use crate::page::{Ctx, Task};

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl ToastKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Parse a kind name as used in the modifier class; unknown names are `None`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "success" => Some(Self::Success),
            "info" => Some(Self::Info),
            "warning" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Modifier class, e.g. `notification-error`.
    #[must_use]
    pub fn class(self) -> String {
        format!("{CLASS_NOTIFICATION}-{}", self.as_str())
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle stage reached by a toast timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStep {
    Show,
    Hide,
    Remove,
}

/// Create a toast and schedule its lifecycle. `None` when the page has no body.
pub fn show<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>, message: &str, kind: ToastKind) -> Option<NodeId> {
    let body = ctx.host.body()?;
    let node = ctx.host.create_element("div");
    ctx.host.add_class(node, CLASS_NOTIFICATION);
    ctx.host.add_class(node, &kind.class());
    ctx.host.set_text(node, message);
    ctx.host.append_child(body, node);

    let show_at = ctx.config.toast_show_delay_ms;
    let hide_at = ctx.config.toast_visible_ms;
    ctx.after(show_at, Task::Toast { node, step: ToastStep::Show });
    ctx.after(hide_at, Task::Toast { node, step: ToastStep::Hide });
    Some(node)
}

/// Run one lifecycle stage.
pub fn step<H: Host + ?Sized>(ctx: &mut Ctx<'_, H>, node: NodeId, step: ToastStep) {
    match step {
        ToastStep::Show => ctx.host.add_class(node, CLASS_SHOW),
        ToastStep::Hide => {
            ctx.host.remove_class(node, CLASS_SHOW);
            let exit = ctx.config.toast_exit_ms;
            ctx.after(exit, Task::Toast { node, step: ToastStep::Remove });
        }
        ToastStep::Remove => ctx.host.remove(node),
    }
}
