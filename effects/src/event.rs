//! Events delivered by the host and what the host should do afterwards.

use crate::host::{NodeId, Observer};

/// Pointer position in viewport (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A DOM event translated by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Click { node: NodeId, pointer: Pointer },
    MouseEnter { node: NodeId },
    MouseLeave { node: NodeId },
    MouseMove { node: NodeId, pointer: Pointer },
    Load { node: NodeId },
    Error { node: NodeId },
    /// Window scroll. The current offset is read from the host.
    Scroll,
    /// First changed touch, `screenY`.
    TouchStart { screen_y: f64 },
    TouchEnd { screen_y: f64 },
    /// Touch interrupted by the browser; no swipe is decided.
    TouchCancel,
    Intersection { observer: Observer, node: NodeId, intersecting: bool },
}

impl Event {
    /// A touchend without a changed touch cannot resolve a swipe; it still
    /// ends the touch.
    #[must_use]
    pub fn touch_end(screen_y: Option<f64>) -> Self {
        screen_y.map_or(Self::TouchCancel, |screen_y| Self::TouchEnd { screen_y })
    }
}

/// Result of routing one event through every controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// The host must cancel the event's default action.
    pub prevent_default: bool,
}

impl Outcome {
    #[must_use]
    pub fn prevent() -> Self {
        Self { prevent_default: true }
    }
}
