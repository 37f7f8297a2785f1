//! Host port: everything the engine needs from the page.
//!
//! The browser crate implements [`Host`] over `web-sys`; tests implement it
//! with an in-memory document. Elements are addressed by [`NodeId`] handles
//! the host hands out from its queries. A query that matches nothing returns
//! `None` or an empty list, which callers treat as "feature disabled".

/// Opaque handle to an element owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Bounding box in viewport (client) coordinates, CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Window,
    Document,
    Node(NodeId),
}

/// DOM event types the engine subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseEnter,
    MouseLeave,
    MouseMove,
    Load,
    Error,
    Scroll,
    TouchStart,
    TouchEnd,
    TouchCancel,
}

/// The two viewport-intersection observers the page uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Observer {
    /// Section tracking for the active navigation link.
    Sections,
    /// One-way reveal animations.
    Reveal,
}

/// Options for a viewport-intersection observer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the element that must be visible, `0.0..=1.0`.
    pub threshold: f64,
    /// CSS margin applied to the root box, e.g. `"-20% 0px -20% 0px"`.
    pub root_margin: String,
}

/// Page operations required by the engine.
///
/// Mutations on a handle whose element has been removed are ignored by the
/// host. Query methods take `&mut self` because a host may register newly
/// seen elements as it hands out handles.
pub trait Host {
    // --- Queries ---

    /// First element matching a CSS selector.
    fn query(&mut self, selector: &str) -> Option<NodeId>;

    /// All elements matching a CSS selector, in document order.
    fn query_all(&mut self, selector: &str) -> Vec<NodeId>;

    /// Nearest inclusive ancestor matching a CSS selector.
    fn closest(&mut self, node: NodeId, selector: &str) -> Option<NodeId>;

    fn parent(&mut self, node: NodeId) -> Option<NodeId>;

    /// Element children in document order.
    fn children(&mut self, node: NodeId) -> Vec<NodeId>;

    fn text(&self, node: NodeId) -> String;

    fn attr(&self, node: NodeId, name: &str) -> Option<String>;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Inline style property value, empty when unset.
    fn style(&self, node: NodeId, property: &str) -> String;

    /// Distance from the document top, as `offsetTop`.
    fn offset_top(&self, node: NodeId) -> f64;

    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// Whether the element is still attached to the document.
    fn is_connected(&self, node: NodeId) -> bool;

    // --- Mutations ---

    fn set_text(&mut self, node: NodeId, text: &str);

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Set an inline style property. An empty value clears it.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);

    fn set_disabled(&mut self, node: NodeId, disabled: bool);

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach an element from the document. The handle, and handles of its
    /// descendants, may stop resolving afterwards.
    fn remove(&mut self, node: NodeId);

    fn body(&mut self) -> Option<NodeId>;

    /// Append a `<style>` block to the document head.
    fn inject_styles(&mut self, css: &str);

    // --- Window ---

    fn scroll_y(&self) -> f64;

    fn viewport_width(&self) -> f64;

    /// Local wall-clock hour, `0..24`.
    fn local_hour(&self) -> u32;

    /// Smooth-scroll the window so its top edge sits at `top`.
    fn smooth_scroll_to(&mut self, top: f64);

    /// Open `url` in the named browsing context (e.g. `_blank`).
    fn open_url(&mut self, url: &str, target: &str);

    fn storage_get(&self, key: &str) -> Option<String>;

    fn storage_set(&mut self, key: &str, value: &str);

    // --- Subscriptions ---

    /// Deliver events of `kind` on `target` to the engine. Repeated calls for
    /// the same pair are coalesced into one listener.
    fn listen(&mut self, target: Target, kind: EventKind);

    /// Watch `node` for viewport intersection.
    fn observe(&mut self, observer: Observer, node: NodeId, options: &ObserverOptions);
}
