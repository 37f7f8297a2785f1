//! [`Host`] over the live DOM.
//!
//! Elements are registered the first time a query returns them and are
//! addressed by their handle afterwards. A `WeakMap` maps elements back to
//! handles; removing an element releases it and its registered descendants. Listeners and intersection
//! observers forward into the [`Page`] through a weak handle, so the host
//! never keeps the page alive on its own. Failed browser calls are logged and
//! otherwise ignored.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use effects::event::{Event, Pointer};
use effects::host::{EventKind, Host, NodeId, Observer, ObserverOptions, Rect, Target};
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, EventTarget, Node, HtmlButtonElement, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollToOptions, Storage, TouchEvent, Window,
};

use crate::app::{self, Page};
use crate::error::{BootError, describe};
use crate::registry::Registry;

type Listener = Closure<dyn FnMut(web_sys::Event)>;
type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

pub struct DomHost {
    window: Window,
    document: Document,
    head: Element,
    nodes: Registry<Element>,
    handles: js_sys::WeakMap,
    /// Detached element returned when `createElement` throws.
    scratch: NodeId,
    page: Weak<RefCell<Page>>,
    listeners: HashMap<(Target, EventKind), Listener>,
    observers: HashMap<Observer, (IntersectionObserver, ObserverCallback)>,
}

impl DomHost {
    pub fn new(window: Window, document: Document) -> Result<Self, BootError> {
        let head: Element = document.head().ok_or(BootError::NoHead)?.into();
        let mut nodes = Registry::default();
        let scratch = nodes.insert(document.create_element("div")?);
        Ok(Self {
            window,
            document,
            head,
            nodes,
            handles: js_sys::WeakMap::new(),
            scratch,
            page: Weak::new(),
            listeners: HashMap::new(),
            observers: HashMap::new(),
        })
    }

    /// Point callbacks at `page`. Must run before the engine subscribes.
    pub fn bind(&mut self, page: Weak<RefCell<Page>>) {
        self.page = page;
    }

    pub fn page(&self) -> Weak<RefCell<Page>> {
        self.page.clone()
    }

    /// Handle for `element`, registering it on first sight.
    pub fn node_for(&mut self, element: Element) -> NodeId {
        let key: &js_sys::Object = element.as_ref();
        if let Some(node) = stored_node(&self.handles.get(key)).filter(|node| self.nodes.contains(*node)) {
            return node;
        }
        let node = self.nodes.insert(element.clone());
        self.handles.set(key, &JsValue::from(node.0));
        node
    }

    /// Remove every listener and disconnect the observers.
    pub fn detach(&mut self) {
        for ((target, kind), listener) in std::mem::take(&mut self.listeners) {
            let Some(event_target) = self.event_target(target) else {
                continue;
            };
            logged(
                event_target.remove_event_listener_with_callback(event_name(kind), listener.as_ref().unchecked_ref()),
                "remove listener",
            );
        }
        for (observer, _callback) in self.observers.values() {
            observer.disconnect();
        }
        self.observers.clear();
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node)
    }

    fn html(&self, node: NodeId) -> Option<&HtmlElement> {
        self.element(node)?.dyn_ref::<HtmlElement>()
    }

    fn storage(&self) -> Option<Storage> {
        logged(self.window.local_storage(), "open local storage").flatten()
    }

    fn event_target(&self, target: Target) -> Option<EventTarget> {
        match target {
            Target::Window => Some(self.window.clone().into()),
            Target::Document => Some(self.document.clone().into()),
            Target::Node(node) => self.element(node).map(|element| element.clone().into()),
        }
    }

    fn build_observer(
        &self,
        observer: Observer,
        options: &ObserverOptions,
    ) -> Result<(IntersectionObserver, ObserverCallback), JsValue> {
        let page = self.page.clone();
        let callback = ObserverCallback::new(move |entries: js_sys::Array, _: IntersectionObserver| {
            let seen = entries
                .iter()
                .filter_map(|entry| {
                    let entry = entry.dyn_ref::<IntersectionObserverEntry>()?;
                    Some((entry.target(), entry.is_intersecting()))
                })
                .collect();
            app::deliver_intersections(&page, observer, seen);
        });
        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let io = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok((io, callback))
    }
}

impl Drop for DomHost {
    fn drop(&mut self) {
        self.detach();
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn stored_node(value: &JsValue) -> Option<NodeId> {
    value.as_f64().map(|raw| NodeId(raw as u32))
}

fn logged<T>(result: Result<T, JsValue>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("dom: {what} failed: {}", describe(&err));
            None
        }
    }
}

fn event_name(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Click => "click",
        EventKind::MouseEnter => "mouseenter",
        EventKind::MouseLeave => "mouseleave",
        EventKind::MouseMove => "mousemove",
        EventKind::Load => "load",
        EventKind::Error => "error",
        EventKind::Scroll => "scroll",
        EventKind::TouchStart => "touchstart",
        EventKind::TouchEnd => "touchend",
        EventKind::TouchCancel => "touchcancel",
    }
}

/// Engine event for a DOM event seen by the listener on `target`.
fn translate(target: Target, kind: EventKind, raw: &web_sys::Event) -> Option<Event> {
    let node = match target {
        Target::Node(node) => Some(node),
        Target::Window | Target::Document => None,
    };
    let event = match kind {
        EventKind::Click => Event::Click { node: node?, pointer: pointer(raw) },
        EventKind::MouseEnter => Event::MouseEnter { node: node? },
        EventKind::MouseLeave => Event::MouseLeave { node: node? },
        EventKind::MouseMove => Event::MouseMove { node: node?, pointer: pointer(raw) },
        EventKind::Load => Event::Load { node: node? },
        EventKind::Error => Event::Error { node: node? },
        EventKind::Scroll => Event::Scroll,
        EventKind::TouchStart => Event::TouchStart { screen_y: touch_screen_y(raw)? },
        EventKind::TouchEnd => Event::touch_end(touch_screen_y(raw)),
        EventKind::TouchCancel => Event::TouchCancel,
    };
    Some(event)
}

fn pointer(raw: &web_sys::Event) -> Pointer {
    raw.dyn_ref::<MouseEvent>()
        .map_or(Pointer::new(0.0, 0.0), |mouse| Pointer::new(f64::from(mouse.client_x()), f64::from(mouse.client_y())))
}

fn touch_screen_y(raw: &web_sys::Event) -> Option<f64> {
    let touch = raw.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(f64::from(touch.screen_y()))
}

impl Host for DomHost {
    fn query(&mut self, selector: &str) -> Option<NodeId> {
        let element = logged(self.document.query_selector(selector), "querySelector").flatten()?;
        Some(self.node_for(element))
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        let Some(list) = logged(self.document.query_selector_all(selector), "querySelectorAll") else {
            return Vec::new();
        };
        let mut found = Vec::new();
        for index in 0..list.length() {
            if let Some(element) = list.item(index).and_then(|node| node.dyn_ref::<Element>().cloned()) {
                found.push(self.node_for(element));
            }
        }
        found
    }

    fn closest(&mut self, node: NodeId, selector: &str) -> Option<NodeId> {
        let element = self.element(node)?.clone();
        let ancestor = logged(element.closest(selector), "closest").flatten()?;
        Some(self.node_for(ancestor))
    }

    fn parent(&mut self, node: NodeId) -> Option<NodeId> {
        let parent = self.element(node)?.parent_element()?;
        Some(self.node_for(parent))
    }

    fn children(&mut self, node: NodeId) -> Vec<NodeId> {
        let Some(collection) = self.element(node).map(Element::children) else {
            return Vec::new();
        };
        let mut found = Vec::new();
        for index in 0..collection.length() {
            if let Some(child) = collection.item(index) {
                found.push(self.node_for(child));
            }
        }
        found
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node).and_then(|element| element.text_content()).unwrap_or_default()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|element| element.class_list().contains(class))
    }

    fn style(&self, node: NodeId, property: &str) -> String {
        self.html(node)
            .and_then(|element| logged(element.style().get_property_value(property), "read style"))
            .unwrap_or_default()
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.html(node).map_or(0.0, |element| f64::from(element.offset_top()))
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.element(node).map_or_else(Rect::default, |element| {
            let rect = element.get_bounding_client_rect();
            Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
        })
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|element| element.is_connected())
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            logged(element.class_list().add_1(class), "add class");
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            logged(element.class_list().remove_1(class), "remove class");
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(element) = self.html(node) else {
            return;
        };
        let style = element.style();
        if value.is_empty() {
            logged(style.remove_property(property), "clear style");
        } else {
            logged(style.set_property(property, value), "set style");
        }
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            logged(element.set_attribute(name, value), "set attribute");
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        let Some(element) = self.element(node) else {
            return;
        };
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            logged(element.set_attribute("disabled", ""), "set disabled");
        } else {
            logged(element.remove_attribute("disabled"), "clear disabled");
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        match self.document.create_element(tag) {
            Ok(element) => self.node_for(element),
            Err(err) => {
                warn!("dom: createElement({tag}) failed: {}", describe(&err));
                self.scratch
            }
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) {
            logged(parent.append_child(child), "append child");
        }
    }

    fn remove(&mut self, node: NodeId) {
        let Some(element) = self.element(node).cloned() else {
            return;
        };
        element.remove();
        let released = self.nodes.release_where(|known| {
            let known: &Node = known;
            element.contains(Some(known))
        });
        for known in &released {
            let key: &js_sys::Object = known.as_ref();
            self.handles.delete(key);
        }
        debug!("dom: released {} handles, {} registered", released.len(), self.nodes.len());
    }

    fn body(&mut self) -> Option<NodeId> {
        let body = self.document.body()?;
        Some(self.node_for(body.into()))
    }

    fn inject_styles(&mut self, css: &str) {
        let Some(style) = logged(self.document.create_element("style"), "create style") else {
            return;
        };
        style.set_text_content(Some(css));
        logged(self.head.append_child(&style), "inject styles");
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_width(&self) -> f64 {
        self.window.inner_width().map_or(f64::INFINITY, |width| width.as_f64().unwrap_or(f64::INFINITY))
    }

    fn local_hour(&self) -> u32 {
        js_sys::Date::new_0().get_hours()
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn open_url(&mut self, url: &str, target: &str) {
        if let Some(None) = logged(self.window.open_with_url_and_target(url, target), "window.open") {
            warn!("dom: window.open returned no window (popup blocked?)");
        }
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        logged(self.storage()?.get_item(key), "storage read").flatten()
    }

    fn storage_set(&mut self, key: &str, value: &str) {
        if let Some(storage) = self.storage() {
            logged(storage.set_item(key, value), "storage write");
        }
    }

    fn listen(&mut self, target: Target, kind: EventKind) {
        if self.listeners.contains_key(&(target, kind)) {
            return;
        }
        let Some(event_target) = self.event_target(target) else {
            return;
        };
        let page = self.page.clone();
        let listener = Listener::new(move |raw: web_sys::Event| {
            if let Some(event) = translate(target, kind, &raw) {
                app::deliver(&page, &event, &raw);
            }
        });
        let added = event_target.add_event_listener_with_callback(event_name(kind), listener.as_ref().unchecked_ref());
        if logged(added, "add listener").is_some() {
            self.listeners.insert((target, kind), listener);
        }
    }

    fn observe(&mut self, observer: Observer, node: NodeId, options: &ObserverOptions) {
        let Some(element) = self.element(node).cloned() else {
            return;
        };
        if !self.observers.contains_key(&observer) {
            let Some(built) = logged(self.build_observer(observer, options), "create IntersectionObserver") else {
                return;
            };
            self.observers.insert(observer, built);
        }
        if let Some((io, _)) = self.observers.get(&observer) {
            io.observe(&element);
        }
    }
}
