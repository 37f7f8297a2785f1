//! In-memory [`Host`] for unit tests.
//!
//! Holds a small element tree with classes, attributes, inline styles, text
//! and geometry, and answers queries with a minimal CSS matcher (type,
//! `.class`, `[attr]`, `[attr="v"]`, `[attr^="v"]`, `[attr*="v"]`,
//! `:not(..)`, descendant combinator, comma lists). Window side effects are
//! recorded for assertions.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::config::Config;
use crate::host::{EventKind, Host, NodeId, Observer, ObserverOptions, Rect, Target};
use crate::page::{Ctx, PageEffects, Task};
use crate::timer::{Millis, TimerQueue};

#[derive(Debug, Clone, Default)]
struct FakeNode {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    styles: Vec<(String, String)>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    disabled: bool,
    offset_top: f64,
    rect: Rect,
}

pub struct FakeHost {
    nodes: Vec<FakeNode>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    pub scroll_y: f64,
    pub viewport_width: f64,
    pub hour: u32,
    pub scrolls: Vec<f64>,
    pub opened: Vec<(String, String)>,
    pub storage: HashMap<String, String>,
    pub listeners: HashSet<(Target, EventKind)>,
    pub observed: Vec<(Observer, NodeId, ObserverOptions)>,
    pub injected: Vec<String>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHost {
    pub fn new() -> Self {
        let mut host = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            scroll_y: 0.0,
            viewport_width: 1280.0,
            hour: 20,
            scrolls: Vec::new(),
            opened: Vec::new(),
            storage: HashMap::new(),
            listeners: HashSet::new(),
            observed: Vec::new(),
            injected: Vec::new(),
        };
        let root = host.create_element("html");
        let head = host.create_element("head");
        let body = host.create_element("body");
        host.root = root;
        host.head = head;
        host.body = body;
        host.append_child(root, head);
        host.append_child(root, body);
        host
    }

    /// Append a new element under `parent`. `classes` is space-separated.
    pub fn el(&mut self, parent: NodeId, tag: &str, classes: &str) -> NodeId {
        let id = self.create_element(tag);
        self.node_mut(id).classes = classes.split_whitespace().map(ToString::to_string).collect();
        self.append_child(parent, id);
        id
    }

    /// Like [`FakeHost::el`] with text content.
    pub fn el_text(&mut self, parent: NodeId, tag: &str, classes: &str, text: &str) -> NodeId {
        let id = self.el(parent, tag, classes);
        self.node_mut(id).text = text.to_owned();
        id
    }

    pub fn root_body(&self) -> NodeId {
        self.body
    }

    pub fn set_offset_top(&mut self, node: NodeId, top: f64) {
        self.node_mut(node).offset_top = top;
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.node_mut(node).rect = rect;
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.node(node).disabled
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.node(node).classes.clone()
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.node(node).tag.clone()
    }

    pub fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node).children.clone()
    }

    pub fn is_listening(&self, target: Target, kind: EventKind) -> bool {
        self.listeners.contains(&(target, kind))
    }

    /// All connected elements carrying `class`.
    pub fn with_class(&self, class: &str) -> Vec<NodeId> {
        self.document_order().into_iter().filter(|id| self.has_class(*id, class)).collect()
    }

    fn node(&self, id: NodeId) -> &FakeNode {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut FakeNode {
        &mut self.nodes[id.0 as usize]
    }

    fn document_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    fn inline_style(&self, id: NodeId) -> Option<String> {
        let styles = &self.node(id).styles;
        if styles.is_empty() {
            return None;
        }
        Some(styles.iter().map(|(k, v)| format!("{k}: {v};")).collect::<Vec<_>>().join(" "))
    }

    fn attr_value(&self, id: NodeId, name: &str) -> Option<String> {
        match name {
            "class" => Some(self.node(id).classes.join(" ")),
            "style" => self.inline_style(id),
            _ => self.node(id).attrs.get(name).cloned(),
        }
    }

    fn matches(&self, id: NodeId, selector: &str) -> bool {
        split_top(selector, ',').iter().any(|complex| self.matches_complex(id, complex))
    }

    fn matches_complex(&self, id: NodeId, complex: &str) -> bool {
        let parts = split_top(complex, ' ');
        let Some((last, ancestors)) = parts.split_last() else {
            return false;
        };
        if !self.matches_compound(id, last) {
            return false;
        }
        let mut cursor = self.node(id).parent;
        for part in ancestors.iter().rev() {
            loop {
                let Some(ancestor) = cursor else {
                    return false;
                };
                cursor = self.node(ancestor).parent;
                if self.matches_compound(ancestor, part) {
                    break;
                }
            }
        }
        true
    }

    fn matches_compound(&self, id: NodeId, compound: &str) -> bool {
        let chars: Vec<char> = compound.chars().collect();
        let mut i = 0;
        let tag: String = take_ident(&chars, &mut i);
        if !tag.is_empty() && tag != "*" && !tag.eq_ignore_ascii_case(&self.node(id).tag) {
            return false;
        }
        while i < chars.len() {
            match chars[i] {
                '.' => {
                    i += 1;
                    let class = take_ident(&chars, &mut i);
                    if !self.has_class(id, &class) {
                        return false;
                    }
                }
                '[' => {
                    let inner = take_group(&chars, &mut i, '[', ']');
                    if !self.matches_attr(id, &inner) {
                        return false;
                    }
                }
                ':' => {
                    i += 1;
                    let pseudo = take_ident(&chars, &mut i);
                    let inner = take_group(&chars, &mut i, '(', ')');
                    if pseudo != "not" || self.matches(id, &inner) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
        true
    }

    fn matches_attr(&self, id: NodeId, inner: &str) -> bool {
        let (name, op, expected) = if let Some((name, value)) = inner.split_once("^=") {
            (name, "^=", value)
        } else if let Some((name, value)) = inner.split_once("*=") {
            (name, "*=", value)
        } else if let Some((name, value)) = inner.split_once('=') {
            (name, "=", value)
        } else {
            (inner, "", "")
        };
        let Some(actual) = self.attr_value(id, name.trim()) else {
            return false;
        };
        let expected = expected.trim().trim_matches('"');
        match op {
            "^=" => actual.starts_with(expected),
            "*=" => actual.contains(expected),
            "=" => actual == expected,
            _ => true,
        }
    }
}

fn take_ident(chars: &[char], i: &mut usize) -> String {
    let start = *i;
    while *i < chars.len() && (chars[*i].is_alphanumeric() || chars[*i] == '-' || chars[*i] == '_' || chars[*i] == '*') {
        *i += 1;
    }
    chars[start..*i].iter().collect()
}

/// Consume a bracketed group starting at `chars[*i] == open`, returning its inside.
fn take_group(chars: &[char], i: &mut usize, open: char, close: char) -> String {
    if *i >= chars.len() || chars[*i] != open {
        return String::new();
    }
    let start = *i + 1;
    let mut depth = 0;
    let mut in_quote = false;
    while *i < chars.len() {
        let c = chars[*i];
        if c == '"' {
            in_quote = !in_quote;
        } else if !in_quote && c == open {
            depth += 1;
        } else if !in_quote && c == close {
            depth -= 1;
            if depth == 0 {
                let inner = chars[start..*i].iter().collect();
                *i += 1;
                return inner;
            }
        }
        *i += 1;
    }
    chars[start..].iter().collect()
}

/// Split on `sep` outside brackets, parens and quotes; trims and drops empties.
fn split_top(s: &str, sep: char) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0_i32;
    let mut in_quote = false;
    for c in s.chars() {
        match c {
            '"' => in_quote = !in_quote,
            '(' | '[' if !in_quote => depth += 1,
            ')' | ']' if !in_quote => depth -= 1,
            _ => {}
        }
        let is_sep = if sep == ' ' { c.is_whitespace() } else { c == sep };
        if is_sep && depth == 0 && !in_quote {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    parts.push(current);
    parts.into_iter().map(|p| p.trim().to_owned()).filter(|p| !p.is_empty()).collect()
}

impl Host for FakeHost {
    fn query(&mut self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&mut self, selector: &str) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|id| *id != self.root && self.matches(*id, selector))
            .collect()
    }

    fn closest(&mut self, node: NodeId, selector: &str) -> Option<NodeId> {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if self.matches(id, selector) {
                return Some(id);
            }
            cursor = self.node(id).parent;
        }
        None
    }

    fn parent(&mut self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn children(&mut self, node: NodeId) -> Vec<NodeId> {
        self.node(node).children.clone()
    }

    fn text(&self, node: NodeId) -> String {
        let n = self.node(node);
        let mut out = n.text.clone();
        for child in &n.children {
            out.push_str(&self.text(*child));
        }
        out
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.attr_value(node, name)
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).classes.iter().any(|c| c == class)
    }

    fn style(&self, node: NodeId, property: &str) -> String {
        self.node(node)
            .styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.node(node).offset_top
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        self.node(node).rect
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == self.root {
                return true;
            }
            cursor = self.node(id).parent;
        }
        false
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        let children = std::mem::take(&mut self.node_mut(node).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
        self.node_mut(node).text = text.to_owned();
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.node_mut(node).classes.push(class.to_owned());
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.node_mut(node).classes.retain(|c| c != class);
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let styles = &mut self.node_mut(node).styles;
        styles.retain(|(k, _)| k != property);
        if !value.is_empty() {
            styles.push((property.to_owned(), value.to_owned()));
        }
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.node_mut(node).attrs.insert(name.to_owned(), value.to_owned());
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        self.node_mut(node).disabled = disabled;
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(FakeNode { tag: tag.to_owned(), ..FakeNode::default() });
        id
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.remove(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.node_mut(node).parent.take() {
            self.node_mut(parent).children.retain(|c| *c != node);
        }
    }

    fn body(&mut self) -> Option<NodeId> {
        Some(self.body)
    }

    fn inject_styles(&mut self, css: &str) {
        let style = self.el(self.head, "style", "");
        self.node_mut(style).text = css.to_owned();
        self.injected.push(css.to_owned());
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn local_hour(&self) -> u32 {
        self.hour
    }

    fn smooth_scroll_to(&mut self, top: f64) {
        self.scrolls.push(top);
    }

    fn open_url(&mut self, url: &str, target: &str) {
        self.opened.push((url.to_owned(), target.to_owned()));
    }

    fn storage_get(&self, key: &str) -> Option<String> {
        self.storage.get(key).cloned()
    }

    fn storage_set(&mut self, key: &str, value: &str) {
        self.storage.insert(key.to_owned(), value.to_owned());
    }

    fn listen(&mut self, target: Target, kind: EventKind) {
        self.listeners.insert((target, kind));
    }

    fn observe(&mut self, observer: Observer, node: NodeId, options: &ObserverOptions) {
        self.observed.push((observer, node, options.clone()));
    }
}

// =============================================================================
// HARNESS
// =============================================================================

/// A fake host plus the state a controller needs outside [`PageEffects`].
pub struct Harness {
    pub host: FakeHost,
    pub timers: TimerQueue<Task>,
    pub config: Config,
    pub now: Millis,
}

impl Harness {
    pub fn new(host: FakeHost) -> Self {
        Self { host, timers: TimerQueue::new(), config: Config::default(), now: 0 }
    }

    pub fn ctx(&mut self) -> Ctx<'_, FakeHost> {
        Ctx { host: &mut self.host, timers: &mut self.timers, config: &self.config, now: self.now }
    }

    /// Fire due tasks one by one up to `until`, handing each to `run`.
    pub fn run_until<F>(&mut self, until: Millis, mut run: F)
    where
        F: FnMut(&mut Ctx<'_, FakeHost>, Task),
    {
        while let Some((handle, task)) = self.timers.pop_due(until) {
            self.now = handle.deadline();
            let mut ctx = self.ctx();
            run(&mut ctx, task);
        }
        self.now = until;
    }
}

/// Step a started page through each deadline up to `until`, as a browser
/// with exact timers would.
pub fn run_until(page: &mut PageEffects, host: &mut FakeHost, until: Millis) {
    while let Some(deadline) = page.next_deadline() {
        if deadline > until {
            break;
        }
        page.advance(host, deadline);
    }
}

// =============================================================================
// SAMPLE PAGE
// =============================================================================

/// Handles into [`sample_page`].
pub struct SamplePage {
    pub navbar: NodeId,
    pub nav_menu: NodeId,
    pub home: NodeId,
    pub menus: NodeId,
    pub about: NodeId,
    pub contact_link: NodeId,
    pub phone_link: NodeId,
    pub hero: NodeId,
    pub hero_title: NodeId,
    pub hero_text: NodeId,
    pub indicator: NodeId,
    pub service: NodeId,
    pub service_heading: NodeId,
    pub service_grid: NodeId,
    pub cards: Vec<NodeId>,
    pub book: NodeId,
    pub menu_section: NodeId,
    pub option: NodeId,
    pub samples: Vec<NodeId>,
    pub floating: NodeId,
    pub photo: NodeId,
    pub social: Vec<NodeId>,
    pub contact: NodeId,
}

/// A page shaped like the production markup.
pub fn sample_page() -> (FakeHost, SamplePage) {
    let mut h = FakeHost::new();
    let body = h.root_body();

    let navbar = h.el(body, "nav", "nav-bar");
    let nav_menu = h.el(navbar, "ul", "nav-menu");
    let home = h.el_text(nav_menu, "a", "", "HOME");
    h.set_attr(home, "href", "#");
    let menus = h.el_text(nav_menu, "a", "", " MENUS ");
    h.set_attr(menus, "href", "#menus");
    let about = h.el_text(nav_menu, "a", "", "ABOUT US");
    h.set_attr(about, "href", "#about");
    let contact_link = h.el_text(nav_menu, "a", "", "CONTACT");
    h.set_attr(contact_link, "href", "#contact");
    let phone_link = h.el_text(nav_menu, "a", "", "CALL");
    h.set_attr(phone_link, "href", "tel:+919334529892");

    let hero = h.el(body, "div", "hero-section");
    h.set_offset_top(hero, 0.0);
    let hero_content = h.el(hero, "div", "hero-content");
    let hero_title = h.el_text(hero_content, "h1", "", "Djinn");
    let hero_text = h.el_text(hero_content, "p", "", "Kerala kitchen.");
    let indicator = h.el(hero, "div", "scroll-indicator");
    let floating = h.el(hero, "div", "food-survey");

    let service = h.el(body, "section", "service");
    h.set_attr(service, "id", "about");
    h.set_offset_top(service, 900.0);
    let service_heading = h.el_text(service, "h2", "", "Our Services");
    h.set_offset_top(service_heading, 950.0);
    let service_grid = h.el(service, "div", "service-grid");
    let cards = (0..3).map(|_| h.el(service_grid, "div", "service-card")).collect();
    let book = h.el_text(service, "a", "book", "PLAN YOUR FEAST");
    h.set_attr(book, "href", "#");

    let menu_section = h.el(body, "section", "menu-section");
    h.set_attr(menu_section, "id", "menus");
    h.set_offset_top(menu_section, 1800.0);
    let option = h.el(menu_section, "div", "option-menu");
    let sample_grid = h.el(menu_section, "div", "sample-grid");
    let samples = (0..2).map(|_| h.el(sample_grid, "div", "sample-menu")).collect();
    let photo = h.el(menu_section, "img", "");
    h.set_attr(photo, "src", "dish.jpg");

    let contact = h.el(body, "section", "contact");
    h.set_attr(contact, "id", "contact");
    h.set_offset_top(contact, 2600.0);
    let social_box = h.el(contact, "div", "social-medias");
    let social = (0..2).map(|_| h.el(social_box, "img", "")).collect();

    let page = SamplePage {
        navbar,
        nav_menu,
        home,
        menus,
        about,
        contact_link,
        phone_link,
        hero,
        hero_title,
        hero_text,
        indicator,
        service,
        service_heading,
        service_grid,
        cards,
        book,
        menu_section,
        option,
        samples,
        floating,
        photo,
        social,
        contact,
    };
    (h, page)
}
