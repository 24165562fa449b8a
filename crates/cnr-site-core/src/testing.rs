//! In-memory view and event harness for controller tests.
//!
//! [`FakeView`] is a small node tree with just enough selector support for the
//! page's selectors. [`Harness`] fires events through the site's own
//! subscription list, bubbling clicks and keys up to the document like a
//! browser would.

use crate::config::{RevealConfig, SiteConfig};
use crate::error::SubmitError;
use crate::event::{Dispatch, EventKind, SiteEvent, Target, WatcherId};
use crate::site::Site;
use crate::submit::{ContactSubmission, Submitter};
use crate::view::View;
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct FakeNode {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    value: String,
    text: String,
    styles: BTreeMap<String, String>,
    disabled: bool,
    parent: Option<NodeId>,
    offset_top: f64,
    offset_height: f64,
}

#[derive(Debug, Default)]
struct DomState {
    nodes: Vec<FakeNode>,
    active: Option<NodeId>,
    scroll_y: f64,
    scrolls: Vec<f64>,
    alerts: Vec<String>,
    observed: Vec<(WatcherId, NodeId)>,
    observe_options: Vec<RevealConfig>,
    reduced_motion: bool,
    now_ms: f64,
}

/// `tag#id.class.class`, every part optional.
struct Compound<'a> {
    tag: Option<&'a str>,
    id: Option<&'a str>,
    classes: Vec<&'a str>,
}

fn parse_compound(spec: &str) -> Compound<'_> {
    let mut compound = Compound {
        tag: None,
        id: None,
        classes: Vec::new(),
    };
    let mut start = 0;
    let mut marker = None;
    let bytes = spec.as_bytes();
    for i in 0..=bytes.len() {
        if i < bytes.len() && bytes[i] != b'#' && bytes[i] != b'.' {
            continue;
        }
        let part = &spec[start..i];
        if !part.is_empty() {
            match marker {
                None => compound.tag = Some(part),
                Some(b'#') => compound.id = Some(part),
                _ => compound.classes.push(part),
            }
        }
        if i < bytes.len() {
            marker = Some(bytes[i]);
            start = i + 1;
        }
    }
    compound
}

fn matches_simple(node: &FakeNode, selector: &str) -> bool {
    let (head, attr) = match selector.find('[') {
        Some(i) => (&selector[..i], Some(&selector[i..])),
        None => (selector, None),
    };
    let c = parse_compound(head);
    if c.tag.is_some_and(|t| t != node.tag)
        || c.id.is_some_and(|id| node.id.as_deref() != Some(id))
        || !c.classes.iter().all(|cls| node.classes.iter().any(|n| n.as_str() == *cls))
    {
        return false;
    }
    match attr {
        None => true,
        Some(attr) => {
            let inner = attr.trim_start_matches('[').trim_end_matches(']');
            let Some((name, prefix)) = inner.split_once("^=") else {
                return node.attrs.contains_key(inner);
            };
            let prefix = prefix.trim_matches('"');
            node.attrs.get(name).is_some_and(|v| v.starts_with(prefix))
        }
    }
}

fn matches(node: &FakeNode, selector: &str) -> bool {
    selector.split(',').map(str::trim).any(|s| matches_simple(node, s))
}

#[derive(Clone)]
pub struct FakeView {
    state: Rc<RefCell<DomState>>,
}

impl Default for FakeView {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeView {
    /// A document holding only `<body>`.
    pub fn new() -> Self {
        let body = FakeNode {
            tag: "body".to_owned(),
            ..FakeNode::default()
        };
        Self {
            state: Rc::new(RefCell::new(DomState {
                nodes: vec![body],
                ..DomState::default()
            })),
        }
    }

    pub fn body_node(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child described as `tag#id.class`.
    pub fn add(&self, parent: NodeId, spec: &str) -> NodeId {
        let c = parse_compound(spec);
        let node = FakeNode {
            tag: c.tag.unwrap_or("div").to_owned(),
            id: c.id.map(str::to_owned),
            classes: c.classes.iter().map(|s| (*s).to_owned()).collect(),
            parent: Some(parent),
            ..FakeNode::default()
        };
        let mut state = self.state.borrow_mut();
        state.nodes.push(node);
        NodeId(state.nodes.len() - 1)
    }

    pub fn set_attr(&self, node: NodeId, name: &str, value: &str) {
        self.state.borrow_mut().nodes[node.0]
            .attrs
            .insert(name.to_owned(), value.to_owned());
    }

    pub fn set_offsets(&self, node: NodeId, top: f64, height: f64) {
        let mut state = self.state.borrow_mut();
        state.nodes[node.0].offset_top = top;
        state.nodes[node.0].offset_height = height;
    }

    pub fn set_text_of(&self, node: NodeId, text: &str) {
        self.state.borrow_mut().nodes[node.0].text = text.to_owned();
    }

    pub fn text_of(&self, node: NodeId) -> String {
        self.state.borrow().nodes[node.0].text.clone()
    }

    pub fn text_by_id(&self, id: &str) -> String {
        let node = self.by_id(id).unwrap_or_else(|| panic!("no element #{id}"));
        self.text_of(node)
    }

    pub fn set_value_of(&self, node: NodeId, value: &str) {
        self.state.borrow_mut().nodes[node.0].value = value.to_owned();
    }

    pub fn value_of(&self, node: NodeId) -> String {
        self.state.borrow().nodes[node.0].value.clone()
    }

    pub fn class_present(&self, node: NodeId, class: &str) -> bool {
        self.has_class(&node, class)
    }

    pub fn classes_of(&self, node: NodeId) -> Vec<String> {
        self.state.borrow().nodes[node.0].classes.clone()
    }

    pub fn remove_class_of(&self, node: NodeId, class: &str) {
        self.remove_class(&node, class);
    }

    /// Inline style value, empty when unset.
    pub fn style(&self, node: NodeId, property: &str) -> String {
        self.state.borrow().nodes[node.0]
            .styles
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.state.borrow().nodes[node.0].disabled
    }

    pub fn focus_node(&self, node: NodeId) {
        self.focus(&node);
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active_element()
    }

    pub fn set_scroll(&self, y: f64) {
        self.state.borrow_mut().scroll_y = y;
    }

    pub fn set_reduced_motion(&self, reduced: bool) {
        self.state.borrow_mut().reduced_motion = reduced;
    }

    pub fn scrolls(&self) -> Vec<f64> {
        self.state.borrow().scrolls.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }

    /// Pairs currently watched.
    pub fn observed(&self) -> Vec<(WatcherId, NodeId)> {
        self.state.borrow().observed.clone()
    }

    pub fn observe_calls(&self) -> usize {
        self.state.borrow().observe_options.len()
    }

    pub fn observe_options(&self) -> Vec<RevealConfig> {
        self.state.borrow().observe_options.clone()
    }

    /// `node` followed by its ancestors up to the body.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let state = self.state.borrow();
        let mut chain = vec![node];
        let mut current = node;
        while let Some(parent) = state.nodes[current.0].parent {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    fn document_order(&self) -> Vec<NodeId> {
        fn walk(state: &DomState, node: NodeId, out: &mut Vec<NodeId>) {
            out.push(node);
            for (i, child) in state.nodes.iter().enumerate() {
                if child.parent == Some(node) {
                    walk(state, NodeId(i), out);
                }
            }
        }
        let state = self.state.borrow();
        let mut out = Vec::with_capacity(state.nodes.len());
        walk(&state, NodeId(0), &mut out);
        out
    }

    fn with_node<R>(&self, node: NodeId, f: impl FnOnce(&mut FakeNode) -> R) -> R {
        f(&mut self.state.borrow_mut().nodes[node.0])
    }
}

impl View for FakeView {
    type Node = NodeId;

    fn by_id(&self, id: &str) -> Option<NodeId> {
        let order = self.document_order();
        let state = self.state.borrow();
        order
            .into_iter()
            .find(|n| state.nodes[n.0].id.as_deref() == Some(id))
    }

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let order = self.document_order();
        let state = self.state.borrow();
        order
            .into_iter()
            .filter(|n| matches(&state.nodes[n.0], selector))
            .collect()
    }

    fn query_within(&self, parent: &NodeId, selector: &str) -> Option<NodeId> {
        self.query_all(selector)
            .into_iter()
            .find(|n| n != parent && self.contains(parent, n))
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body_node())
    }

    fn active_element(&self) -> Option<NodeId> {
        Some(self.state.borrow().active.unwrap_or(self.body_node()))
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.ancestors(*node).contains(ancestor)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        self.with_node(*node, |n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_owned());
            }
        });
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.with_node(*node, |n| n.classes.retain(|c| c != class));
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.with_node(*node, |n| n.classes.iter().any(|c| c == class))
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.with_node(*node, |n| n.attrs.get(name).cloned())
    }

    fn value(&self, node: &NodeId) -> String {
        self.value_of(*node)
    }

    fn set_value(&self, node: &NodeId, value: &str) {
        self.set_value_of(*node, value);
    }

    fn text(&self, node: &NodeId) -> String {
        self.text_of(*node)
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.set_text_of(*node, text);
    }

    fn set_disabled(&self, node: &NodeId, disabled: bool) {
        self.with_node(*node, |n| n.disabled = disabled);
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.with_node(*node, |n| {
            if value.is_empty() {
                n.styles.remove(property);
            } else {
                n.styles.insert(property.to_owned(), value.to_owned());
            }
        });
    }

    fn focus(&self, node: &NodeId) {
        self.state.borrow_mut().active = Some(*node);
    }

    /// Restores every descendant control to its `value` attribute.
    fn reset_form(&self, form: &NodeId) {
        for node in self.document_order() {
            if node != *form && self.contains(form, &node) {
                self.with_node(node, |n| {
                    n.value = n.attrs.get("value").cloned().unwrap_or_default();
                });
            }
        }
    }

    fn offset_top(&self, node: &NodeId) -> f64 {
        self.with_node(*node, |n| n.offset_top)
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.with_node(*node, |n| n.offset_height)
    }

    fn scroll_y(&self) -> f64 {
        self.state.borrow().scroll_y
    }

    fn scroll_to(&self, top: f64) {
        let mut state = self.state.borrow_mut();
        state.scrolls.push(top);
        state.scroll_y = top;
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.state.borrow().reduced_motion
    }

    fn now_ms(&self) -> f64 {
        self.state.borrow().now_ms
    }

    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_owned());
    }

    fn observe(&self, watcher: WatcherId, node: &NodeId, options: &RevealConfig) {
        let mut state = self.state.borrow_mut();
        state.observed.push((watcher, *node));
        state.observe_options.push(options.clone());
    }

    fn unobserve(&self, watcher: WatcherId, node: &NodeId) {
        self.state
            .borrow_mut()
            .observed
            .retain(|(w, n)| !(*w == watcher && n == node));
    }
}

/// Installs a [`Site`] over a [`FakeView`] and fires events at it.
pub struct Harness {
    pub site: Site<FakeView>,
}

impl Harness {
    pub fn new(view: FakeView) -> Self {
        Self::with_config(view, SiteConfig::default())
    }

    pub fn with_config(view: FakeView, config: SiteConfig) -> Self {
        Self {
            site: Site::install(view, config),
        }
    }

    pub fn view(&self) -> &FakeView {
        self.site.view()
    }

    fn deliver(&self, target: &Target<NodeId>, kind: EventKind, event: &SiteEvent<NodeId>) -> Dispatch {
        self.site
            .subscriptions()
            .into_iter()
            .filter(|(_, s)| s.kind == kind && s.target == *target)
            .fold(Dispatch::default(), |acc, (slot, _)| {
                acc.merge(self.site.dispatch(slot, event))
            })
    }

    pub fn click(&self, node: NodeId) -> Dispatch {
        let mut dispatch = Dispatch::default();
        for current in self.view().ancestors(node) {
            let event = SiteEvent::Click {
                current_target: Some(current),
                target: Some(node),
            };
            dispatch = dispatch.merge(self.deliver(&Target::Node(current), EventKind::Click, &event));
        }
        let event = SiteEvent::Click {
            current_target: None,
            target: Some(node),
        };
        dispatch.merge(self.deliver(&Target::Document, EventKind::Click, &event))
    }

    /// Key press on the focused element, bubbling to the document.
    pub fn key(&self, key: &str, shift: bool) -> Dispatch {
        let event = SiteEvent::KeyDown {
            key: key.to_owned(),
            shift,
        };
        let origin = self.view().active().unwrap_or(self.view().body_node());
        let mut dispatch = Dispatch::default();
        for current in self.view().ancestors(origin) {
            dispatch = dispatch.merge(self.deliver(&Target::Node(current), EventKind::KeyDown, &event));
        }
        dispatch.merge(self.deliver(&Target::Document, EventKind::KeyDown, &event))
    }

    pub fn mouse_down(&self) -> Dispatch {
        self.deliver(&Target::Document, EventKind::MouseDown, &SiteEvent::MouseDown)
    }

    /// Replace the field's value, then fire `input` on it.
    pub fn type_text(&self, node: NodeId, text: &str) -> Dispatch {
        self.view().set_value_of(node, text);
        self.deliver(&Target::Node(node), EventKind::Input, &SiteEvent::Input { target: node })
    }

    pub fn blur(&self, node: NodeId) -> Dispatch {
        self.deliver(&Target::Node(node), EventKind::Blur, &SiteEvent::Blur { target: node })
    }

    pub fn submit(&self, form: NodeId) -> Dispatch {
        self.deliver(&Target::Node(form), EventKind::Submit, &SiteEvent::Submit)
    }

    pub fn scroll(&self, y: f64) -> Dispatch {
        self.view().set_scroll(y);
        self.deliver(&Target::Window, EventKind::Scroll, &SiteEvent::Scroll)
    }

    /// Report `node` as intersecting to every watcher still observing it.
    pub fn intersect(&self, node: NodeId) {
        let watchers: Vec<WatcherId> = self
            .view()
            .observed()
            .into_iter()
            .filter(|(_, n)| *n == node)
            .map(|(w, _)| w)
            .collect();
        for watcher in watchers {
            self.site.dispatch_intersection(watcher, node, true);
        }
    }
}

/// Submitter double that snapshots the submit button while it runs.
pub struct RecordingSubmitter {
    view: Option<FakeView>,
    button: Option<NodeId>,
    outcome: Result<(), SubmitError>,
    states: RefCell<Vec<(String, bool)>>,
    calls: Cell<usize>,
}

impl RecordingSubmitter {
    pub fn succeeding(view: FakeView, button: NodeId) -> Self {
        Self::build(Some(view), Some(button), Ok(()))
    }

    pub fn failing(view: FakeView, button: NodeId, err: SubmitError) -> Self {
        Self::build(Some(view), Some(button), Err(err))
    }

    pub fn detached() -> Self {
        Self::build(None, None, Ok(()))
    }

    fn build(view: Option<FakeView>, button: Option<NodeId>, outcome: Result<(), SubmitError>) -> Self {
        Self {
            view,
            button,
            outcome,
            states: RefCell::new(Vec::new()),
            calls: Cell::new(0),
        }
    }

    /// `(label, disabled)` of the button at each call.
    pub fn button_states(&self) -> Vec<(String, bool)> {
        self.states.borrow().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl Submitter for RecordingSubmitter {
    async fn submit(&self, _submission: &ContactSubmission) -> Result<(), SubmitError> {
        self.calls.set(self.calls.get() + 1);
        if let (Some(view), Some(button)) = (&self.view, self.button) {
            self.states
                .borrow_mut()
                .push((view.text_of(button), view.is_disabled(button)));
        }
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_cover_page_shapes() {
        let view = FakeView::new();
        let body = view.body_node();
        let card = view.add(body, "div.card.featured");
        let link = view.add(card, "a#more.nav__link");
        view.set_attr(link, "href", "#services");
        let external = view.add(card, "a");
        view.set_attr(external, "href", "/blog");

        assert_eq!(view.query_all(".card"), vec![card]);
        assert_eq!(view.query_all("div.featured, .nav__link"), vec![card, link]);
        assert_eq!(view.query_all(r##"a[href^="#"]"##), vec![link]);
        assert_eq!(view.by_id("more"), Some(link));
        assert_eq!(view.query_within(&card, "a"), Some(link));
        assert!(view.contains(&body, &link));
        assert!(!view.contains(&link, &card));
    }

    #[test]
    fn query_results_follow_tree_order() {
        let view = FakeView::new();
        let body = view.body_node();
        let first = view.add(body, "section");
        let second = view.add(body, "section");
        let nested = view.add(first, "div.card");
        let late = view.add(second, "div.card");
        assert_eq!(view.query_all(".card"), vec![nested, late]);
    }
}
