//! DOM access.
//!
//! Free helpers over `web-sys`, and [`WebView`], the browser implementation of
//! the core `View` capability. Element handles are plain `web_sys::Element`s;
//! they are reference-counted by the JS GC, so cloning is cheap.

use crate::observers::{self, IntersectionSink};
use cnr_site_core::{RevealConfig, View, WatcherId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlTextAreaElement, IntersectionObserver, ScrollBehavior, ScrollToOptions, Window,
};

// ── Helpers ──

pub fn window() -> Window {
    gloo_utils::window()
}

pub fn document() -> Document {
    gloo_utils::document()
}

pub fn by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

/// `document.readyState` ("loading", "interactive" or "complete").
pub fn ready_state() -> String {
    document().ready_state()
}

fn collect(list: Result<web_sys::NodeList, JsValue>) -> Vec<Element> {
    let Ok(nl) = list else {
        return Vec::new();
    };
    let mut v = Vec::with_capacity(nl.length() as usize);
    for i in 0..nl.length() {
        if let Some(e) = nl.item(i) {
            if let Ok(el) = e.dyn_into::<Element>() {
                v.push(el);
            }
        }
    }
    v
}

// ── WebView ──

pub struct WebView {
    window: Window,
    document: Document,
    observers: RefCell<HashMap<WatcherId, IntersectionObserver>>,
    sink: IntersectionSink,
}

impl WebView {
    pub fn new() -> Self {
        Self {
            window: window(),
            document: document(),
            observers: RefCell::new(HashMap::new()),
            sink: Rc::new(RefCell::new(None)),
        }
    }

    /// Slot the intersection observers report into. Filled once the site
    /// exists; entries arriving before that are dropped.
    pub fn intersection_sink(&self) -> IntersectionSink {
        self.sink.clone()
    }
}

impl Default for WebView {
    fn default() -> Self {
        Self::new()
    }
}

impl View for WebView {
    type Node = Element;

    fn by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok()?
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        collect(self.document.query_selector_all(selector))
    }

    fn query_within(&self, parent: &Element, selector: &str) -> Option<Element> {
        parent.query_selector(selector).ok()?
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &web_sys::Node = node;
        ancestor.contains(Some(node))
    }

    fn add_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().add_1(class);
    }

    fn remove_class(&self, node: &Element, class: &str) {
        let _ = node.class_list().remove_1(class);
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn has_attribute(&self, node: &Element, name: &str) -> bool {
        node.has_attribute(name)
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else {
            String::new()
        }
    }

    fn set_value(&self, node: &Element, value: &str) {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        }
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_disabled(&self, node: &Element, disabled: bool) {
        if let Some(button) = node.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = node.set_attribute("disabled", "");
        } else {
            let _ = node.remove_attribute("disabled");
        }
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(el) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = el.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn focus(&self, node: &Element) {
        if let Some(el) = node.dyn_ref::<HtmlElement>() {
            let _ = el.focus();
        }
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn offset_top(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|el| f64::from(el.offset_top()))
            .unwrap_or_default()
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|el| f64::from(el.offset_height()))
            .unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn scroll_to(&self, top: f64) {
        let opts = ScrollToOptions::new();
        opts.set_top(top);
        opts.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&opts);
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .is_some_and(|mq| mq.matches())
    }

    fn now_ms(&self) -> f64 {
        self.window
            .performance()
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn observe(&self, watcher: WatcherId, node: &Element, options: &RevealConfig) {
        let mut observers = self.observers.borrow_mut();
        if !observers.contains_key(&watcher) {
            match observers::create(watcher, options, self.sink.clone()) {
                Ok(observer) => {
                    observers.insert(watcher, observer);
                }
                Err(err) => {
                    tracing::warn!(?watcher, error = ?err, "intersection observer unavailable");
                    return;
                }
            }
        }
        if let Some(observer) = observers.get(&watcher) {
            observer.observe(node);
        }
    }

    fn unobserve(&self, watcher: WatcherId, node: &Element) {
        if let Some(observer) = self.observers.borrow().get(&watcher) {
            observer.unobserve(node);
        }
    }
}
