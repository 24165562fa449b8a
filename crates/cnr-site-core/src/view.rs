//! The view capability.
//!
//! Every DOM read and write a controller performs goes through [`View`]. The
//! browser shell implements it over `web-sys`; tests use an in-memory fake.

use crate::config::RevealConfig;
use crate::event::WatcherId;

pub trait View {
    /// Handle to one element. Equality is element identity.
    type Node: Clone + PartialEq + std::fmt::Debug;

    // ── Lookup ──

    fn by_id(&self, id: &str) -> Option<Self::Node>;
    fn query(&self, selector: &str) -> Option<Self::Node>;
    /// All matches in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn query_within(&self, parent: &Self::Node, selector: &str) -> Option<Self::Node>;
    fn body(&self) -> Option<Self::Node>;
    fn active_element(&self) -> Option<Self::Node>;
    /// True when `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    // ── Element state ──

    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }
    /// Current value of a form control, untrimmed.
    fn value(&self, node: &Self::Node) -> String;
    fn set_value(&self, node: &Self::Node, value: &str);
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn set_disabled(&self, node: &Self::Node, disabled: bool);
    /// Sets an inline style property. An empty value clears it.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);
    fn focus(&self, node: &Self::Node);
    fn reset_form(&self, form: &Self::Node);

    // ── Geometry and viewport ──

    fn offset_top(&self, node: &Self::Node) -> f64;
    fn offset_height(&self, node: &Self::Node) -> f64;
    fn scroll_y(&self) -> f64;
    /// Smoothly scrolls the viewport to `top`.
    fn scroll_to(&self, top: f64);

    // ── Environment ──

    fn prefers_reduced_motion(&self) -> bool;
    /// Monotonic milliseconds.
    fn now_ms(&self) -> f64;
    fn alert(&self, message: &str);

    // ── Intersection watchers ──

    fn observe(&self, watcher: WatcherId, node: &Self::Node, options: &RevealConfig);
    fn unobserve(&self, watcher: WatcherId, node: &Self::Node);
}
