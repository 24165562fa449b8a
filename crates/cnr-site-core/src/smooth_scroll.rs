//! In-page anchor navigation with a header offset.

use crate::controller::Controller;
use crate::event::{Dispatch, EventKind, SiteEvent, Subscription};
use crate::view::View;

pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;
pub const HEADER_ID: &str = "header";

pub struct SmoothScrollController<V: View> {
    anchors: Vec<V::Node>,
    header: Option<V::Node>,
    fallback_header_height: f64,
}

impl<V: View> SmoothScrollController<V> {
    pub const NAME: &'static str = "smooth-scroll";

    pub fn install(view: &V, fallback_header_height: f64) -> Option<Self> {
        let anchors = view.query_all(ANCHOR_SELECTOR);
        if anchors.is_empty() {
            return None;
        }
        Some(Self {
            anchors,
            header: view.by_id(HEADER_ID),
            fallback_header_height,
        })
    }

    /// Scroll position that puts `target` just below the header.
    pub fn target_offset(&self, view: &V, target: &V::Node) -> f64 {
        let header_height = self
            .header
            .as_ref()
            .map(|h| view.offset_height(h))
            .unwrap_or(self.fallback_header_height);
        view.offset_top(target) - header_height
    }

    fn resolve(view: &V, href: &str) -> Option<V::Node> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        view.by_id(id)
    }
}

impl<V: View> Controller<V> for SmoothScrollController<V> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscriptions(&self) -> Vec<Subscription<V::Node>> {
        self.anchors
            .iter()
            .map(|a| Subscription::node(a.clone(), EventKind::Click))
            .collect()
    }

    fn handle(&self, view: &V, event: &SiteEvent<V::Node>) -> Dispatch {
        let SiteEvent::Click {
            current_target: Some(anchor),
            ..
        } = event
        else {
            return Dispatch::default();
        };
        if !self.anchors.contains(anchor) {
            return Dispatch::default();
        }

        let href = view.attribute(anchor, "href").unwrap_or_default();
        if let Some(target) = Self::resolve(view, &href) {
            view.scroll_to(self.target_offset(view, &target));
        }
        Dispatch::prevent_default()
    }
}
