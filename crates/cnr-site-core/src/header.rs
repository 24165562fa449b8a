//! Header shadow that deepens once the page scrolls.

use crate::controller::Controller;
use crate::event::{Dispatch, EventKind, SiteEvent, Subscription};
use crate::view::View;

pub const HEADER_ID: &str = "header";
pub const RAISED_SHADOW: &str = "0 2px 20px rgba(0, 51, 102, 0.15)";
pub const RESTING_SHADOW: &str = "0 2px 8px rgba(0, 51, 102, 0.1)";

pub struct HeaderShadowController<V: View> {
    header: V::Node,
    offset: f64,
}

impl<V: View> HeaderShadowController<V> {
    pub const NAME: &'static str = "header-shadow";

    pub fn install(view: &V, offset: f64) -> Option<Self> {
        Some(Self {
            header: view.by_id(HEADER_ID)?,
            offset,
        })
    }
}

impl<V: View> Controller<V> for HeaderShadowController<V> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscriptions(&self) -> Vec<Subscription<V::Node>> {
        vec![Subscription::window(EventKind::Scroll)]
    }

    fn handle(&self, view: &V, event: &SiteEvent<V::Node>) -> Dispatch {
        if let SiteEvent::Scroll = event {
            let shadow = if view.scroll_y() > self.offset {
                RAISED_SHADOW
            } else {
                RESTING_SHADOW
            };
            view.set_style(&self.header, "box-shadow", shadow);
        }
        Dispatch::default()
    }
}
