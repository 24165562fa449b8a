//! Floating back-to-top control.

use crate::controller::Controller;
use crate::event::{Dispatch, EventKind, SiteEvent, Subscription};
use crate::view::View;

pub const BACK_TO_TOP_ID: &str = "back-to-top";
pub const SHOW_CLASS: &str = "show";

pub struct BackToTopController<V: View> {
    button: V::Node,
    offset: f64,
}

impl<V: View> BackToTopController<V> {
    pub const NAME: &'static str = "back-to-top";

    pub fn install(view: &V, offset: f64) -> Option<Self> {
        Some(Self {
            button: view.by_id(BACK_TO_TOP_ID)?,
            offset,
        })
    }
}

impl<V: View> Controller<V> for BackToTopController<V> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscriptions(&self) -> Vec<Subscription<V::Node>> {
        vec![
            Subscription::window(EventKind::Scroll),
            Subscription::node(self.button.clone(), EventKind::Click),
        ]
    }

    fn handle(&self, view: &V, event: &SiteEvent<V::Node>) -> Dispatch {
        match event {
            SiteEvent::Scroll => {
                if view.scroll_y() > self.offset {
                    view.add_class(&self.button, SHOW_CLASS);
                } else {
                    view.remove_class(&self.button, SHOW_CLASS);
                }
            }
            SiteEvent::Click {
                current_target: Some(current),
                ..
            } if *current == self.button => view.scroll_to(0.0),
            _ => {}
        }
        Dispatch::default()
    }
}
