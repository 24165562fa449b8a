//! Mobile navigation panel.

use crate::controller::Controller;
use crate::event::{Dispatch, EventKind, SiteEvent, Subscription};
use crate::view::View;
use tracing::debug;

pub const NAV_TOGGLE_ID: &str = "nav-toggle";
pub const NAV_MENU_ID: &str = "nav-menu";
pub const NAV_CLOSE_ID: &str = "nav-close";
pub const NAV_LINK_SELECTOR: &str = ".nav__link";
pub const SHOW_CLASS: &str = "show";

pub struct NavController<V: View> {
    toggle: V::Node,
    menu: V::Node,
    close: V::Node,
    links: Vec<V::Node>,
}

impl<V: View> NavController<V> {
    pub const NAME: &'static str = "navigation";

    pub fn install(view: &V) -> Option<Self> {
        Some(Self {
            toggle: view.by_id(NAV_TOGGLE_ID)?,
            menu: view.by_id(NAV_MENU_ID)?,
            close: view.by_id(NAV_CLOSE_ID)?,
            links: view.query_all(NAV_LINK_SELECTOR),
        })
    }

    pub fn open(&self, view: &V) {
        view.add_class(&self.menu, SHOW_CLASS);
        if let Some(body) = view.body() {
            view.set_style(&body, "overflow", "hidden");
        }
        debug!("nav menu opened");
    }

    pub fn close(&self, view: &V) {
        view.remove_class(&self.menu, SHOW_CLASS);
        if let Some(body) = view.body() {
            view.set_style(&body, "overflow", "");
        }
        debug!("nav menu closed");
    }

    fn is_outside(&self, view: &V, target: Option<&V::Node>) -> bool {
        match target {
            Some(t) => !view.contains(&self.menu, t) && !view.contains(&self.toggle, t),
            None => true,
        }
    }
}

impl<V: View> Controller<V> for NavController<V> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscriptions(&self) -> Vec<Subscription<V::Node>> {
        let mut subs = vec![
            Subscription::node(self.toggle.clone(), EventKind::Click),
            Subscription::node(self.close.clone(), EventKind::Click),
        ];
        subs.extend(
            self.links
                .iter()
                .map(|link| Subscription::node(link.clone(), EventKind::Click)),
        );
        subs.push(Subscription::document(EventKind::Click));
        subs.push(Subscription::document(EventKind::KeyDown));
        subs
    }

    fn handle(&self, view: &V, event: &SiteEvent<V::Node>) -> Dispatch {
        match event {
            SiteEvent::Click {
                current_target: Some(current),
                ..
            } => {
                if *current == self.toggle {
                    self.open(view);
                } else if *current == self.close || self.links.contains(current) {
                    self.close(view);
                }
            }
            SiteEvent::Click {
                current_target: None,
                target,
            } => {
                if self.is_outside(view, target.as_ref()) {
                    self.close(view);
                }
            }
            SiteEvent::KeyDown { key, .. } if key == "Escape" => self.close(view),
            _ => {}
        }
        Dispatch::default()
    }
}
