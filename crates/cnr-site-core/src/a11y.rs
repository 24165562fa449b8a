//! Keyboard-navigation marker and the implicit skip-to-main on first Tab.

use crate::controller::Controller;
use crate::event::{Dispatch, EventKind, SiteEvent, Subscription};
use crate::view::View;

pub const KEYBOARD_NAV_CLASS: &str = "keyboard-navigation";
pub const MAIN_SELECTOR: &str = "main";

pub struct AccessibilityController<V: View> {
    body: V::Node,
}

impl<V: View> AccessibilityController<V> {
    pub const NAME: &'static str = "accessibility";

    pub fn install(view: &V) -> Option<Self> {
        Some(Self { body: view.body()? })
    }

    fn skip_to_main(&self, view: &V) {
        if view.active_element().as_ref() != Some(&self.body) {
            return;
        }
        if let Some(main) = view.query(MAIN_SELECTOR) {
            view.focus(&main);
        }
    }
}

impl<V: View> Controller<V> for AccessibilityController<V> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscriptions(&self) -> Vec<Subscription<V::Node>> {
        vec![
            Subscription::document(EventKind::KeyDown),
            Subscription::document(EventKind::MouseDown),
        ]
    }

    fn handle(&self, view: &V, event: &SiteEvent<V::Node>) -> Dispatch {
        match event {
            SiteEvent::KeyDown { key, shift } if key == "Tab" => {
                if !shift {
                    self.skip_to_main(view);
                }
                view.add_class(&self.body, KEYBOARD_NAV_CLASS);
            }
            SiteEvent::MouseDown => view.remove_class(&self.body, KEYBOARD_NAV_CLASS),
            _ => {}
        }
        Dispatch::default()
    }
}
