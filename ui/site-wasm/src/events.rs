//! Event binding.
//!
//! Registers one browser listener per site subscription, in the order the
//! site lists them, and feeds each DOM event back through `Site::dispatch`.
//! Scroll and phone-mask input can be rate-limited through config.

use crate::dom::{self, WebView};
use cnr_site_core::{
    Debounce, Dispatch, EventKind, Pacing, Site, SiteEvent, Submitter, Target, Throttle, View,
};
use gloo_timers::callback::Timeout;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, KeyboardEvent};

type SharedSite = Rc<Site<WebView>>;

/// How often a listener may reach its controller.
enum Gate {
    Immediate,
    Throttled(Throttle),
    Debounced(Rc<Debounce>),
}

impl From<Pacing> for Gate {
    fn from(pacing: Pacing) -> Self {
        match pacing {
            Pacing::Immediate => Gate::Immediate,
            Pacing::Throttle(ms) => Gate::Throttled(Throttle::new(ms)),
            Pacing::Debounce(ms) => Gate::Debounced(Rc::new(Debounce::new(ms))),
        }
    }
}

/// Translate a DOM event for a listener registered on `node`.
fn site_event(kind: EventKind, node: Option<&Element>, event: &web_sys::Event) -> Option<SiteEvent<Element>> {
    Some(match kind {
        EventKind::Click => SiteEvent::Click {
            current_target: node.cloned(),
            target: event.target().and_then(|t| t.dyn_into::<Element>().ok()),
        },
        EventKind::KeyDown => {
            let key = event.dyn_ref::<KeyboardEvent>()?;
            SiteEvent::KeyDown {
                key: key.key(),
                shift: key.shift_key(),
            }
        }
        EventKind::MouseDown => SiteEvent::MouseDown,
        EventKind::Scroll => SiteEvent::Scroll,
        EventKind::Input => SiteEvent::Input { target: node?.clone() },
        EventKind::Blur => SiteEvent::Blur { target: node?.clone() },
        EventKind::Submit => SiteEvent::Submit,
    })
}

fn apply(site: &SharedSite, submitter: &Rc<dyn Submitter>, event: &web_sys::Event, dispatch: Dispatch) {
    if dispatch.prevent_default {
        event.prevent_default();
    }
    if let Some(submission) = dispatch.submission {
        let site = site.clone();
        let submitter = submitter.clone();
        wasm_bindgen_futures::spawn_local(async move {
            // The outcome has already been shown to the user and logged.
            let _ = site.run_submission(submission, submitter.as_ref()).await;
        });
    }
}

/// Bind all site listeners. Call once after the site is installed.
pub fn bind_events(site: &SharedSite, submitter: Rc<dyn Submitter>) -> Result<(), JsValue> {
    for (slot, sub) in site.subscriptions() {
        let target: EventTarget = match &sub.target {
            Target::Window => dom::window().into(),
            Target::Document => dom::document().into(),
            Target::Node(node) => node.clone().into(),
        };
        let gate = Gate::from(site.pacing(slot, &sub));
        let node = match &sub.target {
            Target::Node(node) => Some(node.clone()),
            _ => None,
        };
        let kind = sub.kind;
        let site2 = site.clone();
        let submitter2 = submitter.clone();

        let cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(site_event) = site_event(kind, node.as_ref(), &event) else {
                return;
            };
            match &gate {
                Gate::Immediate => {
                    let dispatch = site2.dispatch(slot, &site_event);
                    apply(&site2, &submitter2, &event, dispatch);
                }
                Gate::Throttled(throttle) => {
                    if throttle.ready(site2.view().now_ms()) {
                        let dispatch = site2.dispatch(slot, &site_event);
                        apply(&site2, &submitter2, &event, dispatch);
                    }
                }
                Gate::Debounced(debounce) => {
                    let ticket = debounce.schedule();
                    let debounce = debounce.clone();
                    let site3 = site2.clone();
                    Timeout::new(debounce.wait_ms(), move || {
                        if debounce.fire(ticket) {
                            site3.dispatch(slot, &site_event);
                        }
                    })
                    .forget();
                }
            }
        }) as Box<dyn FnMut(_)>);

        target.add_event_listener_with_callback(kind.dom_name(), cb.as_ref().unchecked_ref())?;
        cb.forget();
    }

    Ok(())
}
