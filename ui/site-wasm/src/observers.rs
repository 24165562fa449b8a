//! `IntersectionObserver` plumbing for the reveal watchers.
//!
//! One browser observer exists per [`WatcherId`]. Its entries are forwarded
//! into the shared [`IntersectionSink`], which the site fills after install.

use cnr_site_core::{RevealConfig, WatcherId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

pub type IntersectionHandler = Box<dyn Fn(WatcherId, Element, bool)>;
pub type IntersectionSink = Rc<RefCell<Option<IntersectionHandler>>>;

pub fn create(
    watcher: WatcherId,
    options: &RevealConfig,
    sink: IntersectionSink,
) -> Result<IntersectionObserver, JsValue> {
    let cb = Closure::wrap(Box::new(move |entries: js_sys::Array, _: IntersectionObserver| {
        let sink = sink.borrow();
        let Some(handler) = sink.as_ref() else {
            return;
        };
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            handler(watcher, entry.target(), entry.is_intersecting());
        }
    }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin);

    let observer = IntersectionObserver::new_with_options(cb.as_ref().unchecked_ref(), &init)?;
    cb.forget();
    Ok(observer)
}
