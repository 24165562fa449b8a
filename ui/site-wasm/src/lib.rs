//! CNR site WASM frontend.
//!
//! Browser shell around `cnr-site-core`: binds the real DOM to the site's
//! controllers, owns the intersection observers, and supplies the simulated
//! contact submitter. Each concern lives in its own module.

pub mod config;
pub mod diagnostics;
pub mod dom;
pub mod events;
pub mod observers;
pub mod submit;

use cnr_site_core::{Site, Submitter};
use dom::WebView;
use std::cell::RefCell;
use std::rc::Rc;
use submit::SimulatedSubmitter;
use tracing::info;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

thread_local! {
    // Lives for the page; listeners and observers only hold clones or weak refs.
    static SITE: RefCell<Option<Rc<Site<WebView>>>> = const { RefCell::new(None) };
}

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    let window = dom::window();
    diagnostics::install_error_listener(&window)?;
    diagnostics::install_load_timing(&window)?;

    if dom::ready_state() == "loading" {
        let cb = Closure::once(|| {
            if let Err(err) = init() {
                gloo_console::error!("site init failed:", err);
            }
        });
        dom::document()
            .add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())?;
        cb.forget();
        Ok(())
    } else {
        init()
    }
}

/// Install every controller and bind its listeners. Runs once the DOM is parsed.
fn init() -> Result<(), JsValue> {
    let config = config::load();
    init_logging(&config);

    let view = WebView::new();
    let sink = view.intersection_sink();
    let site = Rc::new(Site::install(view, config));

    let weak = Rc::downgrade(&site);
    *sink.borrow_mut() = Some(Box::new(move |watcher, target, intersecting| {
        if let Some(site) = weak.upgrade() {
            site.dispatch_intersection(watcher, target, intersecting);
        }
    }));

    let submitter: Rc<dyn Submitter> = Rc::new(SimulatedSubmitter::new(site.config().submit_delay_ms));
    events::bind_events(&site, submitter)?;

    info!(controllers = ?site.controller_names(), "site ready");
    SITE.with(|s| *s.borrow_mut() = Some(site));
    Ok(())
}

fn init_logging(config: &cnr_site_core::SiteConfig) {
    let level = config.level().unwrap_or(tracing::Level::INFO);
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(level)
            .build(),
    );
}
