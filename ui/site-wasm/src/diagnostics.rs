//! Console diagnostics: uncaught script errors and page load timing.

use crate::dom;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{ErrorEvent, PerformanceNavigationTiming, Window};

/// Log every uncaught script error. Nothing is reported remotely.
pub fn install_error_listener(window: &Window) -> Result<(), JsValue> {
    let cb = Closure::wrap(Box::new(move |event: ErrorEvent| {
        gloo_console::error!("Script error:", event.error());
        tracing::error!(message = %event.message(), "uncaught script error");
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("error", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Log the navigation's load-event duration once the page has loaded.
/// Does nothing in browsers without the Performance API.
pub fn install_load_timing(window: &Window) -> Result<(), JsValue> {
    if window.performance().is_none() {
        return Ok(());
    }
    if dom::ready_state() == "complete" {
        log_load_time_deferred();
        return Ok(());
    }
    let cb = Closure::once(log_load_time_deferred);
    window.add_event_listener_with_callback("load", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

// loadEventEnd is only populated after the load handlers return.
fn log_load_time_deferred() {
    Timeout::new(0, || {
        if let Some(ms) = load_event_duration() {
            gloo_console::log!("Page Load Time:", ms, "ms");
        }
    })
    .forget();
}

fn load_event_duration() -> Option<f64> {
    let perf = dom::window().performance()?;
    let timing: PerformanceNavigationTiming =
        perf.get_entries_by_type("navigation").get(0).dyn_into().ok()?;
    Some(timing.load_event_end() - timing.load_event_start())
}
