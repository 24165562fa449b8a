//! CNR corporate site behaviour.
//!
//! Browser-independent controllers for the marketing site: mobile navigation,
//! anchor scrolling, back-to-top, header shadow, the contact form with its
//! phone mask, scroll reveals and keyboard affordances. All DOM access goes
//! through [`view::View`]; `site-wasm` provides the browser implementation.

pub mod a11y;
pub mod back_to_top;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod form;
pub mod header;
pub mod nav;
pub mod phone_mask;
pub mod reveal;
pub mod site;
pub mod smooth_scroll;
pub mod submit;
pub mod timing;
pub mod validation;
pub mod view;

#[cfg(test)]
mod testing;

pub use config::{RevealConfig, SiteConfig};
pub use controller::Controller;
pub use error::{SiteError, SubmitError, ValidationError};
pub use event::{Dispatch, EventKind, SiteEvent, Subscription, Target, WatcherId};
pub use site::Site;
pub use submit::{ContactSubmission, Submitter};
pub use timing::{Debounce, Pacing, Throttle};
pub use view::View;
