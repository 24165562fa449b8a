//! Composition root.
//!
//! [`Site::install`] builds every controller whose elements are present, in a
//! fixed order, and owns them for the page's lifetime. The shell registers
//! [`Site::subscriptions`] in the order returned and routes each browser event
//! back through [`Site::dispatch`].

use crate::a11y::AccessibilityController;
use crate::back_to_top::BackToTopController;
use crate::config::SiteConfig;
use crate::controller::Controller;
use crate::error::SubmitError;
use crate::event::{Dispatch, EventKind, SiteEvent, Subscription, Target, WatcherId};
use crate::form::FormController;
use crate::header::HeaderShadowController;
use crate::nav::NavController;
use crate::phone_mask::PhoneMaskController;
use crate::reveal::RevealController;
use crate::smooth_scroll::SmoothScrollController;
use crate::submit::{ContactSubmission, Submitter};
use crate::timing::Pacing;
use crate::view::View;
use std::rc::Rc;
use tracing::{debug, warn};

pub struct Site<V: View + 'static> {
    view: V,
    config: SiteConfig,
    controllers: Vec<Rc<dyn Controller<V>>>,
    form: Option<Rc<FormController<V>>>,
}

fn push<V: View + 'static, C: Controller<V> + 'static>(
    controllers: &mut Vec<Rc<dyn Controller<V>>>,
    name: &'static str,
    controller: Option<C>,
) -> Option<Rc<C>> {
    match controller {
        Some(c) => {
            let c = Rc::new(c);
            controllers.push(c.clone());
            debug!(controller = name, "installed");
            Some(c)
        }
        None => {
            debug!(controller = name, "skipped, required elements absent");
            None
        }
    }
}

impl<V: View + 'static> Site<V> {
    pub fn install(view: V, config: SiteConfig) -> Self {
        let mut controllers: Vec<Rc<dyn Controller<V>>> = Vec::new();

        push(&mut controllers, NavController::<V>::NAME, NavController::install(&view));
        push(
            &mut controllers,
            SmoothScrollController::<V>::NAME,
            SmoothScrollController::install(&view, config.fallback_header_height),
        );
        push(
            &mut controllers,
            BackToTopController::<V>::NAME,
            BackToTopController::install(&view, config.back_to_top_offset),
        );
        let form = push(&mut controllers, FormController::<V>::NAME, FormController::install(&view));
        push(&mut controllers, PhoneMaskController::<V>::NAME, PhoneMaskController::install(&view));
        push(
            &mut controllers,
            RevealController::<V>::NAME,
            RevealController::install(&view, &config.reveal),
        );
        push(
            &mut controllers,
            HeaderShadowController::<V>::NAME,
            HeaderShadowController::install(&view, config.header_shadow_offset),
        );
        push(
            &mut controllers,
            AccessibilityController::<V>::NAME,
            AccessibilityController::install(&view),
        );

        Self {
            view,
            config,
            controllers,
            form,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Installed controller names by slot.
    pub fn controller_names(&self) -> Vec<&'static str> {
        self.controllers.iter().map(|c| c.name()).collect()
    }

    /// Every listener to register as `(slot, subscription)`, in order.
    pub fn subscriptions(&self) -> Vec<(usize, Subscription<V::Node>)> {
        self.controllers
            .iter()
            .enumerate()
            .flat_map(|(slot, c)| c.subscriptions().into_iter().map(move |s| (slot, s)))
            .collect()
    }

    /// Rate limit for the listener of `sub`, registered for `slot`.
    ///
    /// Window scrolls are throttled by `scroll_throttle_ms` and the phone
    /// mask's input by `phone_mask_debounce_ms`; everything else, including
    /// the form's own input listener on the same field, runs immediately.
    pub fn pacing(&self, slot: usize, sub: &Subscription<V::Node>) -> Pacing {
        let owner = self.controllers.get(slot).map(|c| c.name());
        match (&sub.target, sub.kind) {
            (Target::Window, EventKind::Scroll) => self
                .config
                .scroll_throttle_ms
                .map_or(Pacing::Immediate, Pacing::Throttle),
            (Target::Node(_), EventKind::Input) if owner == Some(PhoneMaskController::<V>::NAME) => self
                .config
                .phone_mask_debounce_ms
                .map_or(Pacing::Immediate, Pacing::Debounce),
            _ => Pacing::Immediate,
        }
    }

    pub fn dispatch(&self, slot: usize, event: &SiteEvent<V::Node>) -> Dispatch {
        match self.controllers.get(slot) {
            Some(controller) => controller.handle(&self.view, event),
            None => Dispatch::default(),
        }
    }

    /// Route an intersection change from watcher `watcher` to the controllers.
    pub fn dispatch_intersection(&self, watcher: WatcherId, target: V::Node, intersecting: bool) {
        let event = SiteEvent::Intersect {
            watcher,
            target,
            intersecting,
        };
        for controller in &self.controllers {
            controller.handle(&self.view, &event);
        }
    }

    /// Run the submission flow for a submission produced by [`Site::dispatch`].
    pub async fn run_submission(
        &self,
        submission: ContactSubmission,
        submitter: &dyn Submitter,
    ) -> Result<(), SubmitError> {
        match &self.form {
            Some(form) => form.run_submission(&self.view, &submission, submitter).await,
            None => {
                warn!("submission requested without a contact form");
                Ok(())
            }
        }
    }
}
