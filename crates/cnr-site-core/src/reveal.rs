//! One-shot reveal animations driven by intersection watchers.
//!
//! Every reveal block is watched by the shared [`WatcherId::Reveal`] watcher;
//! each timeline item also gets its own [`WatcherId::Timeline`] watcher that
//! picks a direction from the item's position. A `(watcher, node)` pair fires
//! once, after which it is unobserved and forgotten.

use crate::config::RevealConfig;
use crate::controller::Controller;
use crate::event::{Dispatch, SiteEvent, Subscription, WatcherId};
use crate::view::View;
use std::cell::RefCell;
use tracing::debug;

pub const REVEAL_SELECTOR: &str =
    ".card, .differential__item, .timeline__item, .stat__item, .client__item, .section__title";
pub const TIMELINE_SELECTOR: &str = ".timeline__item";
pub const FADE_IN_UP: &str = "animate-fade-in-up";
pub const FADE_IN_LEFT: &str = "animate-fade-in-left";
pub const FADE_IN_RIGHT: &str = "animate-fade-in-right";

pub struct RevealController<V: View> {
    pending: RefCell<Vec<(WatcherId, V::Node)>>,
}

impl<V: View> RevealController<V> {
    pub const NAME: &'static str = "scroll-reveal";

    /// Start watching. Returns `None`, creating no watchers, when the user
    /// prefers reduced motion.
    pub fn install(view: &V, options: &RevealConfig) -> Option<Self> {
        if view.prefers_reduced_motion() {
            debug!("reduced motion preferred, reveal animations disabled");
            return None;
        }

        let mut pending = Vec::new();
        for node in view.query_all(REVEAL_SELECTOR) {
            view.observe(WatcherId::Reveal, &node, options);
            pending.push((WatcherId::Reveal, node));
        }
        for (index, item) in view.query_all(TIMELINE_SELECTOR).into_iter().enumerate() {
            let watcher = WatcherId::Timeline(index);
            view.observe(watcher, &item, options);
            pending.push((watcher, item));
        }

        Some(Self {
            pending: RefCell::new(pending),
        })
    }

    pub fn class_for(watcher: WatcherId) -> &'static str {
        match watcher {
            WatcherId::Reveal => FADE_IN_UP,
            WatcherId::Timeline(index) if index % 2 == 0 => FADE_IN_LEFT,
            WatcherId::Timeline(_) => FADE_IN_RIGHT,
        }
    }

    /// Number of watcher/node pairs that have not fired yet.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl<V: View> Controller<V> for RevealController<V> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscriptions(&self) -> Vec<Subscription<V::Node>> {
        Vec::new()
    }

    fn handle(&self, view: &V, event: &SiteEvent<V::Node>) -> Dispatch {
        let SiteEvent::Intersect {
            watcher,
            target,
            intersecting: true,
        } = event
        else {
            return Dispatch::default();
        };

        let fired = {
            let mut pending = self.pending.borrow_mut();
            pending
                .iter()
                .position(|(w, n)| w == watcher && n == target)
                .map(|i| pending.remove(i))
        };
        if let Some((watcher, node)) = fired {
            view.unobserve(watcher, &node);
            view.add_class(&node, Self::class_for(watcher));
            debug!(?watcher, "reveal fired");
        }
        Dispatch::default()
    }
}
