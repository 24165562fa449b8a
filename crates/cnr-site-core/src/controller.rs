use crate::event::{Dispatch, SiteEvent, Subscription};
use crate::view::View;

/// One independently operating page feature.
///
/// Controllers are built by an `install` constructor that returns `None` when
/// the elements they need are missing, so an installed controller always has
/// its elements.
pub trait Controller<V: View> {
    fn name(&self) -> &'static str;

    /// Listeners to register, in registration order.
    fn subscriptions(&self) -> Vec<Subscription<V::Node>>;

    fn handle(&self, view: &V, event: &SiteEvent<V::Node>) -> Dispatch;
}
