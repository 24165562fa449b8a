//! Live `(DD) DDDD-DDDD` / `(DD) DDDDD-DDDD` mask for the phone field.

use crate::controller::Controller;
use crate::event::{Dispatch, EventKind, SiteEvent, Subscription};
use crate::view::View;

pub const PHONE_ID: &str = "phone";

/// Reformat `raw` by digit count.
///
/// Non-digits are dropped first. Up to two digits keep the opening
/// parenthesis, so an emptied field reads `(`; more than eleven digits are
/// returned bare, without punctuation.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let d = digits.as_str();
    match d.len() {
        0..=2 => format!("({d}"),
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        7..=10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        _ => digits,
    }
}

/// On Backspace, strip a trailing `" "` of `") "` or a trailing `"-"` so the
/// key's own deletion steps over mask punctuation. `None` leaves the value.
pub fn backspace_adjust(value: &str) -> Option<String> {
    if value.ends_with(") ") || value.ends_with('-') {
        let mut trimmed = value.to_owned();
        trimmed.pop();
        Some(trimmed)
    } else {
        None
    }
}

pub struct PhoneMaskController<V: View> {
    input: V::Node,
}

impl<V: View> PhoneMaskController<V> {
    pub const NAME: &'static str = "phone-mask";

    pub fn install(view: &V) -> Option<Self> {
        Some(Self {
            input: view.by_id(PHONE_ID)?,
        })
    }
}

impl<V: View> Controller<V> for PhoneMaskController<V> {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn subscriptions(&self) -> Vec<Subscription<V::Node>> {
        vec![
            Subscription::node(self.input.clone(), EventKind::Input),
            Subscription::node(self.input.clone(), EventKind::KeyDown),
        ]
    }

    fn handle(&self, view: &V, event: &SiteEvent<V::Node>) -> Dispatch {
        match event {
            SiteEvent::Input { target } if *target == self.input => {
                let masked = format_phone(&view.value(&self.input));
                view.set_value(&self.input, &masked);
            }
            SiteEvent::KeyDown { key, .. } if key == "Backspace" => {
                if let Some(adjusted) = backspace_adjust(&view.value(&self.input)) {
                    view.set_value(&self.input, &adjusted);
                }
            }
            _ => {}
        }
        Dispatch::default()
    }
}
