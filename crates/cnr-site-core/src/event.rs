//! Event model shared by the controllers and the browser shell.
//!
//! Controllers never touch listeners directly. They declare [`Subscription`]s,
//! the shell registers one browser listener per subscription, and every
//! dispatched browser event comes back as a [`SiteEvent`].

use crate::submit::ContactSubmission;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    MouseDown,
    Scroll,
    Input,
    Blur,
    Submit,
}

impl EventKind {
    /// DOM event type string.
    pub fn dom_name(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::KeyDown => "keydown",
            EventKind::MouseDown => "mousedown",
            EventKind::Scroll => "scroll",
            EventKind::Input => "input",
            EventKind::Blur => "blur",
            EventKind::Submit => "submit",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Target<N> {
    Window,
    Document,
    Node(N),
}

/// One listener a controller wants registered.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription<N> {
    pub target: Target<N>,
    pub kind: EventKind,
}

impl<N> Subscription<N> {
    pub fn window(kind: EventKind) -> Self {
        Self { target: Target::Window, kind }
    }

    pub fn document(kind: EventKind) -> Self {
        Self { target: Target::Document, kind }
    }

    pub fn node(node: N, kind: EventKind) -> Self {
        Self { target: Target::Node(node), kind }
    }
}

/// Identifies one intersection watcher.
///
/// `Reveal` is the shared watcher over every reveal block; `Timeline(i)` is the
/// per-item watcher of the i-th timeline item in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatcherId {
    Reveal,
    Timeline(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SiteEvent<N> {
    /// `current_target` is the node the listener sits on (`None` for
    /// document-level listeners), `target` the node actually clicked.
    Click {
        current_target: Option<N>,
        target: Option<N>,
    },
    KeyDown {
        key: String,
        shift: bool,
    },
    MouseDown,
    Scroll,
    Input {
        target: N,
    },
    Blur {
        target: N,
    },
    Submit,
    Intersect {
        watcher: WatcherId,
        target: N,
        intersecting: bool,
    },
}

/// What the shell must do after a controller handled an event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatch {
    pub prevent_default: bool,
    /// Set when a valid contact form was submitted; the shell runs
    /// [`crate::Site::run_submission`] with it.
    pub submission: Option<ContactSubmission>,
}

impl Dispatch {
    pub fn prevent_default() -> Self {
        Self {
            prevent_default: true,
            submission: None,
        }
    }

    pub fn merge(self, other: Dispatch) -> Dispatch {
        Dispatch {
            prevent_default: self.prevent_default || other.prevent_default,
            submission: self.submission.or(other.submission),
        }
    }
}
