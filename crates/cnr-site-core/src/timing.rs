//! Rate gates for high-frequency events.
//!
//! Both are clock-agnostic: [`Throttle`] is fed timestamps and [`Debounce`]
//! hands out tickets that the caller redeems when its own timer fires.

use std::cell::Cell;

/// Rate limit applied to one listener before it reaches its controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    Immediate,
    /// Leading-edge [`Throttle`] with this window in milliseconds.
    Throttle(u32),
    /// Trailing [`Debounce`] with this wait in milliseconds.
    Debounce(u32),
}

/// Leading-edge throttle: the first call passes, later calls within
/// `limit_ms` of the last accepted one are dropped.
#[derive(Debug)]
pub struct Throttle {
    limit_ms: f64,
    last: Cell<Option<f64>>,
}

impl Throttle {
    pub fn new(limit_ms: u32) -> Self {
        Self {
            limit_ms: f64::from(limit_ms),
            last: Cell::new(None),
        }
    }

    pub fn ready(&self, now_ms: f64) -> bool {
        match self.last.get() {
            Some(last) if now_ms - last < self.limit_ms => false,
            _ => {
                self.last.set(Some(now_ms));
                true
            }
        }
    }
}

/// Trailing debounce. Each call to [`Debounce::schedule`] supersedes the
/// previous one; only the newest ticket fires.
#[derive(Debug)]
pub struct Debounce {
    wait_ms: u32,
    latest: Cell<u64>,
}

impl Debounce {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            latest: Cell::new(0),
        }
    }

    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    pub fn schedule(&self) -> u64 {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        ticket
    }

    /// True when `ticket` is still the newest one.
    pub fn fire(&self, ticket: u64) -> bool {
        ticket == self.latest.get()
    }
}
