//! Display-refresh subscription registry.
//!
//! DESIGN
//! ======
//! The host owns one [`FrameScheduler`] per display. Components subscribe once
//! when they attach and unsubscribe when they detach; the host asks for a
//! [`FrameTick`] on every refresh and delivers it to its subscribers. Nothing
//! re-requests itself from inside a draw call, so cancelling is a single
//! `unsubscribe`.
//!
//! Ticks are numbered. A [`Subscription`] remembers the first tick index it is
//! entitled to, so a tick that was already queued when a component detached
//! and re-attached is recognizably stale.

use std::time::Instant;

use tracing::debug;

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

/// Opaque handle identifying one subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// A live registration with a [`FrameScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    /// Index of the first tick issued after subscribing.
    pub first_frame: u64,
}

impl Subscription {
    /// Whether `tick` was issued while this subscription was live.
    #[must_use]
    pub fn accepts(&self, tick: &FrameTick) -> bool {
        tick.index >= self.first_frame
    }
}

/// One display refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Monotonic tick number, starting at 0.
    pub index: u64,
    /// Time the refresh was issued.
    pub now: Instant,
}

/// Tracks who wants per-frame callbacks and numbers the ticks.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    next_frame: u64,
    subscribers: Vec<SubscriptionId>,
    one_shot: bool,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register for every subsequent tick.
    pub fn subscribe(&mut self) -> Subscription {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(id);
        debug!(id = id.0, subscribers = self.subscribers.len(), "frame subscription added");
        Subscription { id, first_frame: self.next_frame }
    }

    /// Deregister. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| *s != id);
        let removed = self.subscribers.len() != before;
        if removed {
            debug!(id = id.0, subscribers = self.subscribers.len(), "frame subscription removed");
        }
        removed
    }

    #[must_use]
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscribers.contains(&id)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Index the next issued tick will carry.
    #[must_use]
    pub fn next_frame(&self) -> u64 {
        self.next_frame
    }

    /// Ask for a single tick even with no subscribers.
    pub fn request_frame(&mut self) {
        self.one_shot = true;
    }

    /// Whether the next refresh would produce a tick.
    #[must_use]
    pub fn wants_frame(&self) -> bool {
        self.one_shot || !self.subscribers.is_empty()
    }

    /// Issue the tick for this refresh, or `None` when nobody needs one.
    pub fn next_tick(&mut self, now: Instant) -> Option<FrameTick> {
        if !self.wants_frame() {
            return None;
        }
        self.one_shot = false;
        let tick = FrameTick { index: self.next_frame, now };
        self.next_frame += 1;
        Some(tick)
    }
}
