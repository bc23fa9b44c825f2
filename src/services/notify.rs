//! Notification sinks
//!
//! The core only ever calls [`NotificationSink::notify`]; it never reads
//! anything back. The console shows notifications as toasts through
//! [`ToastQueue`]; tests record them in a plain `Vec<Notification>`.
//!
//! Toast lifetimes run on the console timer's clock, so virtual time in
//! script control mode expires them the same way wall time does in the UI.

use crate::model::Notification;
use std::collections::VecDeque;
use std::time::Duration;

pub trait NotificationSink {
    fn notify(&mut self, title: &str, description: &str);

    /// Tell the sink what time it is on the owner's clock
    fn observe_time(&mut self, _now: Duration) {}
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, title: &str, description: &str) {
        self.push(Notification::new(title, description));
    }
}

/// A notification on screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    /// Clock reading when the toast was posted
    pub shown_at: Duration,
}

/// Time-limited toasts, newest last, capped at a fixed count
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: VecDeque<Toast>,
    lifetime: Duration,
    max_visible: usize,
    total: usize,
    clock: Duration,
}

impl ToastQueue {
    pub fn new(lifetime: Duration, max_visible: usize) -> Self {
        Self {
            toasts: VecDeque::new(),
            lifetime,
            max_visible: max_visible.max(1),
            total: 0,
            clock: Duration::ZERO,
        }
    }

    /// Toasts currently shown, oldest first
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.toasts.back().map(|t| &t.notification)
    }

    /// Number of notifications received over the whole session
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Move the clock to `now` and drop toasts older than their lifetime.
    /// Returns true if any expired.
    pub fn expire(&mut self, now: Duration) -> bool {
        self.clock = self.clock.max(now);
        let before = self.toasts.len();
        let (clock, lifetime) = (self.clock, self.lifetime);
        self.toasts
            .retain(|t| clock.saturating_sub(t.shown_at) < lifetime);
        before != self.toasts.len()
    }

    pub fn dismiss_all(&mut self) {
        self.toasts.clear();
    }

    fn push_at(&mut self, notification: Notification, now: Duration) {
        tracing::debug!("toast: {}", notification.title);
        self.total += 1;
        self.toasts.push_back(Toast {
            notification,
            shown_at: now,
        });
        while self.toasts.len() > self.max_visible {
            self.toasts.pop_front();
        }
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&mut self, title: &str, description: &str) {
        self.push_at(Notification::new(title, description), self.clock);
    }

    fn observe_time(&mut self, now: Duration) {
        self.clock = self.clock.max(now);
    }
}
