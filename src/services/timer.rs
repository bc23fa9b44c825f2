//! Completion timers for simulated runs
//!
//! A [`Timer`] holds at most one scheduled completion at a time (one slot)
//! and reports tickets whose delay has elapsed through [`Timer::poll_fired`].
//! Nothing is ever invoked from inside a timer: the owner polls and applies
//! completions on its own thread, which keeps all state changes on the
//! console's event loop.
//!
//! - [`VirtualTimer`]: time only moves when [`VirtualTimer::advance`] is
//!   called. Used by tests and script control mode.
//! - [`TokioTimer`]: sleeps on a tokio runtime and hands the ticket back over
//!   a channel. Used by the interactive console.

use crate::model::ExecutionTicket;
use std::time::Duration;

pub trait Timer {
    /// Arm the slot. Any previously armed ticket is dropped.
    fn schedule(&mut self, ticket: ExecutionTicket, delay: Duration);

    /// Disarm `ticket` if it is the one in the slot. Never fails.
    fn cancel(&mut self, ticket: ExecutionTicket);

    /// Tickets that fired since the last poll, oldest first
    fn poll_fired(&mut self) -> Vec<ExecutionTicket>;

    /// The ticket currently armed, if any
    fn armed(&self) -> Option<ExecutionTicket>;

    /// Time elapsed on this timer's clock since it was created
    fn now(&self) -> Duration;
}

/// Manually driven clock
#[derive(Debug, Default)]
pub struct VirtualTimer {
    now: Duration,
    slot: Option<(ExecutionTicket, Duration)>,
    fired: Vec<ExecutionTicket>,
}

impl VirtualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time remaining until the armed ticket fires
    pub fn remaining(&self) -> Option<Duration> {
        self.slot
            .map(|(_, deadline)| deadline.saturating_sub(self.now))
    }

    /// Move the clock forward, firing the slot if its deadline passes
    pub fn advance(&mut self, by: Duration) {
        self.now = self.now.saturating_add(by);
        if let Some((ticket, deadline)) = self.slot {
            if deadline <= self.now {
                tracing::trace!("virtual_timer: run {} fired at {:?}", ticket, self.now);
                self.slot = None;
                self.fired.push(ticket);
            }
        }
    }
}

impl Timer for VirtualTimer {
    fn schedule(&mut self, ticket: ExecutionTicket, delay: Duration) {
        self.slot = Some((ticket, self.now.saturating_add(delay)));
    }

    fn cancel(&mut self, ticket: ExecutionTicket) {
        if matches!(self.slot, Some((armed, _)) if armed == ticket) {
            self.slot = None;
        }
    }

    fn poll_fired(&mut self) -> Vec<ExecutionTicket> {
        std::mem::take(&mut self.fired)
    }

    fn armed(&self) -> Option<ExecutionTicket> {
        self.slot.map(|(ticket, _)| ticket)
    }

    fn now(&self) -> Duration {
        self.now
    }
}

#[cfg(feature = "runtime")]
pub use tokio_timer::TokioTimer;

#[cfg(feature = "runtime")]
mod tokio_timer {
    use super::Timer;
    use crate::model::ExecutionTicket;
    use std::time::{Duration, Instant};
    use tokio::runtime::Handle;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
    use tokio::task::AbortHandle;

    /// Wall-clock timer backed by `tokio::time::sleep`
    pub struct TokioTimer {
        runtime: Handle,
        tx: UnboundedSender<ExecutionTicket>,
        rx: UnboundedReceiver<ExecutionTicket>,
        slot: Option<(ExecutionTicket, AbortHandle)>,
        started: Instant,
    }

    impl TokioTimer {
        pub fn new(runtime: Handle) -> Self {
            let (tx, rx) = unbounded_channel();
            Self {
                runtime,
                tx,
                rx,
                slot: None,
                started: Instant::now(),
            }
        }
    }

    impl Timer for TokioTimer {
        fn schedule(&mut self, ticket: ExecutionTicket, delay: Duration) {
            if let Some((previous, task)) = self.slot.take() {
                tracing::debug!("tokio_timer: replacing armed run {}", previous);
                task.abort();
            }
            let tx = self.tx.clone();
            let task = self.runtime.spawn(async move {
                tokio::time::sleep(delay).await;
                // The receiver only goes away with the console itself
                let _ = tx.send(ticket);
            });
            self.slot = Some((ticket, task.abort_handle()));
        }

        fn cancel(&mut self, ticket: ExecutionTicket) {
            if matches!(&self.slot, Some((armed, _)) if *armed == ticket) {
                if let Some((_, task)) = self.slot.take() {
                    task.abort();
                }
            }
        }

        fn poll_fired(&mut self) -> Vec<ExecutionTicket> {
            let mut fired = Vec::new();
            while let Ok(ticket) = self.rx.try_recv() {
                // A sleep can finish between abort() and the channel drain
                if matches!(&self.slot, Some((armed, _)) if *armed == ticket) {
                    self.slot = None;
                    fired.push(ticket);
                } else {
                    tracing::debug!("tokio_timer: discarding late fire for run {}", ticket);
                }
            }
            fired
        }

        fn armed(&self) -> Option<ExecutionTicket> {
            self.slot.as_ref().map(|(ticket, _)| *ticket)
        }

        fn now(&self) -> Duration {
            self.started.elapsed()
        }
    }
}
