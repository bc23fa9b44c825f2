//! Execution orchestration
//!
//! [`ExecutionOrchestrator`] is the only writer of console state. It feeds
//! user submissions, toolbar commands and timer completions into the
//! [`Session`] reducer and carries out the returned effects against its
//! [`Timer`] and [`NotificationSink`].
//!
//! Runs are single-flight: submitting while a run is pending cancels that run
//! (its completion block never appears) and logs one cancellation line.

use super::notify::NotificationSink;
use super::timer::Timer;
use crate::model::{
    LogEntry, LogStore, PendingExecution, SceneState, Session, SessionEffect, SessionEvent,
    ToolbarCommand,
};
use std::time::Duration;

/// Simulated execution latency used when nothing else is configured
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

pub struct ExecutionOrchestrator<T: Timer, N: NotificationSink> {
    session: Session,
    timer: T,
    sink: N,
    latency: Duration,
}

impl<T: Timer, N: NotificationSink> ExecutionOrchestrator<T, N> {
    /// Start a new session with the given simulated latency
    pub fn new(timer: T, sink: N, latency: Duration) -> Self {
        Self {
            session: Session::new(),
            timer,
            sink,
            latency,
        }
    }

    /// Run `code`. Returns immediately; completion arrives via
    /// [`process_timers`](Self::process_timers).
    pub fn submit(&mut self, code: impl Into<String>) {
        self.apply(SessionEvent::Submit { code: code.into() });
    }

    /// Apply a toolbar command synchronously
    pub fn dispatch(&mut self, command: ToolbarCommand) {
        self.apply(SessionEvent::Toolbar(command));
    }

    /// Apply any completions the timer has delivered.
    ///
    /// Returns true if a run completed.
    pub fn process_timers(&mut self) -> bool {
        let mut completed = false;
        for ticket in self.timer.poll_fired() {
            let live = self.session.pending().map(|p| p.ticket) == Some(ticket);
            self.apply(SessionEvent::ExecutionFinished { ticket });
            completed |= live;
        }
        completed
    }

    pub fn log(&self) -> &LogStore {
        self.session.log()
    }

    pub fn snapshot(&self) -> &[LogEntry] {
        self.session.log().snapshot()
    }

    pub fn scene(&self) -> SceneState {
        self.session.scene()
    }

    pub fn pending(&self) -> Option<&PendingExecution> {
        self.session.pending()
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Register a log observer (e.g. the console view's follow-tail flag)
    pub fn subscribe_log<F>(&mut self, observer: F)
    where
        F: FnMut(&LogEntry) + 'static,
    {
        self.session.subscribe_log(observer);
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    /// Shell components (copy, save, download) post their own toasts here
    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    fn apply(&mut self, event: SessionEvent) {
        tracing::trace!("orchestrator: applying {:?}", std::mem::discriminant(&event));
        self.sink.observe_time(self.timer.now());
        for effect in self.session.reduce(event) {
            match effect {
                SessionEffect::ScheduleExecution { ticket } => {
                    self.timer.schedule(ticket, self.latency);
                }
                SessionEffect::CancelExecution { ticket } => {
                    self.timer.cancel(ticket);
                }
                SessionEffect::Notify(notification) => {
                    self.sink
                        .notify(&notification.title, &notification.description);
                }
            }
        }
    }
}
