//! Session state and its transition function
//!
//! All shared console state (log, scene, pending run) lives in one
//! [`Session`]. Each incoming [`SessionEvent`] is applied by
//! [`Session::reduce`], which mutates the state in one step and returns the
//! side effects (timer scheduling, notifications) for the caller to carry
//! out. Nothing else writes to the log or the scene.

use super::command::ToolbarCommand;
use super::log_store::{LogEntry, LogStore};
use super::scene::SceneState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lines present in every fresh session
pub const WELCOME_LINES: [&str; 2] = [
    "> Welcome to PyDreamscape Renderer",
    "> Ready to execute code...",
];

/// Appended when a run is submitted
pub const EXECUTION_STARTED: &str = "> Executing code...";

/// Appended as one block when a run completes
pub const COMPLETION_STEPS: [&str; 5] = [
    "> Scene initialized",
    "> Adding camera at position (0, 0, 5)",
    "> Creating cube mesh with 8 vertices and 6 faces",
    "> Adding directional light",
    "> Rendering complete!",
];

/// Identifies one submitted run; doubles as its cancellation token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExecutionTicket(pub u64);

impl fmt::Display for ExecutionTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The code blob handed to a run. Never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub source_text: String,
    /// Sequence index of the "execution started" entry for this run
    pub submitted_at_sequence: u64,
}

/// The single in-flight run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingExecution {
    pub ticket: ExecutionTicket,
    pub request: ExecutionRequest,
}

/// Transient UI message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Inputs to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The user ran the code buffer
    Submit { code: String },
    /// A scheduled run's latency elapsed
    ExecutionFinished { ticket: ExecutionTicket },
    /// A toolbar button or slider was used
    Toolbar(ToolbarCommand),
}

/// Work the session asks its owner to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    ScheduleExecution { ticket: ExecutionTicket },
    CancelExecution { ticket: ExecutionTicket },
    Notify(Notification),
}

/// The console's shared state for one session
#[derive(Debug)]
pub struct Session {
    log: LogStore,
    scene: SceneState,
    pending: Option<PendingExecution>,
    last_ticket: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start a session: empty scene, two welcome lines, nothing pending
    pub fn new() -> Self {
        let mut log = LogStore::new();
        log.append_batch(WELCOME_LINES);
        Self {
            log,
            scene: SceneState::Idle,
            pending: None,
            last_ticket: 0,
        }
    }

    pub fn log(&self) -> &LogStore {
        &self.log
    }

    /// Observer registration is the only mutable access handed out
    pub fn subscribe_log<F>(&mut self, observer: F)
    where
        F: FnMut(&LogEntry) + 'static,
    {
        self.log.subscribe(observer);
    }

    pub fn scene(&self) -> SceneState {
        self.scene
    }

    pub fn pending(&self) -> Option<&PendingExecution> {
        self.pending.as_ref()
    }

    /// Apply one event and return the effects it requires, in order
    pub fn reduce(&mut self, event: SessionEvent) -> Vec<SessionEffect> {
        match event {
            SessionEvent::Submit { code } => self.reduce_submit(code),
            SessionEvent::ExecutionFinished { ticket } => self.reduce_finished(ticket),
            SessionEvent::Toolbar(command) => self.reduce_toolbar(command),
        }
    }

    fn reduce_submit(&mut self, code: String) -> Vec<SessionEffect> {
        let mut effects = Vec::new();

        if let Some(superseded) = self.pending.take() {
            tracing::debug!("session: cancelling superseded run {}", superseded.ticket);
            effects.push(SessionEffect::CancelExecution {
                ticket: superseded.ticket,
            });
            self.log.append(format!(
                "> Execution {} cancelled: superseded by a new run",
                superseded.ticket
            ));
        }

        self.scene = self.scene.on_submit();
        let started = self.log.append(EXECUTION_STARTED);

        self.last_ticket += 1;
        let ticket = ExecutionTicket(self.last_ticket);
        tracing::debug!(
            "session: run {} submitted ({} bytes of code)",
            ticket,
            code.len()
        );
        self.pending = Some(PendingExecution {
            ticket,
            request: ExecutionRequest {
                source_text: code,
                submitted_at_sequence: started.sequence,
            },
        });

        effects.push(SessionEffect::ScheduleExecution { ticket });
        effects.push(SessionEffect::Notify(Notification::new(
            "Code executed",
            "Your 3D scene code has been processed.",
        )));
        effects
    }

    fn reduce_finished(&mut self, ticket: ExecutionTicket) -> Vec<SessionEffect> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {}
            _ => {
                tracing::debug!("session: dropping stale completion for run {}", ticket);
                return Vec::new();
            }
        }

        self.pending = None;
        self.scene = self.scene.on_complete();
        self.log.append_batch(COMPLETION_STEPS);
        tracing::debug!("session: run {} complete", ticket);
        Vec::new()
    }

    fn reduce_toolbar(&mut self, command: ToolbarCommand) -> Vec<SessionEffect> {
        self.log.append(command.log_text());
        let (title, description) = command.notification();
        vec![SessionEffect::Notify(Notification::new(title, description))]
    }
}
