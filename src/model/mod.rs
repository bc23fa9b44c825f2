//! Core console state: log, scene, toolbar commands and the session reducer.
//!
//! Nothing in here knows about terminals, timers or threads.

pub mod command;
pub mod log_store;
pub mod scene;
pub mod session;

pub use command::{LightKind, ObjectKind, ToolbarCommand};
pub use log_store::{LogEntry, LogStore, Severity};
pub use scene::SceneState;
pub use session::{
    ExecutionRequest, ExecutionTicket, Notification, PendingExecution, Session, SessionEffect,
    SessionEvent,
};
