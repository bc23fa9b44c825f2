//! Services around the core session: timing, notifications, orchestration,
//! process signals.

pub mod notify;
pub mod orchestrator;
#[cfg(feature = "runtime")]
pub mod signal_handler;
pub mod timer;

pub use notify::{NotificationSink, Toast, ToastQueue};
pub use orchestrator::{ExecutionOrchestrator, DEFAULT_LATENCY};
#[cfg(feature = "runtime")]
pub use timer::TokioTimer;
pub use timer::{Timer, VirtualTimer};
