/// Initialize signal handlers for SIGTERM and SIGINT.
/// On Unix the handlers only raise a flag; the console loop polls
/// [`shutdown_requested`] and exits through its normal teardown so the
/// terminal is restored.
/// On other platforms, this is a no-op (default terminal behavior applies).
pub fn install_signal_handlers() {
    #[cfg(unix)]
    unix::install_shutdown_handlers();
}

/// Whether a termination signal has arrived
pub fn shutdown_requested() -> bool {
    #[cfg(unix)]
    {
        unix::SHUTDOWN_REQUESTED.load(std::sync::atomic::Ordering::SeqCst)
    }
    #[cfg(not(unix))]
    {
        false
    }
}

#[cfg(unix)]
mod unix {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
    use std::sync::atomic::{AtomicBool, Ordering};

    pub static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

    pub fn install_shutdown_handlers() {
        extern "C" fn termination_handler(_: nix::libc::c_int) {
            // A second signal means the loop is stuck: give up on a clean exit
            if SHUTDOWN_REQUESTED.swap(true, Ordering::SeqCst) {
                std::process::exit(130); // Standard exit code for Ctrl+C
            }
        }

        let handler = SigHandler::Handler(termination_handler);
        let action = SigAction::new(handler, SaFlags::empty(), SigSet::empty());

        unsafe {
            if let Err(e) = sigaction(Signal::SIGINT, &action) {
                tracing::error!("Failed to set SIGINT handler: {}", e);
            }
            if let Err(e) = sigaction(Signal::SIGTERM, &action) {
                tracing::error!("Failed to set SIGTERM handler: {}", e);
            }
        }
    }
}
