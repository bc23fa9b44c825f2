//! Clipboard for the code pane's Copy action and paste key
//!
//! Copy writes to an internal buffer and, when the system clipboard is
//! enabled, also:
//! - emits an OSC 52 escape sequence through crossterm (terminal clipboard)
//! - sets the X11/Wayland/OS clipboard through arboard
//!
//! Script control mode and tests use [`Clipboard::internal_only`] so nothing
//! is written to stdout.

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;
use std::io::{stdout, Write};
use std::sync::Mutex;

/// Kept alive for the whole process: on X11 the clipboard owner must outlive
/// the copy to answer paste requests from other applications.
static SYSTEM_CLIPBOARD: Mutex<Option<arboard::Clipboard>> = Mutex::new(None);

/// Where a copy ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    /// The OS clipboard accepted the text
    System,
    /// Only the in-process buffer (and maybe the terminal via OSC 52)
    Internal,
}

#[derive(Debug, Clone)]
pub struct Clipboard {
    internal: String,
    use_system: bool,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard {
    /// Clipboard that also targets the terminal and the OS
    pub fn new() -> Self {
        Self {
            internal: String::new(),
            use_system: true,
        }
    }

    /// Clipboard that never leaves the process
    pub fn internal_only() -> Self {
        Self {
            internal: String::new(),
            use_system: false,
        }
    }

    pub fn copy(&mut self, text: &str) -> CopyTarget {
        self.internal = text.to_string();
        if !self.use_system {
            return CopyTarget::Internal;
        }

        // OSC 52 gives no feedback; the terminal may silently ignore it
        if let Err(e) = execute!(stdout(), CopyToClipboard::to_clipboard_from(text)) {
            tracing::debug!("OSC 52 clipboard copy failed: {}", e);
        }
        let _ = stdout().flush();

        match with_system_clipboard(|cb| cb.set_text(text)) {
            Some(Ok(())) => CopyTarget::System,
            Some(Err(e)) => {
                tracing::debug!("arboard copy failed: {}", e);
                CopyTarget::Internal
            }
            None => CopyTarget::Internal,
        }
    }

    /// Text to paste, preferring the system clipboard when enabled
    pub fn paste(&mut self) -> Option<String> {
        if self.use_system {
            if let Some(Ok(text)) = with_system_clipboard(|cb| cb.get_text()) {
                if !text.is_empty() {
                    self.internal = text.clone();
                    return Some(text);
                }
            }
        }
        if self.internal.is_empty() {
            None
        } else {
            Some(self.internal.clone())
        }
    }

    pub fn internal(&self) -> &str {
        &self.internal
    }
}

/// Run `f` against the shared system clipboard, creating it on first use.
/// Returns None when no system clipboard is available.
fn with_system_clipboard<R>(
    f: impl FnOnce(&mut arboard::Clipboard) -> Result<R, arboard::Error>,
) -> Option<Result<R, arboard::Error>> {
    let mut guard = SYSTEM_CLIPBOARD.lock().ok()?;
    if guard.is_none() {
        match arboard::Clipboard::new() {
            Ok(cb) => *guard = Some(cb),
            Err(e) => {
                tracing::debug!("arboard clipboard init failed: {}", e);
                return None;
            }
        }
    }
    guard.as_mut().map(f)
}
