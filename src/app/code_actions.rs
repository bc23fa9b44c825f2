//! Code pane and toolbar actions for the Console.
//!
//! - Copy, save and download the code buffer
//! - Paste from the clipboard
//! - Toolbar commands (objects, camera rotation, zoom) and the light selector
//! - Theme and documentation toggles

use crate::clipboard::CopyTarget;
use crate::model::{ObjectKind, ToolbarCommand};
use crate::services::{NotificationSink, Timer};
use std::io;
use std::path::PathBuf;

use super::{Console, DocsDialog};

impl<T: Timer> Console<T> {
    fn toast(&mut self, title: &str, description: &str) {
        let now = self.orchestrator.timer().now();
        let sink = self.orchestrator.sink_mut();
        sink.observe_time(now);
        sink.notify(title, description);
    }

    /// Copy the code buffer to the clipboard
    pub fn copy_code(&mut self) {
        let text = self.code.text();
        match self.clipboard.copy(&text) {
            CopyTarget::System => tracing::debug!("copied {} bytes to system clipboard", text.len()),
            CopyTarget::Internal => tracing::debug!("copied {} bytes internally", text.len()),
        }
        self.toast(
            "Copied to clipboard",
            "The code has been copied to your clipboard.",
        );
    }

    /// Insert clipboard contents at the cursor
    pub fn paste(&mut self) {
        match self.clipboard.paste() {
            Some(text) if !text.is_empty() => self.code.insert_str(&text),
            _ => tracing::debug!("paste: clipboard empty"),
        }
    }

    /// Mark the code saved. Code opened from a file is written back to it.
    pub fn save_code(&mut self) {
        if let Some(path) = self.source_path.clone() {
            if let Err(e) = std::fs::write(&path, self.code.text()) {
                tracing::warn!("failed to save {}: {}", path.display(), e);
                self.toast("Save failed", &e.to_string());
                return;
            }
            tracing::info!("saved code to {}", path.display());
        }
        self.code.mark_saved();
        self.toast("Code saved", "Your code has been saved to the project.");
    }

    /// Write the code buffer to the configured download file name in the
    /// working directory
    pub fn download_code(&mut self) -> io::Result<PathBuf> {
        let path = self
            .working_dir
            .join(&self.config.editor.download_file_name);
        match std::fs::write(&path, self.code.text()) {
            Ok(()) => {
                tracing::info!("downloaded code to {}", path.display());
                self.toast("File downloaded", "Your Python code has been downloaded.");
                Ok(path)
            }
            Err(e) => {
                tracing::warn!("failed to write {}: {}", path.display(), e);
                self.toast("Download failed", &e.to_string());
                Err(e)
            }
        }
    }

    pub fn add_object(&mut self, kind: ObjectKind) {
        self.orchestrator.dispatch(ToolbarCommand::AddObject { kind });
    }

    pub fn rotate_camera(&mut self) {
        self.orchestrator.dispatch(ToolbarCommand::RotateCamera);
    }

    /// Set the zoom slider and report the new value
    pub fn set_zoom(&mut self, percent: u32) {
        self.toolbar.zoom = percent;
        self.orchestrator
            .dispatch(ToolbarCommand::SetZoom { percent });
    }

    /// Move the zoom slider, clamped to 0..=100. Nothing is logged when the
    /// slider is already at the end it moves towards.
    pub fn zoom_by(&mut self, delta: i32) {
        let current = self.toolbar.zoom.min(100) as i32;
        let target = (current + delta).clamp(0, 100) as u32;
        if target == self.toolbar.zoom {
            return;
        }
        self.set_zoom(target);
    }

    pub fn cycle_light_kind(&mut self) {
        self.toolbar.light = self.toolbar.light.next();
        tracing::info!("light type selected: {}", self.toolbar.light.label());
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        tracing::debug!("theme: {:?}", self.theme);
    }

    pub fn toggle_docs(&mut self) {
        self.docs = match self.docs {
            Some(_) => None,
            None => Some(DocsDialog {
                tab: Default::default(),
                scroll: 0,
            }),
        };
    }
}
