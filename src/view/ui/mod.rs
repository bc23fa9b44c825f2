//! UI rendering modules
//!
//! This module contains all rendering logic for the console UI,
//! separated into focused submodules:
//! - `chrome` - Header, toolbar and footer rows
//! - `scene` - Scene preview panel
//! - `console` - Console log panel
//! - `code_pane` - Code editor / API reference / settings pane
//! - `docs_dialog` - Documentation popup
//! - `toasts` - Notification overlay

pub mod chrome;
pub mod code_pane;
pub mod console;
pub mod docs_dialog;
pub mod scene;
pub mod toasts;

pub use chrome::{render_footer, render_header, render_toolbar, zoom_slider, APP_TITLE};
pub use code_pane::render_code_pane;
pub use console::{render_console, visible_range};
pub use docs_dialog::{dialog_area, render_docs_dialog};
pub use scene::{caption as scene_caption, render_scene};
pub use toasts::render_toasts;
