//! Presentation layer: palettes and ratatui renderers.
//!
//! Views only read console state; they never change the log or the scene.

pub mod theme;
pub mod ui;

pub use theme::Theme;
