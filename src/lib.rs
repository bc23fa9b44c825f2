// Console library - exposes all core modules for testing

// Core modules at root level
pub mod config;
pub mod docs;

// Organized modules
pub mod model;
pub mod services;

#[cfg(feature = "runtime")]
pub mod app;
#[cfg(feature = "runtime")]
pub mod clipboard;
#[cfg(feature = "runtime")]
pub mod view;
