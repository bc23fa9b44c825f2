//! Console configuration
//!
//! Read from JSON. Every field has a default, so an empty object (or no file
//! at all) is a valid configuration.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Color scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub fn toggled(self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::Dark,
        }
    }
}

/// Simulated execution settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Delay between pressing Run and the scene becoming active, in milliseconds
    pub latency_ms: u64,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self { latency_ms: 1500 }
    }
}

impl ExecutionConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Console pane and toast settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ConsoleConfig {
    /// How long a toast stays on screen, in milliseconds
    pub toast_duration_ms: u64,
    /// Maximum number of toasts shown at once
    pub max_visible_toasts: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: 3000,
            max_visible_toasts: 3,
        }
    }
}

/// Code pane settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EditorConfig {
    /// Spaces inserted by Tab
    pub tab_size: usize,
    /// File name used by Download, relative to the working directory
    pub download_file_name: String,
    /// Zoom slider position at startup (0-100)
    pub initial_zoom: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            download_file_name: "engine3d_scene.py".to_string(),
            initial_zoom: 50,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    pub execution: ExecutionConfig,
    pub console: ConsoleConfig,
    pub editor: EditorConfig,
    pub theme: ThemeName,
}

impl Config {
    /// Load and validate a configuration file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from the default location, falling back to defaults on any problem
    #[cfg(feature = "runtime")]
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config: {}", e);
                Self::default()
            }
        }
    }

    /// `<config dir>/dreamscape/config.json`
    #[cfg(feature = "runtime")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dreamscape").join("config.json"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.console.max_visible_toasts == 0 {
            return Err(ConfigError::Invalid(
                "console.max_visible_toasts must be at least 1".to_string(),
            ));
        }
        if self.editor.tab_size == 0 {
            return Err(ConfigError::Invalid(
                "editor.tab_size must be at least 1".to_string(),
            ));
        }
        if self.editor.initial_zoom > 100 {
            return Err(ConfigError::Invalid(format!(
                "editor.initial_zoom must be between 0 and 100, got {}",
                self.editor.initial_zoom
            )));
        }
        Ok(())
    }

    /// JSON Schema for the configuration file
    pub fn json_schema() -> String {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    }
}
