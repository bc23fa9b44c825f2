//! Toolbar commands and the console text they produce

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive that can be dropped into the scene from the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Cube,
    Sphere,
    Cylinder,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 3] = [ObjectKind::Cube, ObjectKind::Sphere, ObjectKind::Cylinder];

    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Cube => "cube",
            ObjectKind::Sphere => "sphere",
            ObjectKind::Cylinder => "cylinder",
        }
    }

    /// Capitalized name for buttons
    pub fn label(self) -> &'static str {
        match self {
            ObjectKind::Cube => "Cube",
            ObjectKind::Sphere => "Sphere",
            ObjectKind::Cylinder => "Cylinder",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light type offered by the toolbar selector.
///
/// Selecting one has no effect on the log; it is UI state only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    #[default]
    Directional,
    Point,
    Ambient,
}

impl LightKind {
    pub fn next(self) -> Self {
        match self {
            LightKind::Directional => LightKind::Point,
            LightKind::Point => LightKind::Ambient,
            LightKind::Ambient => LightKind::Directional,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LightKind::Directional => "Directional",
            LightKind::Point => "Point",
            LightKind::Ambient => "Ambient",
        }
    }
}

/// A user action from the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolbarCommand {
    AddObject { kind: ObjectKind },
    RotateCamera,
    /// Zoom percentage. Passed through verbatim; callers decide on bounds.
    SetZoom { percent: u32 },
}

impl ToolbarCommand {
    /// The console line this command appends
    pub fn log_text(&self) -> String {
        match self {
            ToolbarCommand::AddObject { kind } => format!("> Added {} to scene", kind),
            ToolbarCommand::RotateCamera => "> Camera rotated by 45 degrees".to_string(),
            ToolbarCommand::SetZoom { percent } => format!("> Camera zoom set to {}%", percent),
        }
    }

    /// Title and description of the notification this command sends
    pub fn notification(&self) -> (String, String) {
        match self {
            ToolbarCommand::AddObject { kind } => (
                format!("Added {}", kind),
                format!("A new {} has been added to the scene", kind),
            ),
            ToolbarCommand::RotateCamera => (
                "Scene rotated".to_string(),
                "Camera has been rotated around the scene".to_string(),
            ),
            ToolbarCommand::SetZoom { percent } => (
                "Zoom changed".to_string(),
                format!("Camera zoom set to {}%", percent),
            ),
        }
    }
}
