//! Scene activity state machine
//!
//! ```text
//! Idle    --submit-->   Loading
//! Loading --complete--> Active
//! Loading --submit-->   Loading   (superseded run)
//! Active  --submit-->   Loading   (re-run)
//! ```
//!
//! Once left, `Idle` is never re-entered: re-running never clears the
//! preview back to the placeholder.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneState {
    /// Nothing has been run yet
    #[default]
    Idle,
    /// A simulated execution is in flight
    Loading,
    /// The most recent execution finished
    Active,
}

impl SceneState {
    /// A new run was submitted. Every state moves to `Loading`.
    pub fn on_submit(self) -> Self {
        SceneState::Loading
    }

    /// The pending run finished.
    ///
    /// Only `Loading` may become `Active`; anything else is left as is so
    /// that `Idle -> Active` can never happen.
    pub fn on_complete(self) -> Self {
        match self {
            SceneState::Loading => SceneState::Active,
            other => {
                tracing::debug!("scene: ignoring completion while {:?}", other);
                other
            }
        }
    }

    pub fn is_loading(self) -> bool {
        self == SceneState::Loading
    }

    pub fn is_active(self) -> bool {
        self == SceneState::Active
    }
}

impl fmt::Display for SceneState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SceneState::Idle => "idle",
            SceneState::Loading => "loading",
            SceneState::Active => "active",
        };
        f.write_str(name)
    }
}
