//=========================================================================
// Errors
//=========================================================================
//
// Error types shared by the scene switcher, scene factories and the
// platform bridge.
//
// Taxonomy:
//   Invalid input        → logged and ignored (never an Err)
//   Precondition failure → SwitchError
//   Factory failure      → SceneError wrapped in SwitchError::SceneCreation
//   Bridge failure       → BridgeError
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== SceneError ==========================================================

/// Failure reported by a [`crate::core::scene::SceneFactory`].
#[derive(Debug, Error)]
pub enum SceneError {
    /// No constructor has been registered for the requested scene.
    #[error("no scene constructor registered for {0}")]
    Unregistered(String),

    /// The constructor ran but could not build the scene.
    #[error("scene construction failed: {0}")]
    Construction(String),
}

//=== SwitchError =========================================================

/// Errors surfaced by [`crate::core::scene::SceneSwitcher`].
#[derive(Debug, Error)]
pub enum SwitchError {
    /// Bootstrap was requested while a scene is already installed.
    #[error("cannot bootstrap with {requested}: scene {current} is already active")]
    AlreadyInitialized { current: String, requested: String },

    /// Bootstrap was requested without a target scene.
    #[error("cannot bootstrap to the None scene")]
    NoTarget,

    /// The scene factory failed while committing a switch.
    #[error("failed to create scene {scene}")]
    SceneCreation {
        scene: String,
        #[source]
        source: SceneError,
    },
}

//=== BridgeError =========================================================

/// Errors returned by [`crate::core::platform_bridge::SwitchSender`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// The runtime owning the switcher has been dropped.
    #[error("scene switch runtime is no longer running")]
    Disconnected,
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn scene_creation_exposes_factory_error_as_source() {
        let err = SwitchError::SceneCreation {
            scene: "Home".to_string(),
            source: SceneError::Unregistered("Home".to_string()),
        };

        assert_eq!(err.to_string(), "failed to create scene Home");
        let source = err.source().map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("no scene constructor registered for Home")
        );
    }

    #[test]
    fn already_initialized_names_both_scenes() {
        let err = SwitchError::AlreadyInitialized {
            current: "Home".to_string(),
            requested: "Settings".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Home"));
        assert!(text.contains("Settings"));
    }
}
