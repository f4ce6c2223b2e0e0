//=========================================================================
// Scene Events
//=========================================================================
//
// The two topics the switcher exchanges with the rest of the app:
//
//   PlanSceneSwitch ──→ SceneSwitcher ──→ SceneSwitched
//   CancelSceneSwitch ─┘
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{SceneKey, SceneParams};

//=== Inbound =============================================================

/// Request to switch to `scene`, equivalent to calling
/// [`super::SceneSwitcher::request_switch`].
///
/// `scene: None` is accepted on the bus but ignored by the switcher.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSceneSwitch<S: SceneKey> {
    pub scene: Option<S>,
    pub params: SceneParams,
}

impl<S: SceneKey> PlanSceneSwitch<S> {
    pub fn new(scene: S, params: SceneParams) -> Self {
        Self {
            scene: Some(scene),
            params,
        }
    }

    /// Request without initialization values.
    pub fn to(scene: S) -> Self {
        Self::new(scene, SceneParams::new())
    }
}

/// Cancels the pending, not yet committed, switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CancelSceneSwitch;

//=== Outbound ============================================================

/// Published once per successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSwitched<S: SceneKey> {
    pub scene: S,
}
