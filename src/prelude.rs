//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use fennex_scenes::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Runtime
pub use crate::engine::{Engine, EngineBuilder};

// Scene system
pub use crate::core::scene::{
    CancelSceneSwitch, EngineRoot, FrameReleasePool, InputLock, LockToken, NoInputLock,
    NoTextureCache, ParamValue, PlanSceneSwitch, ReleasePool, Scene, SceneFactory, SceneKey,
    SceneParams, SceneRegistry, SceneSwitched, SceneSwitcher, SwitchState, SwitcherConfig,
    TextureCache,
};

// Events and platform bridge
pub use crate::core::event_bus::EventBus;
pub use crate::core::platform_bridge::{SwitchSender, TickControl};

// Errors
pub use crate::core::error::{BridgeError, SceneError, SwitchError};
