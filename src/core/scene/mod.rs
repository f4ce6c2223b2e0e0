//=========================================================================
// Scene System
//=========================================================================
//
// Scene identity, construction and the switch state machine.
//
// Architecture:
//   SceneSwitcher
//     ├─ factory: SceneFactory (SceneRegistry)
//     ├─ root: EngineRoot (host engine)
//     ├─ release_pool: ReleasePool (FrameReleasePool)
//     ├─ next / queued: PendingRequest
//     └─ scene: Box<dyn Scene>
//
// Flow:
//   PlanSceneSwitch → request_switch() → tick() → commit() → SceneSwitched
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt::Debug;
use std::hash::Hash;

//=== Module Declarations =================================================

mod collaborators;
mod events;
mod params;
mod registry;
mod release_pool;
mod request;
mod switcher;

//=== Public API ==========================================================

pub use collaborators::{EngineRoot, InputLock, LockToken, NoInputLock, NoTextureCache, TextureCache};
pub use events::{CancelSceneSwitch, PlanSceneSwitch, SceneSwitched};
pub use params::{ParamValue, SceneParams};
pub use registry::{SceneFactory, SceneRegistry};
pub use release_pool::{FrameReleasePool, ReleasePool};
pub use request::{PendingRequest, QueuedSlot};
pub use switcher::{
    SceneSwitcher, SwitchState, SwitcherConfig, DEFAULT_DELAY_OFFSET, DEFAULT_SWITCH_DELAY,
};

//=== Scene Key Trait =====================================================

/// Marker trait for scene identifiers.
///
/// Typically implemented by an application enum. "No scene" is expressed
/// as `Option::<S>::None` rather than a sentinel variant.
pub trait SceneKey: Clone + Copy + Eq + Hash + Debug + Send + 'static {}

//=== Scene Trait =========================================================

/// An engine-level scene instance built for one commit.
///
/// The switcher stops the scene when it is replaced and drops it through
/// the release pool a tick later; cleanup that must not run mid-frame
/// belongs in `Drop`.
pub trait Scene<S: SceneKey> {
    /// Identifier this scene was built for.
    fn key(&self) -> S;

    /// Detaches the scene from the engine: stop actions, timers and
    /// listeners.
    fn stop(&mut self);
}
