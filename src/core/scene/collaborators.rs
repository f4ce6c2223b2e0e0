//=========================================================================
// Engine Collaborators
//=========================================================================
//
// Narrow contracts the switcher needs from the host engine and UI layer.
//
// Each trait is consumed at a single point of the switch protocol:
//   EngineRoot   → commit (install the new scene)
//   InputLock    → request intake / end of the deciding tick
//   TextureCache → request intake
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{Scene, SceneKey};

//=== EngineRoot ==========================================================

/// The engine's displayed root.
///
/// Exactly one of `run_with_scene` / `replace_scene` is called per commit.
pub trait EngineRoot<S: SceneKey> {
    /// Whether the engine is already displaying a scene.
    fn has_running_scene(&self) -> bool;

    /// First install of the process.
    fn run_with_scene(&mut self, scene: &dyn Scene<S>);

    /// Every install after the first.
    fn replace_scene(&mut self, scene: &dyn Scene<S>);
}

//=== InputLock ===========================================================

/// Token returned when keyboard opening is prevented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockToken(pub u32);

/// UI-layer lock that keeps text fields from opening the keyboard while a
/// switch is being planned.
pub trait InputLock {
    fn prevent_keyboard_open(&mut self) -> LockToken;

    fn release_all_locks(&mut self);
}

/// Input lock for hosts without a software keyboard.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInputLock;

impl InputLock for NoInputLock {
    fn prevent_keyboard_open(&mut self) -> LockToken {
        LockToken(0)
    }

    fn release_all_locks(&mut self) {}
}

//=== TextureCache ========================================================

/// Asynchronous texture loader of the host engine.
///
/// Told to drop in-flight loads when a new switch is planned, since the
/// images waiting for them are about to go away. Best-effort only.
pub trait TextureCache {
    fn abandon_async_loads(&mut self);
}

/// Texture cache for hosts that load synchronously.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTextureCache;

impl TextureCache for NoTextureCache {
    fn abandon_async_loads(&mut self) {}
}
