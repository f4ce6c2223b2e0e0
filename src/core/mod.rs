//=========================================================================
// Core Systems
//
// Everything that runs on the thread owning the displayed scene.
//
// Modules:
// - `scene`: scene identity, construction and the switch state machine
// - `event_bus`: typed publish/subscribe between the switcher and the app
// - `platform_bridge`: delivery of platform requests onto the tick thread
// - `error`: error types shared by the above
//
// Notes:
// Nothing in `core` is thread-safe by itself. Only `SwitchSender` may
// leave the owning thread; it feeds the channel drained by the runtime
// at the start of every frame.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod error;
pub mod event_bus;
pub mod platform_bridge;
pub mod scene;

//=== Public API ==========================================================

pub use error::{BridgeError, SceneError, SwitchError};
pub use event_bus::EventBus;
pub use scene::{SceneKey, SceneSwitcher};
