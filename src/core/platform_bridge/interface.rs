//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between platform callbacks (JNI, activity results, OS
// notifications) and the thread that owns the scene switcher.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;

//=== Internal Dependencies ===============================================

use crate::core::error::BridgeError;
use crate::core::scene::{PlanSceneSwitch, SceneKey, SceneParams};

//=== PlatformEvent =======================================================

/// Messages crossing into the switcher's thread.
#[derive(Debug, Clone)]
pub enum PlatformEvent<S: SceneKey> {
    /// Plan a scene switch.
    PlanSwitch(PlanSceneSwitch<S>),

    /// Cancel the pending scene switch.
    CancelSwitch,

    /// Stop the runtime loop.
    Shutdown,
}

//=== SwitchSender ========================================================

/// Cloneable, thread-safe handle for requesting switches from outside the
/// switcher's thread.
///
/// Requests are delivered on the next frame, never synchronously.
#[derive(Debug)]
pub struct SwitchSender<S: SceneKey> {
    tx: Sender<PlatformEvent<S>>,
}

impl<S: SceneKey> Clone for SwitchSender<S> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<S: SceneKey> SwitchSender<S> {
    pub(crate) fn new(tx: Sender<PlatformEvent<S>>) -> Self {
        Self { tx }
    }

    /// Plans a switch to `scene`. Blocks only if the channel is full.
    pub fn plan_switch(&self, scene: S, params: SceneParams) -> Result<(), BridgeError> {
        self.send(PlatformEvent::PlanSwitch(PlanSceneSwitch::new(scene, params)))
    }

    pub fn cancel_switch(&self) -> Result<(), BridgeError> {
        self.send(PlatformEvent::CancelSwitch)
    }

    /// Asks the runtime loop to exit after the current frame.
    pub fn shutdown(&self) -> Result<(), BridgeError> {
        self.send(PlatformEvent::Shutdown)
    }

    fn send(&self, event: PlatformEvent<S>) -> Result<(), BridgeError> {
        self.tx.send(event).map_err(|_| BridgeError::Disconnected)
    }
}

//=========================================================================
// Tests
//=========================================================================
