//=========================================================================
// Event Collector
//=========================================================================
//
// Moves platform events onto the owning thread's event bus once per frame.
//
// Architecture:
//   Receiver<PlatformEvent> → collect_frame() → EventBus → TickControl
//
// Bounded draining keeps one flooded frame from starving the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::event_bus::EventBus;
use crate::core::scene::{CancelSceneSwitch, SceneKey};

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Most events handled in one frame; the rest wait for the next one.
pub(crate) const MAX_EVENTS_PER_FRAME: usize = 100;

pub(crate) struct EventCollector<S: SceneKey> {
    receiver: Receiver<PlatformEvent<S>>,
}

impl<S: SceneKey> EventCollector<S> {
    pub(crate) fn new(receiver: Receiver<PlatformEvent<S>>) -> Self {
        Self { receiver }
    }

    /// Publishes pending platform events on `bus`.
    pub(crate) fn collect_frame(&mut self, bus: &mut EventBus) -> TickControl {
        let mut drained = 0;

        while drained < MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(PlatformEvent::PlanSwitch(plan)) => bus.publish(plan),
                Ok(PlatformEvent::CancelSwitch) => bus.publish(CancelSceneSwitch),
                Ok(PlatformEvent::Shutdown) => {
                    info!("Shutdown requested by platform");
                    return TickControl::Exit;
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
            drained += 1;
        }

        if drained >= MAX_EVENTS_PER_FRAME {
            warn!("Platform event backlog: drained {} events this frame", drained);
        }

        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
