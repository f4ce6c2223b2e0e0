//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges platform callbacks with the switcher's owning thread.
//
// Platform code may call in from any thread (JNI callbacks, activity
// results); the switcher only ever runs on the tick thread. Everything
// crossing over goes through a channel and is replayed on the event bus
// at the start of the next frame.
//
// Components:
// - `interface`: PlatformEvent and SwitchSender (the contract)
// - `event_collector`: tick-side draining onto the event bus
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub(crate) mod interface;

//=== Public API ==========================================================

pub(crate) use event_collector::EventCollector;
pub use event_collector::TickControl;
pub use interface::{PlatformEvent, SwitchSender};
