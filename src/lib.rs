//=========================================================================
// FenneX Scenes: Library Root
//
// Scene switching for the FenneX application framework.
//
// Responsibilities:
// - Serialize scene switch requests (one in flight, latest queued wins)
// - Gate every switch on the frame scheduler
// - Tear down the outgoing scene safely and install the new one
// - Accept requests from platform threads without sharing state
//
// Typical usage:
// ```no_run
// use fennex_scenes::prelude::*;
//
// let mut engine = EngineBuilder::new().build(registry, root);
// engine.start_with(AppScene::Home, SceneParams::new())?;
// engine.run()?;
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the switcher and its collaborators. It is public so hosts
// can drive a `SceneSwitcher` directly from their own frame loop instead
// of going through `Engine`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `engine` wires the switcher, event bus and platform channel into a
// frame loop.
//
mod engine;

//--- Public Exports ------------------------------------------------------

pub use engine::{Engine, EngineBuilder};
