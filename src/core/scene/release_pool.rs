//=========================================================================
// Deferred Release Pool
//=========================================================================
//
// Outgoing scenes are not dropped in the tick that detaches them: engine
// callbacks (async asset loads, actions scheduled this frame) may still
// reach them. The pool keeps them alive until the following tick.
//
//   tick N   : commit → defer_release(old)
//   tick N+1 : release_settled() → drop(old)
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{Scene, SceneKey};

//=== ReleasePool =========================================================

/// Holds detached scenes until it is safe to drop them.
pub trait ReleasePool<S: SceneKey> {
    /// Takes ownership of a stopped scene.
    fn defer_release(&mut self, scene: Box<dyn Scene<S>>);

    /// Drops every scene deferred before the current tick. Called by the
    /// switcher at the start of each tick; returns how many were dropped.
    fn release_settled(&mut self) -> usize;

    /// Number of scenes still awaiting release.
    fn pending(&self) -> usize;
}

//=== FrameReleasePool ====================================================

/// Releases scenes one tick after they were deferred.
pub struct FrameReleasePool<S: SceneKey> {
    deferred: Vec<Box<dyn Scene<S>>>,
}

impl<S: SceneKey> FrameReleasePool<S> {
    pub fn new() -> Self {
        Self {
            deferred: Vec::new(),
        }
    }
}

impl<S: SceneKey> Default for FrameReleasePool<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SceneKey> ReleasePool<S> for FrameReleasePool<S> {
    fn defer_release(&mut self, scene: Box<dyn Scene<S>>) {
        debug!("Deferring release of scene {:?}", scene.key());
        self.deferred.push(scene);
    }

    fn release_settled(&mut self) -> usize {
        let released = self.deferred.len();
        if released > 0 {
            debug!("Releasing {} detached scene(s)", released);
            self.deferred.clear();
        }
        released
    }

    fn pending(&self) -> usize {
        self.deferred.len()
    }
}

//=========================================================================
// Tests
//=========================================================================
