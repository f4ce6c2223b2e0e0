//=========================================================================
// Switch Requests
//=========================================================================
//
// A pending request and the single-entry, latest-wins slot that holds the
// request waiting behind an in-flight switch.
//
// Unlike a FIFO, the slot keeps no history: a newer request replaces the
// older one and the superseded request is handed back to the caller.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{SceneKey, SceneParams};

//=== PendingRequest ======================================================

/// Target scene plus the parameters it will be constructed with.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest<S: SceneKey> {
    pub target: S,
    pub params: SceneParams,
}

impl<S: SceneKey> PendingRequest<S> {
    pub fn new(target: S, params: SceneParams) -> Self {
        Self { target, params }
    }
}

//=== QueuedSlot ==========================================================

/// Holds at most one request; putting a new one replaces the old.
#[derive(Debug)]
pub struct QueuedSlot<S: SceneKey> {
    request: Option<PendingRequest<S>>,
}

impl<S: SceneKey> QueuedSlot<S> {
    pub fn new() -> Self {
        Self { request: None }
    }

    /// Stores `request`, returning the one it superseded.
    pub fn put(&mut self, request: PendingRequest<S>) -> Option<PendingRequest<S>> {
        self.request.replace(request)
    }

    /// Removes the queued request, leaving the slot empty.
    pub fn take(&mut self) -> Option<PendingRequest<S>> {
        self.request.take()
    }

    pub fn target(&self) -> Option<S> {
        self.request.as_ref().map(|request| request.target)
    }

    pub fn is_empty(&self) -> bool {
        self.request.is_none()
    }

    pub fn clear(&mut self) {
        self.request = None;
    }
}

impl<S: SceneKey> Default for QueuedSlot<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
