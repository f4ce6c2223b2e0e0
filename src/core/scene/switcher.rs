//=========================================================================
// Scene Switcher
//=========================================================================
//
// Serializes scene switch requests and applies them on scheduler ticks.
//
// Slots:
//   next   : the request being carried out (at most one)
//   queued : the request waiting behind it (at most one, latest wins)
//
// Flow per tick:
//   release_settled() → evaluate() ──→ commit() ──→ SceneSwitched
//                          │              │
//                          │              └─ cancelled → adopt queued
//                          └─ same scene / no target → adopt queued
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Instant;

use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::collaborators::{EngineRoot, InputLock, LockToken, NoInputLock, NoTextureCache, TextureCache};
use super::events::{CancelSceneSwitch, PlanSceneSwitch, SceneSwitched};
use super::registry::SceneFactory;
use super::release_pool::{FrameReleasePool, ReleasePool};
use super::request::{PendingRequest, QueuedSlot};
use super::{Scene, SceneKey, SceneParams};
use crate::core::error::SwitchError;
use crate::core::event_bus::EventBus;

//=== Configuration =======================================================

/// Default per-transition delay. Delayed transitions are disabled.
pub const DEFAULT_SWITCH_DELAY: f32 = 0.0;

/// Default time added on top of a non-zero switch delay.
pub const DEFAULT_DELAY_OFFSET: f32 = 0.0;

/// Timing configuration of a [`SceneSwitcher`].
///
/// A non-zero `switch_delay` makes every transition count down
/// `switch_delay + delay_offset` seconds before committing, leaving time
/// for closing animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitcherConfig {
    switch_delay: f32,
    delay_offset: f32,
}

impl SwitcherConfig {
    pub fn new() -> Self {
        Self {
            switch_delay: DEFAULT_SWITCH_DELAY,
            delay_offset: DEFAULT_DELAY_OFFSET,
        }
    }

    /// Sets the delay, in seconds, before a planned switch commits.
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is negative or not finite.
    pub fn with_switch_delay(mut self, seconds: f32) -> Self {
        assert!(
            seconds.is_finite() && seconds >= 0.0,
            "Switch delay must be non-negative, got {}",
            seconds
        );
        self.switch_delay = seconds;
        self
    }

    /// Sets the offset added to a non-zero switch delay.
    ///
    /// # Panics
    ///
    /// Panics if `seconds` is negative or not finite.
    pub fn with_delay_offset(mut self, seconds: f32) -> Self {
        assert!(
            seconds.is_finite() && seconds >= 0.0,
            "Delay offset must be non-negative, got {}",
            seconds
        );
        self.delay_offset = seconds;
        self
    }

    pub fn switch_delay(&self) -> f32 {
        self.switch_delay
    }

    pub fn delay_offset(&self) -> f32 {
        self.delay_offset
    }
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self::new()
    }
}

//=== SwitchState =========================================================

/// Coarse state of the switcher, derived from its slots and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchState {
    /// No transition requested.
    Idle,

    /// A request waits for its frame delay to elapse.
    Pending,

    /// A request is counting down its switch delay.
    PendingDelayed,
}

//=== SceneSwitcher =======================================================

/// Owns the displayed scene and every transition away from it.
///
/// One switcher is created by the application root and driven from the
/// thread that ticks the engine. Requests from other threads must go
/// through [`crate::core::platform_bridge::SwitchSender`].
///
/// # Example
///
/// ```rust
/// # use fennex_scenes::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum AppScene { Home, Settings }
/// # impl SceneKey for AppScene {}
/// # struct Screen(AppScene);
/// # impl Scene<AppScene> for Screen {
/// #     fn key(&self) -> AppScene { self.0 }
/// #     fn stop(&mut self) {}
/// # }
/// # #[derive(Default)]
/// # struct Root { running: bool }
/// # impl EngineRoot<AppScene> for Root {
/// #     fn has_running_scene(&self) -> bool { self.running }
/// #     fn run_with_scene(&mut self, _: &dyn Scene<AppScene>) { self.running = true; }
/// #     fn replace_scene(&mut self, _: &dyn Scene<AppScene>) {}
/// # }
/// let mut registry = SceneRegistry::new();
/// registry.register(AppScene::Home, |_| Ok(Screen(AppScene::Home)));
/// registry.register(AppScene::Settings, |_| Ok(Screen(AppScene::Settings)));
///
/// let mut bus = EventBus::new();
/// let mut switcher = SceneSwitcher::new(registry, Root::default());
/// switcher.init_with_scene(Some(AppScene::Home), SceneParams::new(), &mut bus)?;
///
/// switcher.request_switch(Some(AppScene::Settings), SceneParams::new());
/// switcher.tick(1.0 / 60.0, &mut bus)?; // frame delay
/// switcher.tick(1.0 / 60.0, &mut bus)?; // commit
///
/// assert_eq!(switcher.current_scene(), Some(AppScene::Settings));
/// # Ok::<(), SwitchError>(())
/// ```
pub struct SceneSwitcher<S: SceneKey> {
    //--- Collaborators ----------------------------------------------------
    factory: Box<dyn SceneFactory<S>>,
    root: Box<dyn EngineRoot<S>>,
    input_lock: Box<dyn InputLock>,
    texture_cache: Box<dyn TextureCache>,
    release_pool: Box<dyn ReleasePool<S>>,
    config: SwitcherConfig,

    //--- Scenes -----------------------------------------------------------
    current: Option<S>,
    scene: Option<Box<dyn Scene<S>>>,
    next: Option<PendingRequest<S>>,
    queued: QueuedSlot<S>,

    //--- Flags ------------------------------------------------------------
    processing_switch: bool,
    event_fired: bool,
    switch_cancelled: bool,
    frame_delay: bool,
    reload_allowed: bool,
    bootstrapping: bool,
    delay_remaining: f32,
    keyboard_lock: Option<LockToken>,
}

impl<S: SceneKey> SceneSwitcher<S> {
    //--- Construction -----------------------------------------------------

    /// Creates an idle switcher with no active scene.
    ///
    /// The input lock and texture cache default to no-ops and outgoing
    /// scenes go to a [`FrameReleasePool`]; replace them with the `set_*`
    /// methods.
    pub fn new<F, R>(factory: F, root: R) -> Self
    where
        F: SceneFactory<S> + 'static,
        R: EngineRoot<S> + 'static,
    {
        Self {
            factory: Box::new(factory),
            root: Box::new(root),
            input_lock: Box::new(NoInputLock),
            texture_cache: Box::new(NoTextureCache),
            release_pool: Box::new(FrameReleasePool::new()),
            config: SwitcherConfig::new(),
            current: None,
            scene: None,
            next: None,
            queued: QueuedSlot::new(),
            processing_switch: false,
            event_fired: false,
            switch_cancelled: false,
            frame_delay: false,
            reload_allowed: false,
            bootstrapping: false,
            delay_remaining: 0.0,
            keyboard_lock: None,
        }
    }

    pub fn with_config(mut self, config: SwitcherConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_input_lock(&mut self, lock: impl InputLock + 'static) {
        self.input_lock = Box::new(lock);
    }

    pub fn set_texture_cache(&mut self, cache: impl TextureCache + 'static) {
        self.texture_cache = Box::new(cache);
    }

    pub fn set_release_pool(&mut self, pool: impl ReleasePool<S> + 'static) {
        self.release_pool = Box::new(pool);
    }

    //--- Queries ----------------------------------------------------------

    /// Identifier of the installed scene, `None` before the first commit.
    pub fn current_scene(&self) -> Option<S> {
        self.current
    }

    /// Handle of the installed scene.
    pub fn active_scene(&self) -> Option<&dyn Scene<S>> {
        self.scene.as_deref()
    }

    /// Target of the transition being carried out.
    pub fn next_scene(&self) -> Option<S> {
        self.next.as_ref().map(|request| request.target)
    }

    /// Target waiting behind the current transition.
    pub fn queued_scene(&self) -> Option<S> {
        self.queued.target()
    }

    pub fn state(&self) -> SwitchState {
        match (&self.next, self.event_fired) {
            (None, _) => SwitchState::Idle,
            (Some(_), false) => SwitchState::Pending,
            (Some(_), true) => SwitchState::PendingDelayed,
        }
    }

    /// True from the moment a request is accepted until it is committed or
    /// discarded.
    ///
    /// This includes the frame-delay tick: a request accepted while idle
    /// keeps this true through the tick that only defers it, and turns
    /// false after the tick that commits it (unless another request is
    /// queued behind it).
    pub fn is_switching(&self) -> bool {
        self.processing_switch || self.event_fired || self.next.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.switch_cancelled
    }

    pub fn config(&self) -> &SwitcherConfig {
        &self.config
    }

    /// Detached scenes not yet released.
    pub fn pending_releases(&self) -> usize {
        self.release_pool.pending()
    }

    //--- Requests ---------------------------------------------------------

    /// Bootstraps the first scene of the process and commits it at once.
    ///
    /// `target` takes precedence over anything requested before: a pending
    /// request is replaced and a pending cancel is dropped. A queued request
    /// is kept and adopted once `target` is installed.
    ///
    /// # Errors
    ///
    /// Fails if a scene is already installed, if `target` is `None`, or if
    /// the scene cannot be created.
    pub fn init_with_scene(
        &mut self,
        target: Option<S>,
        params: SceneParams,
        bus: &mut EventBus,
    ) -> Result<(), SwitchError> {
        if let Some(current) = self.current {
            return Err(SwitchError::AlreadyInitialized {
                current: format!("{:?}", current),
                requested: format!("{:?}", target),
            });
        }
        let Some(target) = target else {
            return Err(SwitchError::NoTarget);
        };

        if let Some(pending) = &self.next {
            warn!(
                "Bootstrapping {:?} replaces pending switch to {:?}",
                target, pending.target
            );
        }

        if self.switch_cancelled {
            debug!("Dropping pending cancel before bootstrap");
        }

        debug!("Bootstrapping scene {:?}", target);
        self.next = Some(PendingRequest::new(target, params));
        self.switch_cancelled = false;
        self.event_fired = false;
        self.delay_remaining = 0.0;
        self.frame_delay = true;
        self.processing_switch = true;
        self.bootstrapping = true;
        self.advance(0.0, bus)
    }

    /// Asks for a switch to `target`.
    ///
    /// The first request while idle becomes the next transition and waits
    /// at least one tick. Requests arriving while a switch is underway
    /// overwrite the queued slot. `None` is ignored.
    pub fn request_switch(&mut self, target: Option<S>, params: SceneParams) {
        let Some(target) = target else {
            warn!("Ignoring scene switch request without a target scene");
            return;
        };

        if !self.processing_switch && self.next.is_none() {
            debug!("Planning scene switch to {:?}", target);

            // Images waiting on async loads are about to be torn down
            self.texture_cache.abandon_async_loads();

            self.next = Some(PendingRequest::new(target, params));
            self.frame_delay = false;
            self.processing_switch = true;
            self.event_fired = false;

            if self.keyboard_lock.is_none() {
                self.keyboard_lock = Some(self.input_lock.prevent_keyboard_open());
            }
        } else {
            if let Some(superseded) = self.queued.put(PendingRequest::new(target, params)) {
                debug!(
                    "Queued switch to {:?} superseded by {:?}",
                    superseded.target, target
                );
            }
            debug!(
                "Queuing scene change to {:?} as a scene switch is already happening",
                target
            );
        }
    }

    /// Cancels the pending transition. Resolved at the next commit.
    pub fn cancel(&mut self) {
        if self.next.is_none() {
            debug!("No pending scene switch to cancel");
            return;
        }
        if self.bootstrapping {
            debug!("Bootstrap to {:?} cannot be cancelled", self.next_scene());
            return;
        }
        info!("Scene switch to {:?} cancelled", self.next_scene());
        self.switch_cancelled = true;
    }

    /// Lets the next commit rebuild the active scene. Reset after that
    /// commit.
    pub fn allow_reload(&mut self) {
        self.reload_allowed = true;
    }

    /// Drains plan and cancel events from the bus.
    ///
    /// Cancels apply to the transition that was in flight before this
    /// frame's plans, so they are handled first.
    pub fn process_plans(&mut self, bus: &mut EventBus) {
        if !bus.take::<CancelSceneSwitch>().is_empty() {
            self.cancel();
        }

        for plan in bus.take::<PlanSceneSwitch<S>>() {
            self.request_switch(plan.scene, plan.params);
        }
    }

    //--- Update Loop ------------------------------------------------------

    /// Advances the state machine by one scheduler frame.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::SceneCreation`] if the committed scene could
    /// not be built. The switcher is left idle.
    pub fn tick(&mut self, delta_time: f32, bus: &mut EventBus) -> Result<(), SwitchError> {
        self.advance(delta_time, bus)
    }

    //--- Internal Helpers -------------------------------------------------

    fn advance(&mut self, delta_time: f32, bus: &mut EventBus) -> Result<(), SwitchError> {
        self.release_pool.release_settled();

        let result = self.evaluate(delta_time, bus);

        // The lock spans the frame-delay tick only
        let deferred = matches!(result, Ok(false));
        if !deferred {
            if let Some(token) = self.keyboard_lock.take() {
                debug!("Releasing keyboard lock {:?}", token);
                self.input_lock.release_all_locks();
            }
        }

        self.processing_switch = false;
        result.map(|_| ())
    }

    /// Returns `Ok(false)` when the tick only consumed the frame delay.
    fn evaluate(&mut self, delta_time: f32, bus: &mut EventBus) -> Result<bool, SwitchError> {
        // The bootstrap target is installed before anything queued
        if !self.switch_cancelled && !self.bootstrapping {
            self.supersede_with_queued();
        }

        let Some(target) = self.next_scene() else {
            self.take_queued();
            return Ok(true);
        };

        debug!(
            "Next scene: {:?}, current scene: {:?}",
            target, self.current
        );

        if self.event_fired {
            self.delay_remaining -= delta_time;
            debug!("Switch delay running, remaining: {:.3}s", self.delay_remaining);
            if self.delay_remaining <= 0.0 {
                self.delay_remaining = 0.0;
                self.commit(bus)?;
            }
            return Ok(true);
        }

        if Some(target) == self.current && !self.reload_allowed {
            debug!("Scene {:?} is already active, nothing to switch", target);
            self.switch_cancelled = false;
            self.take_queued();
            return Ok(true);
        }

        let delay = self.config.switch_delay;
        if delay != 0.0 {
            self.delay_remaining = delay + self.config.delay_offset;
            self.event_fired = true;
            self.frame_delay = true;
            debug!("Delaying switch to {:?} by {:.3}s", target, self.delay_remaining);
            return Ok(true);
        }

        if !self.frame_delay {
            self.frame_delay = true;
            return Ok(false);
        }

        self.commit(bus)?;
        Ok(true)
    }

    /// Latest wins: a request queued behind an uncommitted one replaces it.
    fn supersede_with_queued(&mut self) {
        if self.next.is_none() {
            return;
        }
        if let Some(request) = self.queued.take() {
            debug!(
                "Switch to {:?} superseded by queued {:?}",
                self.next_scene(),
                request.target
            );
            self.next = Some(request);
            self.frame_delay = false;
            self.event_fired = false;
        }
    }

    /// Moves the queued request into the next slot, or goes idle.
    fn take_queued(&mut self) {
        match self.queued.take() {
            Some(request) if Some(request.target) == self.current && !self.reload_allowed => {
                debug!(
                    "Queued scene {:?} is the same as current, dropping it",
                    request.target
                );
                self.next = None;
            }
            Some(request) => {
                debug!("Taking queued scene {:?}", request.target);
                self.next = Some(request);
                self.frame_delay = false;
            }
            None => self.next = None,
        }
    }

    fn commit(&mut self, bus: &mut EventBus) -> Result<(), SwitchError> {
        let started = Instant::now();

        let result = if self.switch_cancelled {
            info!("Ignoring scene {:?} as it was cancelled", self.next_scene());
            self.take_queued();
            self.switch_cancelled = false;
            Ok(())
        } else {
            match self.next.take() {
                Some(request)
                    if Some(request.target) != self.current || self.reload_allowed =>
                {
                    self.install(request, bus)
                }
                other => {
                    warn!(
                        "Same next scene {:?} as current, skipping replacement",
                        other.as_ref().map(|request| request.target)
                    );
                    self.take_queued();
                    Ok(())
                }
            }
        };

        self.event_fired = false;
        self.reload_allowed = false;
        self.bootstrapping = false;

        debug!(
            "Replace scene ended in {:.3} ms",
            started.elapsed().as_secs_f64() * 1000.0
        );
        result
    }

    fn install(&mut self, request: PendingRequest<S>, bus: &mut EventBus) -> Result<(), SwitchError> {
        let PendingRequest { target, params } = request;
        info!("Going from {:?} to {:?}", self.current, target);

        self.detach_current();

        let scene = match self.factory.create_scene(target, &params) {
            Ok(scene) => scene,
            Err(source) => {
                error!("Could not create scene {:?}: {}", target, source);
                self.current = None;
                self.queued.clear();
                return Err(SwitchError::SceneCreation {
                    scene: format!("{:?}", target),
                    source,
                });
            }
        };

        if self.root.has_running_scene() {
            self.root.replace_scene(&*scene);
        } else {
            self.root.run_with_scene(&*scene);
        }

        self.scene = Some(scene);
        self.current = Some(target);
        self.take_queued();

        bus.publish(SceneSwitched { scene: target });
        Ok(())
    }

    /// Stops the installed scene and hands it to the release pool.
    fn detach_current(&mut self) {
        if let Some(current) = self.current {
            debug_assert!(
                self.scene.is_some(),
                "scene {:?} is current but has no scene handle",
                current
            );
            match self.scene.take() {
                Some(mut outgoing) => {
                    outgoing.stop();
                    self.release_pool.defer_release(outgoing);
                }
                None => error!("Scene {:?} is current but has no scene handle", current),
            }
        }

        if let Some(mut survivor) = self.scene.take() {
            warn!(
                "Scene {:?} should be detached already, stopping it anyway \
                 (probably caused by a cancelled switch)",
                survivor.key()
            );
            survivor.stop();
            self.release_pool.defer_release(survivor);
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
