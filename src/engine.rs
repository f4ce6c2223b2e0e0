//=========================================================================
// FenneX Scene Runtime
//
// Main entry point that drives the scene switcher frame by frame.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──run()──>  [Tick Loop]
//         │                          │
//         ├─ with_tps()              ├─ sender() → SwitchSender (any thread)
//         ├─ with_channel_capacity() ├─ start_with() → first scene
//         └─ with_switcher_config()  └─ step() per frame
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{info, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::SwitchError;
use crate::core::event_bus::EventBus;
use crate::core::platform_bridge::{EventCollector, PlatformEvent, SwitchSender, TickControl};
use crate::core::scene::{
    EngineRoot, SceneFactory, SceneKey, SceneParams, SceneSwitched, SceneSwitcher, SwitcherConfig,
};

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (switcher ticks per second in [`Engine::run`])
/// - **Channel capacity**: 128 platform events
/// - **Switcher**: [`SwitcherConfig::default`] (no switch delay)
///
/// # Examples
///
/// ```no_run
/// # use fennex_scenes::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum AppScene { Home }
/// # impl SceneKey for AppScene {}
/// # struct Screen;
/// # impl Scene<AppScene> for Screen {
/// #     fn key(&self) -> AppScene { AppScene::Home }
/// #     fn stop(&mut self) {}
/// # }
/// # struct Root;
/// # impl EngineRoot<AppScene> for Root {
/// #     fn has_running_scene(&self) -> bool { false }
/// #     fn run_with_scene(&mut self, _: &dyn Scene<AppScene>) {}
/// #     fn replace_scene(&mut self, _: &dyn Scene<AppScene>) {}
/// # }
/// let mut registry = SceneRegistry::new();
/// registry.register(AppScene::Home, |_| Ok(Screen));
///
/// let mut engine = EngineBuilder::<AppScene>::new()
///     .with_tps(30.0)
///     .with_switcher_config(SwitcherConfig::new().with_switch_delay(0.25))
///     .build(registry, Root);
///
/// engine.start_with(AppScene::Home, SceneParams::new())?;
/// engine.run()?;
/// # Ok::<(), SwitchError>(())
/// ```
pub struct EngineBuilder<S: SceneKey> {
    tps: f64,
    channel_capacity: usize,
    switcher_config: SwitcherConfig,
    _phantom: std::marker::PhantomData<S>,
}

impl<S: SceneKey> EngineBuilder<S> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            switcher_config: SwitcherConfig::default(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Sets the tick rate used by [`Engine::run`].
    ///
    /// # Panics
    ///
    /// Panics if `tps <= 0.0`.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0, "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the platform → switcher channel.
    ///
    /// Senders block while the channel is full.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    pub fn with_switcher_config(mut self, config: SwitcherConfig) -> Self {
        self.switcher_config = config;
        self
    }

    /// Builds the engine around the host's scene factory and engine root.
    pub fn build<F, R>(self, factory: F, root: R) -> Engine<S>
    where
        F: SceneFactory<S> + 'static,
        R: EngineRoot<S> + 'static,
    {
        info!(
            "Building scene runtime (TPS: {}, channel: {}, switch delay: {}s)",
            self.tps,
            self.channel_capacity,
            self.switcher_config.switch_delay()
        );

        let (tx, rx): (Sender<PlatformEvent<S>>, Receiver<PlatformEvent<S>>) =
            bounded(self.channel_capacity);

        Engine {
            switcher: SceneSwitcher::new(factory, root).with_config(self.switcher_config),
            bus: EventBus::new(),
            collector: EventCollector::new(rx),
            tx,
            listeners: Vec::new(),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl<S: SceneKey> Default for EngineBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

type SwitchListener<S> = Box<dyn FnMut(&SceneSwitched<S>)>;

/// Scene switching runtime.
///
/// Owns the [`SceneSwitcher`] and the [`EventBus`] and must stay on the
/// thread that drives the host engine. Other threads talk to it through
/// [`Engine::sender`].
///
/// Each [`Engine::step`]:
/// 1. Drops last frame's `SceneSwitched` events
/// 2. Publishes platform events on the bus
/// 3. Feeds plans and cancels to the switcher
/// 4. Ticks the switcher
/// 5. Notifies `on_scene_switched` listeners
pub struct Engine<S: SceneKey> {
    switcher: SceneSwitcher<S>,
    bus: EventBus,
    collector: EventCollector<S>,
    tx: Sender<PlatformEvent<S>>,
    listeners: Vec<SwitchListener<S>>,
    tps: f64,
    channel_capacity: usize,
}

impl<S: SceneKey> Engine<S> {
    //--- Initialization ---------------------------------------------------

    /// Gives mutable access to the switcher before the first frame, for
    /// installing the input lock, texture cache or release pool.
    ///
    /// ```no_run
    /// # use fennex_scenes::prelude::*;
    /// # fn configure<S: SceneKey>(engine: Engine<S>) -> Engine<S> {
    /// engine.init(|switcher| {
    ///     switcher.set_input_lock(NoInputLock);
    ///     switcher.set_texture_cache(NoTextureCache);
    /// })
    /// # }
    /// ```
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut SceneSwitcher<S>),
    {
        info!("Initializing scene switcher");
        init_fn(&mut self.switcher);
        self
    }

    /// Registers a listener for committed switches.
    pub fn on_scene_switched<F>(&mut self, listener: F)
    where
        F: FnMut(&SceneSwitched<S>) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Handle for planning switches from other threads.
    pub fn sender(&self) -> SwitchSender<S> {
        SwitchSender::new(self.tx.clone())
    }

    //--- Accessors --------------------------------------------------------

    pub fn switcher(&self) -> &SceneSwitcher<S> {
        &self.switcher
    }

    pub fn switcher_mut(&mut self) -> &mut SceneSwitcher<S> {
        &mut self.switcher
    }

    /// Events of the current frame. Publishing a [`crate::core::scene::PlanSceneSwitch`]
    /// here has the same effect as calling `request_switch` next frame.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn tps(&self) -> f64 {
        self.tps
    }

    pub fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }

    //--- Execution --------------------------------------------------------

    /// Installs the first scene of the process.
    ///
    /// # Errors
    ///
    /// See [`SceneSwitcher::init_with_scene`].
    pub fn start_with(&mut self, scene: S, params: SceneParams) -> Result<(), SwitchError> {
        info!("Starting with scene {:?}", scene);
        self.switcher.init_with_scene(Some(scene), params, &mut self.bus)?;
        self.notify_listeners();
        Ok(())
    }

    /// Runs one frame.
    ///
    /// # Errors
    ///
    /// Propagates scene creation failures from [`SceneSwitcher::tick`].
    pub fn step(&mut self, delta_time: f32) -> Result<TickControl, SwitchError> {
        //--- 1. Frame boundary --------------------------------------------
        self.bus.clear::<SceneSwitched<S>>();

        //--- 2. Platform events -------------------------------------------
        let control = self.collector.collect_frame(&mut self.bus);

        //--- 3. Requests --------------------------------------------------
        self.switcher.process_plans(&mut self.bus);

        //--- 4. State machine ---------------------------------------------
        self.switcher.tick(delta_time, &mut self.bus)?;

        //--- 5. Observers -------------------------------------------------
        self.notify_listeners();

        Ok(control)
    }

    /// Ticks at the configured rate on the calling thread until a
    /// shutdown is requested through a [`SwitchSender`].
    ///
    /// # Errors
    ///
    /// Stops at the first failed frame and returns its error.
    pub fn run(&mut self) -> Result<(), SwitchError> {
        let frame_duration = Duration::from_secs_f64(1.0 / self.tps);
        info!("Entering scene loop (TPS: {})", self.tps);

        let mut last_frame = Instant::now();
        loop {
            let frame_start = Instant::now();
            let delta_time = frame_start.duration_since(last_frame).as_secs_f32();
            last_frame = frame_start;

            if self.step(delta_time)? == TickControl::Exit {
                info!("Scene loop exiting");
                break;
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            } else {
                warn!("Frame overran budget: {:?} > {:?}", elapsed, frame_duration);
            }
        }

        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    fn notify_listeners(&mut self) {
        let events = self.bus.events::<SceneSwitched<S>>();
        for event in events {
            for listener in &mut self.listeners {
                listener(event);
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
