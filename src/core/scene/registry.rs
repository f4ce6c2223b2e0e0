//=========================================================================
// Scene Registry
//=========================================================================
//
// Scene construction, keyed by scene identifier.
//
// Constructors are registered once and invoked on every commit, so each
// switch (including a forced reload) gets a freshly built scene.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::{Scene, SceneKey, SceneParams};
use crate::core::error::SceneError;

//=== SceneFactory ========================================================

/// Builds scene instances for the switcher.
///
/// Failures must be reported; the switcher never substitutes a fallback
/// scene.
pub trait SceneFactory<S: SceneKey> {
    fn create_scene(
        &mut self,
        key: S,
        params: &SceneParams,
    ) -> Result<Box<dyn Scene<S>>, SceneError>;
}

//=== SceneRegistry =======================================================

type Constructor<S> = Box<dyn FnMut(&SceneParams) -> Result<Box<dyn Scene<S>>, SceneError>>;

/// [`SceneFactory`] backed by per-key constructor closures.
///
/// ```rust
/// # use fennex_scenes::prelude::*;
/// # #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// # enum AppScene { Home }
/// # impl SceneKey for AppScene {}
/// struct HomeScene;
///
/// impl Scene<AppScene> for HomeScene {
///     fn key(&self) -> AppScene { AppScene::Home }
///     fn stop(&mut self) {}
/// }
///
/// let mut registry = SceneRegistry::new();
/// registry.register(AppScene::Home, |_params| Ok(HomeScene));
/// assert!(registry.is_registered(AppScene::Home));
/// ```
pub struct SceneRegistry<S: SceneKey> {
    constructors: HashMap<S, Constructor<S>>,
}

impl<S: SceneKey> SceneRegistry<S> {
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers the constructor for `key`, replacing any previous one.
    pub fn register<T, F>(&mut self, key: S, mut constructor: F)
    where
        T: Scene<S> + 'static,
        F: FnMut(&SceneParams) -> Result<T, SceneError> + 'static,
    {
        let boxed: Constructor<S> = Box::new(move |params| {
            constructor(params).map(|scene| Box::new(scene) as Box<dyn Scene<S>>)
        });

        if self.constructors.insert(key, boxed).is_some() {
            warn!("Scene {:?} was already registered and has been replaced", key);
        } else {
            debug!("Registered scene {:?}", key);
        }
    }

    pub fn is_registered(&self, key: S) -> bool {
        self.constructors.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl<S: SceneKey> Default for SceneRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SceneKey> SceneFactory<S> for SceneRegistry<S> {
    fn create_scene(
        &mut self,
        key: S,
        params: &SceneParams,
    ) -> Result<Box<dyn Scene<S>>, SceneError> {
        let constructor = self
            .constructors
            .get_mut(&key)
            .ok_or_else(|| SceneError::Unregistered(format!("{:?}", key)))?;

        constructor(params)
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
    enum TestScene {
        A,
        B,
    }

    impl SceneKey for TestScene {}

    struct Built {
        key: TestScene,
        level: Option<i64>,
    }

    impl Scene<TestScene> for Built {
        fn key(&self) -> TestScene {
            self.key
        }

        fn stop(&mut self) {}
    }

    #[test]
    fn constructor_receives_params() {
        let mut registry = SceneRegistry::new();
        registry.register(TestScene::A, |params| {
            Ok(Built {
                key: TestScene::A,
                level: params.get_int("Level"),
            })
        });

        let params = SceneParams::new().with("Level", 5);
        let scene = registry.create_scene(TestScene::A, &params);
        assert!(matches!(scene, Ok(ref s) if s.key() == TestScene::A));
    }

    #[test]
    fn constructor_sees_each_request_params() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = seen.clone();

        let mut registry = SceneRegistry::new();
        registry.register(TestScene::A, move |params| {
            let scene = Built {
                key: TestScene::A,
                level: params.get_int("Level"),
            };
            log.borrow_mut().push(scene.level);
            Ok(scene)
        });

        let _ = registry.create_scene(TestScene::A, &SceneParams::new().with("Level", 1));
        let _ = registry.create_scene(TestScene::A, &SceneParams::new());

        assert_eq!(*seen.borrow(), vec![Some(1), None]);
    }

    #[test]
    fn unregistered_scene_is_an_error() {
        let mut registry: SceneRegistry<TestScene> = SceneRegistry::new();
        let result = registry.create_scene(TestScene::B, &SceneParams::new());
        assert!(matches!(result, Err(SceneError::Unregistered(ref name)) if name == "B"));
    }

    #[test]
    fn constructor_errors_propagate() {
        let mut registry: SceneRegistry<TestScene> = SceneRegistry::new();
        registry.register::<Built, _>(TestScene::A, |_| {
            Err(SceneError::Construction("missing layout".to_string()))
        });

        let result = registry.create_scene(TestScene::A, &SceneParams::new());
        assert!(matches!(result, Err(SceneError::Construction(_))));
    }

    #[test]
    fn re_registering_replaces_constructor() {
        let mut registry = SceneRegistry::new();
        registry.register(TestScene::A, |_| Ok(Built { key: TestScene::A, level: None }));
        registry.register(TestScene::A, |_| Ok(Built { key: TestScene::B, level: None }));

        assert_eq!(registry.len(), 1);
        let scene = registry.create_scene(TestScene::A, &SceneParams::new());
        assert!(matches!(scene, Ok(ref s) if s.key() == TestScene::B));
    }
}
