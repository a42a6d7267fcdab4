//! The seam between the core and a frame host (terminal, browser, native window).
//!
//! A host owns the framebuffer and the event loop. Each tick it forwards input as
//! [`InputEvent`]s, calls [`Scene::update`] and then [`Scene::draw`]. Hosts that
//! drive several scenes keep them in a [`SceneRegistry`].
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use log::debug;

use crate::canvas::Canvas2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Input forwarded by a host, in surface pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseMove { x: f32, y: f32 },
    MouseDown { button: MouseButton, x: f32, y: f32 },
    MouseUp { button: MouseButton, x: f32, y: f32 },
    WheelUp,
    WheelDown,
    KeyDown(char),
    KeyUp(char),
    /// The host's surface changed size
    Resize { width: u32, height: u32 },
}

/// Callbacks a host drives once per frame.
///
/// `update` and `draw` are never called reentrantly or concurrently.
pub trait Scene {
    /// Advance by `dt` seconds (`dt >= 0`)
    fn update(&mut self, dt: f32);

    fn draw(&mut self, canvas: &mut dyn Canvas2D);

    fn handle_input(&mut self, event: &InputEvent);
}

impl<S: Scene + ?Sized> Scene for Box<S> {
    fn update(&mut self, dt: f32) {
        (**self).update(dt);
    }

    fn draw(&mut self, canvas: &mut dyn Canvas2D) {
        (**self).draw(canvas);
    }

    fn handle_input(&mut self, event: &InputEvent) {
        (**self).handle_input(event);
    }
}

/// Host-owned map from a window/surface handle to its scene
#[derive(Debug)]
pub struct SceneRegistry<K, S> {
    scenes: HashMap<K, S>,
}

impl<K: Eq + Hash + Debug, S: Scene> SceneRegistry<K, S> {
    pub fn new() -> Self {
        Self {
            scenes: HashMap::new(),
        }
    }

    /// Register `scene` under `handle`, returning any scene it replaces.
    pub fn register(&mut self, handle: K, scene: S) -> Option<S> {
        debug!("registering scene {handle:?}");
        self.scenes.insert(handle, scene)
    }

    pub fn unregister(&mut self, handle: &K) -> Option<S> {
        let removed = self.scenes.remove(handle);
        if removed.is_some() {
            debug!("unregistered scene {handle:?}");
        }
        removed
    }

    pub fn get_mut(&mut self, handle: &K) -> Option<&mut S> {
        self.scenes.get_mut(handle)
    }

    pub fn contains(&self, handle: &K) -> bool {
        self.scenes.contains_key(handle)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Route an event to one scene; `false` if the handle is unknown.
    pub fn dispatch(&mut self, handle: &K, event: &InputEvent) -> bool {
        match self.scenes.get_mut(handle) {
            Some(scene) => {
                scene.handle_input(event);
                true
            }
            None => false,
        }
    }

    /// Timer tick for every registered scene
    pub fn tick_all(&mut self, dt: f32) {
        for scene in self.scenes.values_mut() {
            scene.update(dt);
        }
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut S)> {
        self.scenes.iter_mut()
    }
}

impl<K: Eq + Hash + Debug, S: Scene> Default for SceneRegistry<K, S> {
    fn default() -> Self {
        Self::new()
    }
}
