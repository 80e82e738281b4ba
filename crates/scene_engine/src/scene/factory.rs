//! Name-keyed creation registries for data-driven construction
//!
//! Deserializers know types only as strings. These registries map a
//! human-readable name to a creation closure, populated by explicit
//! registration calls before any loading happens — no static-initialization
//! tricks. Unknown names produce `None`; callers treat that as a
//! recoverable per-entry failure.

use std::collections::HashMap;

use crate::scene::{Component, GameObjectKey, Scene};
use crate::services::EngineServices;

type ComponentCreator = Box<dyn Fn() -> Box<dyn Component> + Send + Sync>;

/// Registry of named component constructors
#[derive(Default)]
pub struct ComponentFactory {
    creators: HashMap<String, ComponentCreator>,
}

impl ComponentFactory {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` under `name`, creating instances via `Default`
    pub fn register<T>(&mut self, name: impl Into<String>)
    where
        T: Component + Default + 'static,
    {
        self.register_with(name, || Box::<T>::default());
    }

    /// Register a custom creation closure under `name`
    pub fn register_with<F>(&mut self, name: impl Into<String>, creator: F)
    where
        F: Fn() -> Box<dyn Component> + Send + Sync + 'static,
    {
        let name = name.into();
        if self.creators.insert(name.clone(), Box::new(creator)).is_some() {
            log::warn!("component type '{name}' registered twice, keeping the newer creator");
        }
    }

    /// Create a fresh, ownerless component; `None` for unregistered names
    pub fn create(&self, name: &str) -> Option<Box<dyn Component>> {
        self.creators.get(name).map(|creator| creator())
    }

    /// Whether `name` has been registered
    pub fn contains(&self, name: &str) -> bool {
        self.creators.contains_key(name)
    }
}

/// Recipe that spawns an object of a named type into a scene
///
/// Receives the scene, the instance name, the parent slot, and the frame
/// services (so attached components can run `init`), and returns the key of
/// the spawned object.
pub type SpawnRecipe =
    Box<dyn Fn(&mut Scene, &str, Option<GameObjectKey>, &mut EngineServices) -> GameObjectKey + Send + Sync>;

/// Registry of named object spawn recipes
///
/// Object "subtypes" are recipes: a recipe creates a node and attaches the
/// components that give the type its behavior.
#[derive(Default)]
pub struct ObjectFactory {
    recipes: HashMap<String, SpawnRecipe>,
}

/// Type name under which the plain object recipe is registered
pub const PLAIN_OBJECT_TYPE: &str = "GameObject";

impl ObjectFactory {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the plain `"GameObject"` recipe pre-registered
    pub fn with_defaults() -> Self {
        let mut factory = Self::new();
        factory.register(PLAIN_OBJECT_TYPE, |scene, name, parent, _services| {
            scene.create_object(name, parent)
        });
        factory
    }

    /// Register a spawn recipe under `name`
    pub fn register<F>(&mut self, name: impl Into<String>, recipe: F)
    where
        F: Fn(&mut Scene, &str, Option<GameObjectKey>, &mut EngineServices) -> GameObjectKey
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        if self.recipes.insert(name.clone(), Box::new(recipe)).is_some() {
            log::warn!("object type '{name}' registered twice, keeping the newer recipe");
        }
    }

    /// Spawn an object of type `type_name`; `None` for unregistered names
    pub fn spawn(
        &self,
        scene: &mut Scene,
        type_name: &str,
        name: &str,
        parent: Option<GameObjectKey>,
        services: &mut EngineServices,
    ) -> Option<GameObjectKey> {
        let recipe = self.recipes.get(type_name)?;
        Some(recipe(scene, name, parent, services))
    }

    /// Whether `name` has been registered
    pub fn contains(&self, name: &str) -> bool {
        self.recipes.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::components::LightComponent;

    #[test]
    fn creating_registered_component_yields_fresh_instances() {
        let mut factory = ComponentFactory::new();
        factory.register::<LightComponent>("Light");

        let first = factory.create("Light").expect("registered");
        let second = factory.create("Light").expect("registered");
        // Distinct heap instances, same engine type identity.
        let first_addr = first.as_ref() as *const dyn Component as *const u8;
        let second_addr = second.as_ref() as *const dyn Component as *const u8;
        assert_ne!(first_addr, second_addr);
        assert_eq!(first.component_type(), second.component_type());
    }

    #[test]
    fn unknown_component_name_is_a_soft_failure() {
        let factory = ComponentFactory::new();
        assert!(factory.create("NoSuchComponent").is_none());
    }

    #[test]
    fn unknown_object_type_spawns_nothing() {
        let factory = ObjectFactory::with_defaults();
        let mut scene = Scene::new();
        let mut services = EngineServices::new();
        let key = factory.spawn(&mut scene, "NoSuchType", "thing", None, &mut services);
        assert!(key.is_none());
        assert!(scene.is_empty());
    }

    #[test]
    fn plain_object_recipe_places_at_requested_slot() {
        let factory = ObjectFactory::with_defaults();
        let mut scene = Scene::new();
        let mut services = EngineServices::new();

        let parent = scene.create_object("parent", None);
        let child = factory
            .spawn(&mut scene, PLAIN_OBJECT_TYPE, "child", Some(parent), &mut services)
            .expect("registered");
        assert_eq!(scene.object(child).parent(), Some(parent));
        assert_eq!(scene.object(parent).children(), &[child]);
    }
}
