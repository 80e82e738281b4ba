//! Scene graph and component system
//!
//! A [`Scene`] owns a forest of [`GameObject`] nodes in a generational
//! arena; nodes refer to each other by [`GameObjectKey`]. Behavior attaches
//! to nodes as boxed [`Component`] values driven by the scene's frame walk,
//! and data-driven construction goes through the factories and the RON
//! [`SceneLoader`].

mod component;
mod factory;
mod game_object;
mod loader;
#[allow(clippy::module_inception)]
mod scene;
mod type_registry;

pub mod components;

pub use component::{parse_props, Component, UpdateContext};
pub use factory::{ComponentFactory, ObjectFactory, SpawnRecipe, PLAIN_OBJECT_TYPE};
pub use game_object::{GameObject, GameObjectKey};
pub use loader::{SceneLoadError, SceneLoader};
pub use scene::Scene;
pub use type_registry::ComponentTypeId;

#[cfg(test)]
mod tests;
