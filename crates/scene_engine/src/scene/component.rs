//! Component trait and update context
//!
//! A component is a unit of per-object behavior owned by exactly one
//! [`GameObject`](super::GameObject). The engine drives the lifecycle:
//! `init` runs exactly once, immediately at attach, before the first
//! `update`; `update` runs at most once per frame while the owner is alive
//! and active; `on_destroy` runs when the owner is reaped during traversal.
//!
//! Components never reach for global state. Everything they may touch — the
//! owning scene, their owner's key, the frame's services — arrives through
//! the [`UpdateContext`].

use std::any::Any;

use crate::foundation::math::{Mat4, Transform, Vec3};
use crate::scene::{ComponentTypeId, GameObject, GameObjectKey, Scene};
use crate::services::EngineServices;

/// Per-hook view of the world handed to every component call
///
/// Borrows the scene and the frame's services for the duration of one hook
/// invocation. The owner key is guaranteed live for that duration. During
/// `update` the component's own slot is swapped out, so typed lookups on
/// the owner see every sibling but never the component itself.
pub struct UpdateContext<'a> {
    /// Key of the component's owning object
    pub owner: GameObjectKey,

    /// The scene being walked
    pub scene: &'a mut Scene,

    /// External collaborators for this frame
    pub services: &'a mut EngineServices,
}

impl UpdateContext<'_> {
    /// Borrow the owning object
    ///
    /// The owner is live for the duration of any component hook; reaping
    /// only happens at the owning container's own traversal point.
    pub fn owner(&self) -> &GameObject {
        self.scene.object(self.owner)
    }

    /// Mutably borrow the owning object
    pub fn owner_mut(&mut self) -> &mut GameObject {
        self.scene.object_mut(self.owner)
    }

    /// Local transform channels of the owner
    pub fn owner_transform(&self) -> &Transform {
        &self.owner().transform
    }

    /// World transform of the owner, composed root-to-owner on demand
    pub fn owner_world_transform(&self) -> Mat4 {
        self.scene.world_transform(self.owner)
    }

    /// World position of the owner
    pub fn owner_world_position(&self) -> Vec3 {
        self.scene.world_position(self.owner)
    }
}

/// A polymorphic unit of per-object behavior
pub trait Component: Any {
    /// Engine-assigned identity of this component's concrete type
    ///
    /// Implement via [`impl_component!`](crate::impl_component).
    fn component_type(&self) -> ComponentTypeId;

    /// Runs exactly once, immediately after attach
    ///
    /// The owner's transform and name are already set. Components attached
    /// to the same owner later are not yet present; sibling lookups belong
    /// in `update` or host code, not here.
    fn init(&mut self, _ctx: &mut UpdateContext<'_>) {}

    /// Apply deserialized properties before attach
    ///
    /// The property grammar is the loader's concern; implementations
    /// deserialize their own typed property struct from the value and keep
    /// defaults for anything absent.
    fn load_properties(&mut self, _props: &ron::Value) {}

    /// Runs once per frame while the owner is alive and active
    fn update(&mut self, dt: f32, ctx: &mut UpdateContext<'_>);

    /// Runs when the owner is reaped during traversal
    ///
    /// The owner still exists for the duration of this call. Not invoked by
    /// `Scene::clear`, which drops the whole forest without a walk.
    fn on_destroy(&mut self, _ctx: &mut UpdateContext<'_>) {}

    /// Upcast for typed lookup
    fn as_any(&self) -> &dyn Any;

    /// Upcast for typed mutable lookup
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Deserialize a typed property struct from a loader property bag
///
/// `Unit` means no properties were given and yields `None` silently. A bag
/// that fails to deserialize is logged and yields `None`, so the component
/// keeps its defaults instead of half-applying bad data.
pub fn parse_props<T: serde::de::DeserializeOwned>(props: &ron::Value) -> Option<T> {
    if matches!(props, ron::Value::Unit) {
        return None;
    }
    match props.clone().into_rust::<T>() {
        Ok(value) => Some(value),
        Err(error) => {
            log::warn!(
                "rejecting properties for {}: {error}",
                std::any::type_name::<T>()
            );
            None
        }
    }
}

/// Generate the boilerplate trait items for a component type
///
/// Expands inside an `impl Component for T` block:
///
/// ```
/// use scene_engine::impl_component;
/// use scene_engine::scene::{Component, UpdateContext};
///
/// #[derive(Default)]
/// struct Blinker {
///     elapsed: f32,
/// }
///
/// impl Component for Blinker {
///     impl_component!(Blinker);
///
///     fn update(&mut self, dt: f32, _ctx: &mut UpdateContext<'_>) {
///         self.elapsed += dt;
///     }
/// }
/// ```
#[macro_export]
macro_rules! impl_component {
    ($ty:ty) => {
        fn component_type(&self) -> $crate::scene::ComponentTypeId {
            $crate::scene::ComponentTypeId::of::<$ty>()
        }

        fn as_any(&self) -> &dyn ::std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
            self
        }
    };
}
