//! Scene graph node
//!
//! A `GameObject` owns its components and the keys of its children. Its
//! identity is its generational [`GameObjectKey`]; two equal keys are the
//! same object, and a key outliving its object resolves to `None` instead
//! of dangling.

use slotmap::new_key_type;

use crate::foundation::math::{Mat4, Quat, Transform, Vec3};
use crate::scene::{Component, ComponentTypeId};

new_key_type! {
    /// Generational identity of a [`GameObject`] within its [`Scene`](super::Scene)
    pub struct GameObjectKey;
}

/// A tree node: local transform, lifecycle flags, owned children and components
///
/// Constructed only through `Scene::create_object`; a node is always in
/// exactly one ownership slot (the scene's root list or one parent's child
/// list) once placed.
pub struct GameObject {
    name: String,

    /// Local transform channels, mutable independently of each other
    pub transform: Transform,

    active: bool,
    alive: bool,

    pub(super) parent: Option<GameObjectKey>,
    pub(super) children: Vec<GameObjectKey>,
    pub(super) components: Vec<Box<dyn Component>>,
}

impl GameObject {
    pub(super) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            active: true,
            alive: true,
            parent: None,
            children: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Object name; not required to be unique
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the object
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Key of the owning parent, `None` for root objects
    pub fn parent(&self) -> Option<GameObjectKey> {
        self.parent
    }

    /// Keys of the owned children, in ownership order
    pub fn children(&self) -> &[GameObjectKey] {
        &self.children
    }

    /// Whether this object (and its whole subtree) is simulated
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Toggle simulation; an inactive object stays in the tree but its
    /// subtree is skipped entirely during the frame walk
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// False once marked for destruction
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Mark this object dead
    ///
    /// The only destruction primitive: no structural change happens here.
    /// The owning container erases the object — and with it the whole owned
    /// subtree — at its own next traversal point. There is no way back.
    pub fn mark_for_destroy(&mut self) {
        self.alive = false;
    }

    /// Local position channel
    pub fn position(&self) -> &Vec3 {
        &self.transform.position
    }

    /// Set the local position channel
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.position = position;
    }

    /// Local rotation channel
    pub fn rotation(&self) -> &Quat {
        &self.transform.rotation
    }

    /// Set the local rotation channel
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.transform.rotation = rotation;
    }

    /// Local scale channel
    pub fn scale(&self) -> &Vec3 {
        &self.transform.scale
    }

    /// Set the local scale channel
    pub fn set_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    /// Local transform matrix, composed translate ∘ rotate ∘ scale
    pub fn local_transform(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// First attached component of type `T`, if any
    ///
    /// Linear scan over the attachment-ordered component list; objects
    /// carry a handful of components, so no per-type index is kept. A miss
    /// is a normal "not found", not an error.
    pub fn component<T: Component>(&self) -> Option<&T> {
        let target = ComponentTypeId::of::<T>();
        self.components
            .iter()
            .find(|component| component.component_type() == target)
            .and_then(|component| component.as_any().downcast_ref::<T>())
    }

    /// Mutable variant of [`Self::component`]
    pub fn component_mut<T: Component>(&mut self) -> Option<&mut T> {
        let target = ComponentTypeId::of::<T>();
        self.components
            .iter_mut()
            .find(|component| component.component_type() == target)
            .and_then(|component| component.as_any_mut().downcast_mut::<T>())
    }

    /// Whether a component of type `T` is attached
    pub fn has_component<T: Component>(&self) -> bool {
        self.component::<T>().is_some()
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }
}
