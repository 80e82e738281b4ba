//! Scene: ownership, traversal, reparenting, and lookup
//!
//! The scene owns every node in one generational arena and tracks the root
//! list. Structure is expressed with keys: a node's children are keys, its
//! parent is a key, and any key can go stale safely. Exactly one ownership
//! slot holds each placed node — the root list or one parent's child list —
//! and `set_parent` is the single authority that moves nodes between slots.
//!
//! The frame walk is uniform: the scene sweeps its root list exactly the
//! way every node sweeps its child list — live entries update, dead entries
//! are erased together with their whole subtree. Destruction therefore
//! happens only at the owning container's own traversal point, never while
//! a sibling iteration is in flight.

use slotmap::SlotMap;

use crate::foundation::math::{translation_of, Mat4, Quat, Vec3};
use crate::render::{CameraData, LightData};
use crate::scene::components::{CameraComponent, LightComponent};
use crate::scene::factory::ObjectFactory;
use crate::scene::{Component, GameObject, GameObjectKey, UpdateContext};
use crate::services::EngineServices;

/// Placeholder occupying a component's slot while that component updates.
/// Its type id matches no real component, so mid-update lookups skip it.
struct DetachedSlot;

impl Component for DetachedSlot {
    crate::impl_component!(DetachedSlot);

    fn update(&mut self, _dt: f32, _ctx: &mut UpdateContext<'_>) {}
}

/// The forest of game objects and the machinery that mutates it
#[derive(Default)]
pub struct Scene {
    nodes: SlotMap<GameObjectKey, GameObject>,
    roots: Vec<GameObjectKey>,
    main_camera: Option<GameObjectKey>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Creation and placement
    // ------------------------------------------------------------------

    /// Create a plain object and place it under `parent` (or at the root)
    ///
    /// The returned key is an observation handle; ownership stays with the
    /// scene. A stale `parent` falls back to root placement with a warning.
    pub fn create_object(
        &mut self,
        name: impl Into<String>,
        parent: Option<GameObjectKey>,
    ) -> GameObjectKey {
        let key = self.nodes.insert(GameObject::new(name));
        if !self.set_parent(key, parent) {
            log::warn!(
                "create_object: parent of '{}' is stale, placing at root",
                self.nodes[key].name()
            );
            let placed = self.set_parent(key, None);
            debug_assert!(placed);
        }
        key
    }

    /// Create an object of a registered named type
    ///
    /// The data-driven entry point: looks `type_name` up in the factory and
    /// runs its spawn recipe. Returns `None` for unregistered names; the
    /// caller decides whether to skip or log.
    pub fn create_object_of(
        &mut self,
        factory: &ObjectFactory,
        type_name: &str,
        name: &str,
        parent: Option<GameObjectKey>,
        services: &mut EngineServices,
    ) -> Option<GameObjectKey> {
        factory.spawn(self, type_name, name, parent, services)
    }

    /// Move `node` into a new ownership slot
    ///
    /// `None` re-roots the node (always valid). A `Some` target is rejected
    /// when it is the node itself or one of its descendants — the only
    /// failure mode — in which case the tree is left untouched and `false`
    /// is returned. On success the move is complete before returning: old
    /// slot erased, new slot filled, back-reference updated.
    pub fn set_parent(&mut self, node: GameObjectKey, new_parent: Option<GameObjectKey>) -> bool {
        if !self.nodes.contains_key(node) {
            return false;
        }
        if let Some(parent_key) = new_parent {
            if !self.nodes.contains_key(parent_key) {
                return false;
            }
            // Walk upward from the requested parent; meeting `node` on the
            // way to the root means the move would create a cycle.
            let mut cursor = Some(parent_key);
            while let Some(current) = cursor {
                if current == node {
                    return false;
                }
                cursor = self.nodes[current].parent;
            }
        }

        // Erase from the current slot. A freshly spawned node has no parent
        // and is not yet in the root list; both removals are then no-ops.
        match self.nodes[node].parent {
            Some(old_parent) => {
                let children = &mut self.nodes[old_parent].children;
                if let Some(index) = children.iter().position(|&child| child == node) {
                    children.remove(index);
                }
            }
            None => {
                if let Some(index) = self.roots.iter().position(|&root| root == node) {
                    self.roots.remove(index);
                }
            }
        }

        match new_parent {
            Some(parent_key) => {
                self.nodes[parent_key].children.push(node);
                self.nodes[node].parent = Some(parent_key);
            }
            None => {
                self.roots.push(node);
                self.nodes[node].parent = None;
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    /// Borrow an object; `None` for keys whose object has been destroyed
    pub fn get(&self, key: GameObjectKey) -> Option<&GameObject> {
        self.nodes.get(key)
    }

    /// Mutable variant of [`Self::get`]
    pub fn get_mut(&mut self, key: GameObjectKey) -> Option<&mut GameObject> {
        self.nodes.get_mut(key)
    }

    /// Borrow an object known to be live
    ///
    /// Panics on a stale key; use [`Self::get`] when liveness is in doubt.
    pub fn object(&self, key: GameObjectKey) -> &GameObject {
        &self.nodes[key]
    }

    /// Mutable variant of [`Self::object`]
    pub fn object_mut(&mut self, key: GameObjectKey) -> &mut GameObject {
        &mut self.nodes[key]
    }

    /// Keys of the root objects, in ownership order
    pub fn roots(&self) -> &[GameObjectKey] {
        &self.roots
    }

    /// Number of objects in the arena, including marked-dead ones awaiting
    /// reap at their owning container's next sweep
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the scene holds no objects
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop the whole forest at once
    ///
    /// Bypasses the mark-and-reap path: no `on_destroy` hooks run.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.main_camera = None;
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    /// Attach a component to `owner`, transferring ownership
    ///
    /// Runs the component's `init` with the owner's transform and name
    /// already in place, then appends it to the owner's attachment-ordered
    /// list. A stale owner makes this a warned no-op (the component is
    /// dropped) and returns `false`.
    pub fn add_component(
        &mut self,
        owner: GameObjectKey,
        mut component: Box<dyn Component>,
        services: &mut EngineServices,
    ) -> bool {
        if !self.nodes.contains_key(owner) {
            log::warn!("add_component: owner is stale, dropping component");
            return false;
        }
        {
            let mut ctx = UpdateContext {
                owner,
                scene: self,
                services,
            };
            component.init(&mut ctx);
        }
        self.nodes[owner].components.push(component);
        true
    }

    /// First component of type `T` on `owner`, if the object is live and
    /// carries one
    pub fn component<T: Component>(&self, owner: GameObjectKey) -> Option<&T> {
        self.get(owner)?.component::<T>()
    }

    /// Mutable variant of [`Self::component`]
    pub fn component_mut<T: Component>(&mut self, owner: GameObjectKey) -> Option<&mut T> {
        self.get_mut(owner)?.component_mut::<T>()
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// World transform: fold of local transforms from root to `key`
    ///
    /// Recomputed on demand, never cached. Stale keys yield identity.
    pub fn world_transform(&self, key: GameObjectKey) -> Mat4 {
        let Some(node) = self.nodes.get(key) else {
            return Mat4::identity();
        };
        match node.parent {
            Some(parent) => self.world_transform(parent) * node.local_transform(),
            None => node.local_transform(),
        }
    }

    /// World position of `key` (translation of its world transform)
    pub fn world_position(&self, key: GameObjectKey) -> Vec3 {
        translation_of(&self.world_transform(key))
    }

    /// World rotation: fold of rotation channels from root to `key`
    pub fn world_rotation(&self, key: GameObjectKey) -> Quat {
        let Some(node) = self.nodes.get(key) else {
            return Quat::identity();
        };
        match node.parent {
            Some(parent) => self.world_rotation(parent) * node.transform.rotation,
            None => node.transform.rotation,
        }
    }

    /// Set the local position channel so the object lands at `position` in
    /// world space
    pub fn set_world_position(&mut self, key: GameObjectKey, position: Vec3) {
        let Some(parent) = self.nodes.get(key).and_then(GameObject::parent) else {
            if let Some(node) = self.nodes.get_mut(key) {
                node.transform.position = position;
            }
            return;
        };
        let local = self
            .world_transform(parent)
            .try_inverse()
            .unwrap_or_else(Mat4::identity)
            .transform_point(&position.into());
        self.nodes[key].transform.position = local.coords;
    }

    /// Set the local rotation channel so the object has `rotation` in world
    /// space
    pub fn set_world_rotation(&mut self, key: GameObjectKey, rotation: Quat) {
        let Some(parent) = self.nodes.get(key).and_then(GameObject::parent) else {
            if let Some(node) = self.nodes.get_mut(key) {
                node.transform.rotation = rotation;
            }
            return;
        };
        let parent_rotation = self.world_rotation(parent);
        self.nodes[key].transform.rotation = parent_rotation.inverse() * rotation;
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Depth-first search for `name` in the subtree rooted at `root`,
    /// including `root` itself; first match wins
    pub fn find_child_by_name(&self, root: GameObjectKey, name: &str) -> Option<GameObjectKey> {
        let node = self.nodes.get(root)?;
        if node.name() == name {
            return Some(root);
        }
        node.children
            .iter()
            .find_map(|&child| self.find_child_by_name(child, name))
    }

    /// Depth-first search for `name` across the whole forest
    pub fn find_by_name(&self, name: &str) -> Option<GameObjectKey> {
        self.roots
            .iter()
            .find_map(|&root| self.find_child_by_name(root, name))
    }

    /// Gather every light in the active part of the forest
    ///
    /// Read-only traversal with no structural side effects; safe to run
    /// anytime between frames. Inactive subtrees are skipped, matching the
    /// frame walk's notion of "not simulated".
    pub fn collect_lights(&self) -> Vec<LightData> {
        let mut lights = Vec::new();
        for &root in &self.roots {
            self.collect_lights_recursive(root, &mut lights);
        }
        lights
    }

    fn collect_lights_recursive(&self, key: GameObjectKey, out: &mut Vec<LightData>) {
        let Some(node) = self.nodes.get(key) else {
            return;
        };
        if !node.is_active() {
            return;
        }
        if let Some(light) = node.component::<LightComponent>() {
            out.push(LightData {
                color: *light.color(),
                position: self.world_position(key),
            });
        }
        for &child in &node.children {
            self.collect_lights_recursive(child, out);
        }
    }

    // ------------------------------------------------------------------
    // Main camera
    // ------------------------------------------------------------------

    /// Remember `camera` as the main camera (non-owning)
    pub fn set_main_camera(&mut self, camera: Option<GameObjectKey>) {
        self.main_camera = camera;
    }

    /// The main camera, validated against the arena
    ///
    /// Returns `None` once the referenced object has been destroyed; the
    /// generational key makes the stale reference observable instead of
    /// dangling.
    pub fn main_camera(&self) -> Option<GameObjectKey> {
        self.main_camera.filter(|&key| self.nodes.contains_key(key))
    }

    /// View/projection data from the main camera's [`CameraComponent`]
    ///
    /// `None` when there is no live main camera or it carries no camera
    /// component.
    pub fn camera_data(&self, aspect: f32) -> Option<CameraData> {
        let key = self.main_camera()?;
        let camera = self.component::<CameraComponent>(key)?;
        let world = self.world_transform(key);
        Some(CameraData {
            view_matrix: camera.view_matrix(&world),
            projection_matrix: camera.projection_matrix(aspect),
            position: self.world_position(key),
        })
    }

    // ------------------------------------------------------------------
    // Frame walk
    // ------------------------------------------------------------------

    /// Advance the whole forest by `dt` seconds
    ///
    /// Sweeps the root list: live roots update, dead roots are erased with
    /// their entire subtree. One O(n) pass interleaves simulation and
    /// garbage collection; there is no separate reap phase. Single-threaded
    /// by contract — no component may trigger a concurrent walk, and
    /// reparenting a node inside a subtree currently being walked is
    /// undefined.
    pub fn update(&mut self, dt: f32, services: &mut EngineServices) {
        let mut index = 0;
        while index < self.roots.len() {
            let root = self.roots[index];
            if self.nodes.get(root).is_some_and(GameObject::is_alive) {
                self.update_object(root, dt, services);
                index += 1;
            } else {
                self.roots.remove(index);
                self.despawn_subtree(root, services);
            }
        }
    }

    /// Update one object: components in attachment order, then the child
    /// sweep. Inactive objects short-circuit — the whole subtree is neither
    /// simulated nor reaped until the object is reactivated.
    fn update_object(&mut self, key: GameObjectKey, dt: f32, services: &mut EngineServices) {
        {
            let Some(node) = self.nodes.get(key) else {
                return;
            };
            if !node.is_active() {
                return;
            }

            // Components attached during the walk land after this snapshot
            // and first update next frame. There is no single-component
            // removal, so the indices below stay valid.
            let count = node.components.len();
            for index in 0..count {
                // Swap only this slot out so the component can borrow the
                // scene through its context; its siblings stay visible to
                // typed lookups for the duration of the call.
                let Some(mut component) = self.nodes.get_mut(key).map(|node| {
                    std::mem::replace(&mut node.components[index], Box::new(DetachedSlot))
                }) else {
                    break;
                };
                {
                    let mut ctx = UpdateContext {
                        owner: key,
                        scene: self,
                        services,
                    };
                    component.update(dt, &mut ctx);
                }
                if let Some(node) = self.nodes.get_mut(key) {
                    node.components[index] = component;
                }
            }
        }

        let mut index = 0;
        loop {
            let Some(&child) = self.nodes.get(key).and_then(|node| node.children.get(index))
            else {
                break;
            };
            if self.nodes.get(child).is_some_and(GameObject::is_alive) {
                self.update_object(child, dt, services);
                index += 1;
            } else {
                self.nodes[key].children.remove(index);
                self.despawn_subtree(child, services);
            }
        }
    }

    /// Destroy `key` and everything it owns, invoking `on_destroy` hooks
    /// top-down. Only reachable from the traversal sweep, which is the
    /// single authorized point of destruction.
    fn despawn_subtree(&mut self, key: GameObjectKey, services: &mut EngineServices) {
        let Some(mut components) = self
            .nodes
            .get_mut(key)
            .map(|node| std::mem::take(&mut node.components))
        else {
            return;
        };
        for component in &mut components {
            let mut ctx = UpdateContext {
                owner: key,
                scene: self,
                services,
            };
            component.on_destroy(&mut ctx);
        }
        drop(components);

        if let Some(node) = self.nodes.remove(key) {
            for child in node.children {
                self.despawn_subtree(child, services);
            }
        }
    }
}
