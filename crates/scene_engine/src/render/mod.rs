//! Narrow interface to the external renderer
//!
//! The scene graph never calls into a renderer; components push
//! [`RenderCommand`]s into the [`RenderQueue`] during the frame walk and the
//! host drains the queue into whatever backend it owns. Mesh and material
//! data live in external pools and are referenced through opaque handles.

mod render_queue;

pub use render_queue::RenderQueue;

use crate::foundation::collections::TypedHandle;
use crate::foundation::math::{Mat4, Vec3};

/// Marker for mesh handles
pub struct MeshAsset;

/// Marker for material handles
pub struct MaterialAsset;

/// Opaque handle to a mesh owned by the external asset layer
pub type MeshHandle = TypedHandle<MeshAsset>;

/// Opaque handle to a material owned by the external asset layer
pub type MaterialHandle = TypedHandle<MaterialAsset>;

/// One draw request: which mesh, which material, where in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCommand {
    /// Mesh to draw
    pub mesh: MeshHandle,

    /// Material to bind
    pub material: MaterialHandle,

    /// World transform of the owning object at submission time
    pub model_matrix: Mat4,
}

/// View and projection data supplied by the scene's main camera
#[derive(Debug, Clone, PartialEq)]
pub struct CameraData {
    /// World-to-view matrix
    pub view_matrix: Mat4,

    /// View-to-clip matrix
    pub projection_matrix: Mat4,

    /// Camera world position
    pub position: Vec3,
}

/// One light gathered by `Scene::collect_lights`
#[derive(Debug, Clone, PartialEq)]
pub struct LightData {
    /// Light color
    pub color: Vec3,

    /// Light world position
    pub position: Vec3,
}
