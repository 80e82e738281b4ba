//! Mesh rendering component

use crate::impl_component;
use crate::render::{MaterialHandle, MeshHandle, RenderCommand};
use crate::scene::{Component, UpdateContext};

/// Submits one draw request per frame for the owner
///
/// Holds opaque mesh and material handles resolved by the external asset
/// layer; host code injects them after construction (scene files carry
/// asset *paths*, which only that layer can resolve). While either handle
/// is missing the component stays silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshComponent {
    mesh: Option<MeshHandle>,
    material: Option<MaterialHandle>,
}

impl MeshComponent {
    /// Create a mesh component with both handles resolved
    pub fn new(mesh: MeshHandle, material: MaterialHandle) -> Self {
        Self {
            mesh: Some(mesh),
            material: Some(material),
        }
    }

    /// Set the mesh handle
    pub fn set_mesh(&mut self, mesh: MeshHandle) {
        self.mesh = Some(mesh);
    }

    /// Set the material handle
    pub fn set_material(&mut self, material: MaterialHandle) {
        self.material = Some(material);
    }

    /// Whether both handles are present
    pub fn is_renderable(&self) -> bool {
        self.mesh.is_some() && self.material.is_some()
    }
}

impl Component for MeshComponent {
    impl_component!(MeshComponent);

    fn update(&mut self, _dt: f32, ctx: &mut UpdateContext<'_>) {
        let (Some(mesh), Some(material)) = (self.mesh, self.material) else {
            return;
        };
        let model_matrix = ctx.owner_world_transform();
        ctx.services.render_queue.submit(RenderCommand {
            mesh,
            material,
            model_matrix,
        });
    }
}
