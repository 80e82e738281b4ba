//! Built-in components
//!
//! Each one bridges the scene graph to one external collaborator: lights
//! feed `Scene::collect_lights`, cameras supply view/projection data,
//! meshes submit draw requests, rigid bodies push/pull poses, and audio
//! sources issue playback requests.

mod audio_source;
mod camera;
mod light;
mod mesh;
mod rigid_body;

pub use audio_source::AudioSourceComponent;
pub use camera::CameraComponent;
pub use light::LightComponent;
pub use mesh::MeshComponent;
pub use rigid_body::RigidBodyComponent;

use crate::scene::factory::ComponentFactory;

/// Register every built-in component under its canonical type name
///
/// Called by `SceneLoader::new`; hosts wiring their own factory call it
/// once before loading anything.
pub fn register_builtin_components(factory: &mut ComponentFactory) {
    factory.register::<AudioSourceComponent>("AudioSourceComponent");
    factory.register::<CameraComponent>("CameraComponent");
    factory.register::<LightComponent>("LightComponent");
    factory.register::<MeshComponent>("MeshComponent");
    factory.register::<RigidBodyComponent>("RigidBodyComponent");
}
