//! Scene-description loader
//!
//! Reads a RON document describing an object tree and builds it through the
//! same four entry points any external deserializer would use:
//! `Scene::create_object_of`, `ComponentFactory::create`,
//! `Component::load_properties`, and attach (which runs `init`).
//!
//! Per-entry failures — an unregistered object or component type — are
//! logged and skipped so one bad entry cannot sink a whole scene file. I/O
//! and parse failures are hard errors.

use std::path::Path;

use serde::Deserialize;

use crate::foundation::math::{Quat, Quaternion, Vec3};
use crate::scene::components::register_builtin_components;
use crate::scene::factory::{ComponentFactory, ObjectFactory, PLAIN_OBJECT_TYPE};
use crate::scene::{GameObjectKey, Scene};
use crate::services::EngineServices;

/// Hard failures while reading a scene description
#[derive(thiserror::Error, Debug)]
pub enum SceneLoadError {
    /// The file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid RON
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

fn unit_value() -> ron::Value {
    ron::Value::Unit
}

// Transform fields are optional in the document; implicit-Some lets authors
// write `position: (0.0, 1.0, 0.0)` without wrapping it in `Some(...)`.
fn document_options() -> ron::Options {
    ron::Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn plain_object_type() -> String {
    PLAIN_OBJECT_TYPE.to_owned()
}

#[derive(Debug, Deserialize)]
struct SceneDoc {
    #[serde(default)]
    objects: Vec<ObjectDoc>,
}

#[derive(Debug, Deserialize)]
struct ObjectDoc {
    #[serde(rename = "type", default = "plain_object_type")]
    kind: String,
    name: String,
    #[serde(default)]
    position: Option<[f32; 3]>,
    /// Quaternion as [x, y, z, w]
    #[serde(default)]
    rotation: Option<[f32; 4]>,
    #[serde(default)]
    scale: Option<[f32; 3]>,
    #[serde(default)]
    active: Option<bool>,
    #[serde(default)]
    main_camera: bool,
    #[serde(default)]
    components: Vec<ComponentDoc>,
    #[serde(default)]
    children: Vec<ObjectDoc>,
}

#[derive(Debug, Deserialize)]
struct ComponentDoc {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default = "unit_value")]
    props: ron::Value,
}

/// Builds scenes from RON descriptions using registered type names
///
/// Owns both factories. Built-in engine components and the plain
/// `"GameObject"` recipe are registered up front; hosts add their own types
/// through [`Self::components_mut`] / [`Self::objects_mut`] before loading.
pub struct SceneLoader {
    components: ComponentFactory,
    objects: ObjectFactory,
}

impl Default for SceneLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneLoader {
    /// Create a loader with the engine's built-in types registered
    pub fn new() -> Self {
        let mut components = ComponentFactory::new();
        register_builtin_components(&mut components);
        Self {
            components,
            objects: ObjectFactory::with_defaults(),
        }
    }

    /// The component registry, for host-side registration
    pub fn components_mut(&mut self) -> &mut ComponentFactory {
        &mut self.components
    }

    /// The object registry, for host-side registration
    pub fn objects_mut(&mut self) -> &mut ObjectFactory {
        &mut self.objects
    }

    /// Parse `source` and build its objects into `scene`
    pub fn load_str(
        &self,
        source: &str,
        scene: &mut Scene,
        services: &mut EngineServices,
    ) -> Result<(), SceneLoadError> {
        let doc: SceneDoc = document_options().from_str(source)?;
        for object in &doc.objects {
            self.load_object(object, None, scene, services);
        }
        Ok(())
    }

    /// Read and build the scene description at `path`
    pub fn load_file(
        &self,
        path: impl AsRef<Path>,
        scene: &mut Scene,
        services: &mut EngineServices,
    ) -> Result<(), SceneLoadError> {
        let source = std::fs::read_to_string(path)?;
        self.load_str(&source, scene, services)
    }

    fn load_object(
        &self,
        doc: &ObjectDoc,
        parent: Option<GameObjectKey>,
        scene: &mut Scene,
        services: &mut EngineServices,
    ) {
        let Some(key) =
            scene.create_object_of(&self.objects, &doc.kind, &doc.name, parent, services)
        else {
            log::warn!(
                "skipping object '{}': unregistered type '{}'",
                doc.name,
                doc.kind
            );
            return;
        };

        {
            let object = scene.object_mut(key);
            if let Some([x, y, z]) = doc.position {
                object.set_position(Vec3::new(x, y, z));
            }
            if let Some([x, y, z, w]) = doc.rotation {
                object.set_rotation(Quat::new_normalize(Quaternion::new(w, x, y, z)));
            }
            if let Some([x, y, z]) = doc.scale {
                object.set_scale(Vec3::new(x, y, z));
            }
            if let Some(active) = doc.active {
                object.set_active(active);
            }
        }

        for component_doc in &doc.components {
            let Some(mut component) = self.components.create(&component_doc.kind) else {
                log::warn!(
                    "skipping component '{}' on '{}': unregistered type",
                    component_doc.kind,
                    doc.name
                );
                continue;
            };
            component.load_properties(&component_doc.props);
            scene.add_component(key, component, services);
        }

        if doc.main_camera {
            scene.set_main_camera(Some(key));
        }

        for child in &doc.children {
            self.load_object(child, Some(key), scene, services);
        }
    }
}
