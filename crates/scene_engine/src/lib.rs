//! # Scene Engine
//!
//! A retained scene graph with a polymorphic component system.
//!
//! ## Features
//!
//! - **Scene Graph**: Hierarchical game objects with local and world transforms
//! - **Component System**: Behavior attached to objects through a common trait
//! - **Deferred Destruction**: Safe removal of objects mid-traversal
//! - **Data-Driven Scenes**: RON scene descriptions built through name-keyed factories
//! - **Service Injection**: Rendering, physics, and audio reached through explicit handles
//!
//! ## Quick Start
//!
//! ```rust
//! use scene_engine::scene::Scene;
//! use scene_engine::services::EngineServices;
//!
//! let mut scene = Scene::new();
//! let mut services = EngineServices::new();
//!
//! let ship = scene.create_object("ship", None);
//! let turret = scene.create_object("turret", Some(ship));
//!
//! scene.update(1.0 / 60.0, &mut services);
//!
//! assert_eq!(scene.object(turret).parent(), Some(ship));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod audio;
pub mod foundation;
pub mod physics;
pub mod render;
pub mod scene;
pub mod services;

mod config;

pub use config::{Config, ConfigError, EngineConfig};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        audio::{AudioSink, NullAudio, SoundHandle},
        foundation::{
            math::{Mat4, Quat, Transform, Vec3},
            time::Timer,
        },
        physics::{BodyDesc, BodyHandle, BodyKind, KinematicWorld, PhysicsWorld, Pose},
        render::{CameraData, LightData, MaterialHandle, MeshHandle, RenderCommand},
        scene::{
            Component, ComponentFactory, GameObject, GameObjectKey, ObjectFactory, Scene,
            SceneLoader, UpdateContext,
        },
        services::EngineServices,
        Config, EngineConfig,
    };
}
