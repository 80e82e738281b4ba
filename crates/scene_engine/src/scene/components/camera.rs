//! Perspective camera component

use serde::Deserialize;

use crate::foundation::math::Mat4;
use crate::impl_component;
use crate::scene::{parse_props, Component, UpdateContext};

fn default_fov() -> f32 {
    60.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    1000.0
}

#[derive(Debug, Deserialize)]
struct CameraProps {
    #[serde(default = "default_fov")]
    fov_degrees: f32,
    #[serde(default = "default_near")]
    near_plane: f32,
    #[serde(default = "default_far")]
    far_plane: f32,
}

/// Supplies view and projection matrices derived from the owner's pose
///
/// The view matrix is the inverse of the owner's world transform; the
/// projection is a standard perspective from the stored parameters. The
/// scene's main-camera reference decides which camera feeds the renderer.
#[derive(Debug, Clone)]
pub struct CameraComponent {
    fov_degrees: f32,
    near_plane: f32,
    far_plane: f32,
}

impl CameraComponent {
    /// Create a camera with explicit parameters
    pub fn new(fov_degrees: f32, near_plane: f32, far_plane: f32) -> Self {
        Self {
            fov_degrees,
            near_plane,
            far_plane,
        }
    }

    /// Vertical field of view in degrees
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    /// View matrix for a camera at `world_transform`
    pub fn view_matrix(&self, world_transform: &Mat4) -> Mat4 {
        world_transform.try_inverse().unwrap_or_else(Mat4::identity)
    }

    /// Perspective projection for the given viewport aspect ratio
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::new_perspective(
            aspect,
            self.fov_degrees.to_radians(),
            self.near_plane,
            self.far_plane,
        )
    }
}

impl Default for CameraComponent {
    fn default() -> Self {
        Self::new(default_fov(), default_near(), default_far())
    }
}

impl Component for CameraComponent {
    impl_component!(CameraComponent);

    fn load_properties(&mut self, props: &ron::Value) {
        if let Some(props) = parse_props::<CameraProps>(props) {
            self.fov_degrees = props.fov_degrees;
            self.near_plane = props.near_plane;
            self.far_plane = props.far_plane;
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut UpdateContext<'_>) {}
}
