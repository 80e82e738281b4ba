//! Point light component

use serde::Deserialize;

use crate::foundation::math::Vec3;
use crate::impl_component;
use crate::scene::{parse_props, Component, UpdateContext};

#[derive(Debug, Deserialize)]
struct LightProps {
    color: [f32; 3],
}

/// A colored point light at the owner's world position
///
/// Carries no behavior of its own; `Scene::collect_lights` gathers every
/// light in the active forest for the external renderer.
#[derive(Debug, Clone)]
pub struct LightComponent {
    color: Vec3,
}

impl LightComponent {
    /// Create a light with the given color
    pub fn new(color: Vec3) -> Self {
        Self { color }
    }

    /// Light color
    pub fn color(&self) -> &Vec3 {
        &self.color
    }

    /// Change the light color
    pub fn set_color(&mut self, color: Vec3) {
        self.color = color;
    }
}

impl Default for LightComponent {
    fn default() -> Self {
        Self::new(Vec3::new(1.0, 1.0, 1.0))
    }
}

impl Component for LightComponent {
    impl_component!(LightComponent);

    fn load_properties(&mut self, props: &ron::Value) {
        if let Some(props) = parse_props::<LightProps>(props) {
            let [r, g, b] = props.color;
            self.color = Vec3::new(r, g, b);
        }
    }

    fn update(&mut self, _dt: f32, _ctx: &mut UpdateContext<'_>) {}
}
