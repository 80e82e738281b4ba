//! Physics bridge component

use serde::Deserialize;

use crate::impl_component;
use crate::physics::{BodyDesc, BodyHandle, BodyKind, Pose};
use crate::scene::{parse_props, Component, UpdateContext};

fn default_radius() -> f32 {
    0.5
}

#[derive(Debug, Deserialize)]
struct RigidBodyProps {
    #[serde(default)]
    kind: String,
    #[serde(default = "default_radius")]
    radius: f32,
}

fn parse_kind(kind: &str) -> BodyKind {
    match kind {
        "" | "static" => BodyKind::Static,
        "kinematic" => BodyKind::Kinematic,
        "dynamic" => BodyKind::Dynamic,
        other => {
            log::warn!("unknown body kind '{other}', treating as static");
            BodyKind::Static
        }
    }
}

/// Ties the owner to a body in the external physics world
///
/// At attach the owner's world pose is pushed into the world once. Each
/// frame a kinematic body pushes the owner's pose again, while a dynamic
/// body pulls the simulated pose back into the owner's transform. The body
/// is removed when the owner is reaped.
#[derive(Debug, Default)]
pub struct RigidBodyComponent {
    desc: BodyDesc,
    body: Option<BodyHandle>,
}

impl RigidBodyComponent {
    /// Create a bridge for a body of the given description
    pub fn new(desc: BodyDesc) -> Self {
        Self { desc, body: None }
    }

    /// Handle of the created body, once attached
    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    fn owner_pose(ctx: &UpdateContext<'_>) -> Pose {
        Pose {
            position: ctx.owner_world_position(),
            rotation: ctx.scene.world_rotation(ctx.owner),
        }
    }
}

impl Component for RigidBodyComponent {
    impl_component!(RigidBodyComponent);

    fn load_properties(&mut self, props: &ron::Value) {
        if let Some(props) = parse_props::<RigidBodyProps>(props) {
            self.desc = BodyDesc {
                kind: parse_kind(&props.kind),
                radius: props.radius,
            };
        }
    }

    fn init(&mut self, ctx: &mut UpdateContext<'_>) {
        let pose = Self::owner_pose(ctx);
        self.body = Some(ctx.services.physics.create_body(self.desc, pose));
    }

    fn update(&mut self, _dt: f32, ctx: &mut UpdateContext<'_>) {
        let Some(body) = self.body else {
            return;
        };
        match self.desc.kind {
            BodyKind::Kinematic => {
                let pose = Self::owner_pose(ctx);
                ctx.services.physics.set_pose(body, pose);
            }
            BodyKind::Dynamic => {
                if let Some(pose) = ctx.services.physics.pose(body) {
                    ctx.scene.set_world_position(ctx.owner, pose.position);
                    ctx.scene.set_world_rotation(ctx.owner, pose.rotation);
                }
            }
            BodyKind::Static => {}
        }
    }

    fn on_destroy(&mut self, ctx: &mut UpdateContext<'_>) {
        if let Some(body) = self.body.take() {
            ctx.services.physics.remove_body(body);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_properties_parses_kind_and_radius() {
        let mut component = RigidBodyComponent::default();
        let props = ron::from_str::<ron::Value>(r#"(kind: "dynamic", radius: 2.0)"#).unwrap();
        component.load_properties(&props);
        assert_eq!(component.desc.kind, BodyKind::Dynamic);
        assert!((component.desc.radius - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_kind_falls_back_to_static() {
        assert_eq!(parse_kind("wobbly"), BodyKind::Static);
        assert_eq!(parse_kind(""), BodyKind::Static);
    }

    #[test]
    fn malformed_properties_keep_defaults() {
        let mut component = RigidBodyComponent::new(BodyDesc {
            kind: BodyKind::Kinematic,
            radius: 3.0,
        });
        let props = ron::from_str::<ron::Value>(r#"(radius: "wide")"#).unwrap();
        component.load_properties(&props);
        assert_eq!(component.desc.kind, BodyKind::Kinematic);
        assert!((component.desc.radius - 3.0).abs() < f32::EPSILON);
    }
}
