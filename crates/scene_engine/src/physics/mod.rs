//! Narrow interface to the external physics backend
//!
//! The scene graph pushes object poses into a [`PhysicsWorld`] when bodies
//! are created and pulls updated poses back each frame for dynamic bodies.
//! Contact callbacks are delivered through a registered [`ContactListener`],
//! never polled. There is no solver in this crate; [`KinematicWorld`] is a
//! bookkeeping implementation for hosts and tests.

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::{Quat, Vec3};

new_key_type! {
    /// Handle to a body inside a physics world
    pub struct BodyHandle;
}

/// Position and orientation of a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World position
    pub position: Vec3,

    /// World rotation
    pub rotation: Quat,
}

impl Pose {
    /// Identity pose at the origin
    pub fn identity() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

/// How a body participates in simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Never moves; other bodies collide against it
    Static,
    /// Moved by the scene graph, not by the simulation
    Kinematic,
    /// Moved by the simulation; the scene graph pulls its pose back
    Dynamic,
}

/// Creation parameters for a body
///
/// Collision shapes are the backend's concern; the core only carries a
/// bounding radius for broad-phase contact reporting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    /// Simulation role of the body
    pub kind: BodyKind,

    /// Bounding radius used for contact reporting
    pub radius: f32,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            kind: BodyKind::Static,
            radius: 0.5,
        }
    }
}

/// Receiver for contact events
///
/// Registered once with the world; invoked during [`PhysicsWorld::step`]
/// for each touching pair.
pub trait ContactListener {
    /// Called once per touching body pair per step
    fn on_contact(&mut self, a: BodyHandle, b: BodyHandle);
}

/// The surface the scene graph needs from a physics backend
pub trait PhysicsWorld {
    /// Create a body at the given pose and return its handle
    fn create_body(&mut self, desc: BodyDesc, pose: Pose) -> BodyHandle;

    /// Remove a body; stale handles are ignored
    fn remove_body(&mut self, body: BodyHandle);

    /// Overwrite a body's pose (kinematic push)
    fn set_pose(&mut self, body: BodyHandle, pose: Pose);

    /// Current pose of a body, or `None` for stale handles
    fn pose(&self, body: BodyHandle) -> Option<Pose>;

    /// Advance the simulation by `dt` seconds
    fn step(&mut self, dt: f32);

    /// Register the contact listener, replacing any previous one
    fn set_contact_listener(&mut self, listener: Box<dyn ContactListener>);
}

struct BodyState {
    desc: BodyDesc,
    pose: Pose,
    velocity: Vec3,
}

/// Bookkeeping-only physics world
///
/// Stores poses verbatim, integrates an optional constant velocity for
/// dynamic bodies, and reports radius overlaps to the contact listener.
/// Suitable for headless hosts and tests; real games plug a solver-backed
/// implementation into the same trait.
#[derive(Default)]
pub struct KinematicWorld {
    bodies: SlotMap<BodyHandle, BodyState>,
    listener: Option<Box<dyn ContactListener>>,
}

impl KinematicWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Give a dynamic body a constant velocity; stale handles are ignored
    pub fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        if let Some(state) = self.bodies.get_mut(body) {
            state.velocity = velocity;
        }
    }

    /// Number of live bodies
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

impl PhysicsWorld for KinematicWorld {
    fn create_body(&mut self, desc: BodyDesc, pose: Pose) -> BodyHandle {
        self.bodies.insert(BodyState {
            desc,
            pose,
            velocity: Vec3::zeros(),
        })
    }

    fn remove_body(&mut self, body: BodyHandle) {
        self.bodies.remove(body);
    }

    fn set_pose(&mut self, body: BodyHandle, pose: Pose) {
        if let Some(state) = self.bodies.get_mut(body) {
            state.pose = pose;
        }
    }

    fn pose(&self, body: BodyHandle) -> Option<Pose> {
        self.bodies.get(body).map(|state| state.pose)
    }

    fn step(&mut self, dt: f32) {
        for state in self.bodies.values_mut() {
            if state.desc.kind == BodyKind::Dynamic {
                state.pose.position += state.velocity * dt;
            }
        }

        if let Some(listener) = self.listener.as_mut() {
            let handles: Vec<BodyHandle> = self.bodies.keys().collect();
            for (i, &a) in handles.iter().enumerate() {
                for &b in &handles[i + 1..] {
                    let (sa, sb) = (&self.bodies[a], &self.bodies[b]);
                    let reach = sa.desc.radius + sb.desc.radius;
                    let distance = (sa.pose.position - sb.pose.position).norm();
                    if distance <= reach {
                        listener.on_contact(a, b);
                    }
                }
            }
        }
    }

    fn set_contact_listener(&mut self, listener: Box<dyn ContactListener>) {
        self.listener = Some(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingListener {
        contacts: Rc<RefCell<Vec<(BodyHandle, BodyHandle)>>>,
    }

    impl ContactListener for RecordingListener {
        fn on_contact(&mut self, a: BodyHandle, b: BodyHandle) {
            self.contacts.borrow_mut().push((a, b));
        }
    }

    #[test]
    fn dynamic_bodies_integrate_velocity() {
        let mut world = KinematicWorld::new();
        let body = world.create_body(
            BodyDesc {
                kind: BodyKind::Dynamic,
                radius: 0.5,
            },
            Pose::identity(),
        );
        world.set_velocity(body, Vec3::new(1.0, 0.0, 0.0));
        world.step(0.5);

        let pose = world.pose(body).unwrap();
        assert_relative_eq!(pose.position, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn static_bodies_keep_their_pose() {
        let mut world = KinematicWorld::new();
        let body = world.create_body(BodyDesc::default(), Pose::identity());
        world.set_velocity(body, Vec3::new(1.0, 0.0, 0.0));
        world.step(1.0);
        assert_relative_eq!(world.pose(body).unwrap().position, Vec3::zeros());
    }

    #[test]
    fn overlapping_bodies_report_contact() {
        let contacts = Rc::new(RefCell::new(Vec::new()));
        let mut world = KinematicWorld::new();
        world.set_contact_listener(Box::new(RecordingListener {
            contacts: Rc::clone(&contacts),
        }));

        let a = world.create_body(BodyDesc::default(), Pose::identity());
        let mut far = Pose::identity();
        far.position = Vec3::new(0.6, 0.0, 0.0);
        let b = world.create_body(BodyDesc::default(), far);

        world.step(0.016);
        assert_eq!(contacts.borrow().as_slice(), &[(a, b)]);
    }

    #[test]
    fn removed_bodies_resolve_to_none() {
        let mut world = KinematicWorld::new();
        let body = world.create_body(BodyDesc::default(), Pose::identity());
        world.remove_body(body);
        assert!(world.pose(body).is_none());
        // Double removal is harmless.
        world.remove_body(body);
    }
}
