//! Whole-graph behavior tests: placement, reparenting, the frame walk,
//! deferred destruction, and transform composition.

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;

use crate::foundation::math::Vec3;
use crate::impl_component;
use crate::scene::components::{CameraComponent, LightComponent};
use crate::scene::{Component, Scene, UpdateContext};
use crate::services::EngineServices;

type Log = Rc<RefCell<Vec<String>>>;

/// Records every lifecycle hook it receives, tagged with its label.
struct Probe {
    label: &'static str,
    log: Log,
}

impl Probe {
    fn new(label: &'static str, log: &Log) -> Box<Self> {
        Box::new(Self {
            label,
            log: Rc::clone(log),
        })
    }

    fn record(&self, hook: &str) {
        self.log.borrow_mut().push(format!("{hook} {}", self.label));
    }
}

impl Component for Probe {
    impl_component!(Probe);

    fn init(&mut self, _ctx: &mut UpdateContext<'_>) {
        self.record("init");
    }

    fn update(&mut self, _dt: f32, _ctx: &mut UpdateContext<'_>) {
        self.record("update");
    }

    fn on_destroy(&mut self, _ctx: &mut UpdateContext<'_>) {
        self.record("destroy");
    }
}

/// Marks its owner dead after `after` updates.
struct SelfDestruct {
    after: u32,
    seen: u32,
}

impl Component for SelfDestruct {
    impl_component!(SelfDestruct);

    fn update(&mut self, _dt: f32, ctx: &mut UpdateContext<'_>) {
        self.seen += 1;
        if self.seen >= self.after {
            ctx.owner_mut().mark_for_destroy();
        }
    }
}

/// Attaches a `Probe` to its owner during its first update.
struct Grafter {
    log: Log,
    done: bool,
}

impl Component for Grafter {
    impl_component!(Grafter);

    fn update(&mut self, _dt: f32, ctx: &mut UpdateContext<'_>) {
        if !self.done {
            self.done = true;
            let probe = Probe::new("grafted", &self.log);
            let owner = ctx.owner;
            ctx.scene.add_component(owner, probe, ctx.services);
        }
    }
}

/// Looks up a `LightComponent` sibling on its own owner during update.
struct SiblingScanner {
    log: Log,
}

impl Component for SiblingScanner {
    impl_component!(SiblingScanner);

    fn update(&mut self, _dt: f32, ctx: &mut UpdateContext<'_>) {
        let sibling = ctx.scene.component::<LightComponent>(ctx.owner).is_some();
        let own_slot = ctx.scene.component::<Self>(ctx.owner).is_some();
        self.log
            .borrow_mut()
            .push(format!("sibling {sibling} self {own_slot}"));
    }
}

fn log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

fn entries(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

fn step(scene: &mut Scene, services: &mut EngineServices) {
    scene.update(1.0 / 60.0, services);
}

#[test]
fn created_objects_land_in_exactly_one_ownership_slot() {
    let mut scene = Scene::new();
    let parent = scene.create_object("parent", None);
    let child = scene.create_object("child", Some(parent));

    assert_eq!(scene.roots(), &[parent]);
    assert_eq!(scene.object(parent).children(), &[child]);
    assert_eq!(scene.object(child).parent(), Some(parent));
    assert_eq!(scene.len(), 2);
}

#[test]
fn reparenting_moves_between_slots_without_duplicates() {
    let mut scene = Scene::new();
    let a = scene.create_object("a", None);
    let b = scene.create_object("b", None);
    let child = scene.create_object("child", Some(a));

    assert!(scene.set_parent(child, Some(b)));
    assert!(scene.object(a).children().is_empty());
    assert_eq!(scene.object(b).children(), &[child]);
    assert_eq!(scene.object(child).parent(), Some(b));

    // Re-rooting is always valid.
    assert!(scene.set_parent(child, None));
    assert!(scene.object(b).children().is_empty());
    assert_eq!(scene.roots(), &[a, b, child]);
}

#[test]
fn reparenting_under_a_descendant_is_rejected() {
    let mut scene = Scene::new();
    let a = scene.create_object("a", None);
    let b = scene.create_object("b", Some(a));
    let c = scene.create_object("c", Some(b));

    assert!(!scene.set_parent(a, Some(c)));
    assert!(!scene.set_parent(a, Some(b)));
    assert!(!scene.set_parent(a, Some(a)));

    // The rejected moves left the tree untouched.
    assert_eq!(scene.roots(), &[a]);
    assert_eq!(scene.object(a).children(), &[b]);
    assert_eq!(scene.object(b).children(), &[c]);
}

#[test]
fn stale_keys_are_soft_failures() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();
    let doomed = scene.create_object("doomed", None);
    scene.object_mut(doomed).mark_for_destroy();
    step(&mut scene, &mut services);

    assert!(scene.get(doomed).is_none());
    assert!(!scene.set_parent(doomed, None));
    let survivor = scene.create_object("survivor", Some(doomed));
    assert_eq!(scene.object(survivor).parent(), None);
    assert!(!scene.add_component(doomed, Probe::new("late", &log()), &mut services));
}

#[test]
fn init_runs_once_immediately_then_updates_follow() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();
    let log = log();

    let node = scene.create_object("node", None);
    scene.add_component(node, Probe::new("p", &log), &mut services);
    assert_eq!(entries(&log), vec!["init p"]);

    step(&mut scene, &mut services);
    step(&mut scene, &mut services);
    assert_eq!(entries(&log), vec!["init p", "update p", "update p"]);
}

#[test]
fn components_update_in_attachment_order() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();
    let log = log();

    let node = scene.create_object("node", None);
    scene.add_component(node, Probe::new("first", &log), &mut services);
    scene.add_component(node, Probe::new("second", &log), &mut services);
    log.borrow_mut().clear();

    step(&mut scene, &mut services);
    assert_eq!(entries(&log), vec!["update first", "update second"]);
}

#[test]
fn component_attached_mid_walk_first_updates_next_frame() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();
    let log = log();

    let node = scene.create_object("node", None);
    scene.add_component(
        node,
        Box::new(Grafter {
            log: Rc::clone(&log),
            done: false,
        }),
        &mut services,
    );

    step(&mut scene, &mut services);
    // Attach (and thus init) happened during the walk, but no update yet.
    assert_eq!(entries(&log), vec!["init grafted"]);

    step(&mut scene, &mut services);
    assert_eq!(entries(&log), vec!["init grafted", "update grafted"]);
    assert_eq!(scene.object(node).component_count(), 2);
}

#[test]
fn sibling_components_stay_visible_during_update() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();
    let log = log();

    let node = scene.create_object("node", None);
    scene.add_component(node, Box::<LightComponent>::default(), &mut services);
    scene.add_component(
        node,
        Box::new(SiblingScanner {
            log: Rc::clone(&log),
        }),
        &mut services,
    );

    step(&mut scene, &mut services);
    // The updating component's own slot is detached; siblings are not.
    assert_eq!(entries(&log), vec!["sibling true self false"]);
}

#[test]
fn inactive_objects_suspend_their_whole_subtree() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();
    let log = log();

    let parent = scene.create_object("parent", None);
    let child = scene.create_object("child", Some(parent));
    scene.add_component(child, Probe::new("child", &log), &mut services);
    log.borrow_mut().clear();

    scene.object_mut(parent).set_active(false);
    step(&mut scene, &mut services);
    assert!(entries(&log).is_empty());

    scene.object_mut(parent).set_active(true);
    step(&mut scene, &mut services);
    assert_eq!(entries(&log), vec!["update child"]);
}

#[test]
fn marked_objects_are_reaped_at_the_next_walk() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();
    let log = log();

    let node = scene.create_object("node", None);
    scene.add_component(node, Probe::new("p", &log), &mut services);
    log.borrow_mut().clear();

    scene.object_mut(node).mark_for_destroy();
    // Marking twice is harmless.
    scene.object_mut(node).mark_for_destroy();
    assert_eq!(scene.len(), 1);

    step(&mut scene, &mut services);
    assert_eq!(entries(&log), vec!["destroy p"]);
    assert!(scene.get(node).is_none());
    assert!(scene.is_empty());
    assert!(scene.roots().is_empty());
}

#[test]
fn destruction_takes_the_whole_subtree() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();
    let log = log();

    let parent = scene.create_object("parent", None);
    let child = scene.create_object("child", Some(parent));
    let grandchild = scene.create_object("grandchild", Some(child));
    scene.add_component(parent, Probe::new("parent", &log), &mut services);
    scene.add_component(grandchild, Probe::new("grandchild", &log), &mut services);
    log.borrow_mut().clear();

    scene.object_mut(parent).mark_for_destroy();
    step(&mut scene, &mut services);

    // No update reached the dead subtree; hooks ran top-down.
    assert_eq!(entries(&log), vec!["destroy parent", "destroy grandchild"]);
    assert!(scene.get(child).is_none());
    assert!(scene.get(grandchild).is_none());
    assert!(scene.is_empty());
}

#[test]
fn self_destruction_during_update_defers_to_the_next_walk() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();
    let log = log();

    let node = scene.create_object("node", None);
    let child = scene.create_object("child", Some(node));
    scene.add_component(node, Box::new(SelfDestruct { after: 1, seen: 0 }), &mut services);
    scene.add_component(child, Probe::new("child", &log), &mut services);
    log.borrow_mut().clear();

    // The mark lands mid-update; the subtree still finishes this frame.
    step(&mut scene, &mut services);
    assert_eq!(entries(&log), vec!["update child"]);
    assert!(scene.get(node).is_some());

    step(&mut scene, &mut services);
    assert_eq!(entries(&log), vec!["update child", "destroy child"]);
    assert!(scene.get(node).is_none());
}

#[test]
fn dead_child_is_erased_by_its_own_parent_sweep() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();
    let log = log();

    let parent = scene.create_object("parent", None);
    let first = scene.create_object("first", Some(parent));
    let second = scene.create_object("second", Some(parent));
    scene.add_component(second, Probe::new("second", &log), &mut services);
    log.borrow_mut().clear();

    scene.object_mut(first).mark_for_destroy();
    step(&mut scene, &mut services);

    // The surviving sibling still updated; the dead one is gone.
    assert_eq!(entries(&log), vec!["update second"]);
    assert_eq!(scene.object(parent).children(), &[second]);
    assert!(scene.get(first).is_none());
}

#[test]
fn world_transform_composes_down_the_parent_chain() {
    let mut scene = Scene::new();
    let parent = scene.create_object("parent", None);
    let child = scene.create_object("child", Some(parent));

    scene.object_mut(parent).set_position(Vec3::new(1.0, 2.0, 3.0));
    scene.object_mut(child).set_position(Vec3::new(10.0, 0.0, 0.0));

    let world = scene.world_position(child);
    assert_relative_eq!(world, Vec3::new(11.0, 2.0, 3.0), epsilon = 1e-5);

    // Moving the parent moves the whole subtree; nothing is cached.
    scene.object_mut(parent).set_position(Vec3::new(-1.0, 2.0, 3.0));
    let world = scene.world_position(child);
    assert_relative_eq!(world, Vec3::new(9.0, 2.0, 3.0), epsilon = 1e-5);
}

#[test]
fn set_world_position_respects_the_parent_frame() {
    let mut scene = Scene::new();
    let parent = scene.create_object("parent", None);
    let child = scene.create_object("child", Some(parent));
    scene.object_mut(parent).set_position(Vec3::new(5.0, 0.0, 0.0));

    scene.set_world_position(child, Vec3::new(7.0, 1.0, 0.0));
    assert_relative_eq!(
        *scene.object(child).position(),
        Vec3::new(2.0, 1.0, 0.0),
        epsilon = 1e-5
    );
    assert_relative_eq!(
        scene.world_position(child),
        Vec3::new(7.0, 1.0, 0.0),
        epsilon = 1e-5
    );
}

#[test]
fn main_camera_reference_goes_stale_observably() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();

    let eye = scene.create_object("eye", None);
    scene.add_component(eye, Box::<CameraComponent>::default(), &mut services);
    scene.set_main_camera(Some(eye));
    assert_eq!(scene.main_camera(), Some(eye));
    assert!(scene.camera_data(16.0 / 9.0).is_some());

    scene.object_mut(eye).mark_for_destroy();
    step(&mut scene, &mut services);
    assert_eq!(scene.main_camera(), None);
    assert!(scene.camera_data(16.0 / 9.0).is_none());
}

#[test]
fn light_collection_skips_inactive_subtrees() {
    let mut scene = Scene::new();
    let mut services = EngineServices::new();

    let lit = scene.create_object("lit", None);
    scene.add_component(lit, Box::<LightComponent>::default(), &mut services);
    let dark = scene.create_object("dark", None);
    let lamp = scene.create_object("lamp", Some(dark));
    scene.add_component(lamp, Box::<LightComponent>::default(), &mut services);
    scene.object_mut(dark).set_active(false);

    let lights = scene.collect_lights();
    assert_eq!(lights.len(), 1);
}

#[test]
fn find_by_name_walks_depth_first() {
    let mut scene = Scene::new();
    let a = scene.create_object("a", None);
    let inner = scene.create_object("target", Some(a));
    let _decoy = scene.create_object("target", None);

    // The root-list order makes the nested match the first one found.
    assert_eq!(scene.find_by_name("target"), Some(inner));
    assert_eq!(scene.find_child_by_name(a, "target"), Some(inner));
    assert_eq!(scene.find_by_name("absent"), None);
}
