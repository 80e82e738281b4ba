//! Headless sandbox application
//!
//! Loads a RON scene description, registers one app-local component, and
//! runs a fixed-timestep loop that steps the scene and physics and drains
//! the render queue. Demonstrates the intended host wiring without a window
//! or GPU.

use scene_engine::foundation::logging;
use scene_engine::impl_component;
use scene_engine::prelude::*;

/// Spins its owner around the Y axis at a fixed rate.
#[derive(Debug, Default)]
struct SpinnerComponent {
    degrees_per_second: f32,
}

impl Component for SpinnerComponent {
    impl_component!(SpinnerComponent);

    fn load_properties(&mut self, props: &ron::Value) {
        #[derive(serde::Deserialize)]
        struct SpinnerProps {
            degrees_per_second: f32,
        }
        if let Some(props) = scene_engine::scene::parse_props::<SpinnerProps>(props) {
            self.degrees_per_second = props.degrees_per_second;
        }
    }

    fn update(&mut self, dt: f32, ctx: &mut UpdateContext<'_>) {
        let step = Quat::from_axis_angle(
            &Vec3::y_axis(),
            self.degrees_per_second.to_radians() * dt,
        );
        let transform = &mut ctx.owner_mut().transform;
        transform.rotation = step * transform.rotation;
    }
}

/// Build a small default scene when no scene file is available.
fn build_fallback_scene(scene: &mut Scene, services: &mut EngineServices) {
    log::info!("building fallback scene");

    let eye = scene.create_object("eye", None);
    scene.object_mut(eye).set_position(Vec3::new(0.0, 2.0, 8.0));
    scene.add_component(eye, Box::<scene_engine::scene::components::CameraComponent>::default(), services);
    scene.set_main_camera(Some(eye));

    let sun = scene.create_object("sun", None);
    scene.object_mut(sun).set_position(Vec3::new(0.0, 10.0, 0.0));
    scene.add_component(
        sun,
        Box::<scene_engine::scene::components::LightComponent>::default(),
        services,
    );

    let ship = scene.create_object("ship", None);
    scene.add_component(
        ship,
        Box::new(SpinnerComponent {
            degrees_per_second: 90.0,
        }),
        services,
    );
    scene.create_object("turret", Some(ship));
}

fn main() {
    logging::init();

    let config = match EngineConfig::load_from_file("engine.toml") {
        Ok(config) => config,
        Err(error) => {
            log::info!("no engine.toml ({error}), using defaults");
            EngineConfig {
                max_frames: Some(600),
                scene_path: Some("assets/scene.ron".to_owned()),
                ..EngineConfig::default()
            }
        }
    };

    let mut scene = Scene::new();
    let mut services = EngineServices::new();

    let mut loader = SceneLoader::new();
    loader
        .components_mut()
        .register::<SpinnerComponent>("SpinnerComponent");

    match &config.scene_path {
        Some(path) => {
            if let Err(error) = loader.load_file(path, &mut scene, &mut services) {
                log::warn!("could not load '{path}': {error}");
                build_fallback_scene(&mut scene, &mut services);
            }
        }
        None => build_fallback_scene(&mut scene, &mut services),
    }
    log::info!("scene ready with {} objects", scene.len());

    let mut timer = Timer::new();
    loop {
        if let Some(max) = config.max_frames {
            if timer.frame_count() >= max {
                break;
            }
        }
        timer.tick();
        let dt = config.fixed_timestep;

        scene.update(dt, &mut services);
        services.physics.step(dt);

        let commands = services.render_queue.drain();
        let lights = scene.collect_lights();
        let camera = scene.camera_data(16.0 / 9.0);

        if timer.frame_count() % 60 == 0 {
            log::info!(
                "frame {}: {} objects, {} draw commands, {} lights, camera {}",
                timer.frame_count(),
                scene.len(),
                commands.len(),
                lights.len(),
                if camera.is_some() { "ok" } else { "missing" },
            );
        }
    }

    log::info!(
        "sandbox finished after {} frames ({:.2}s simulated)",
        timer.frame_count(),
        timer.total_time(),
    );
}
