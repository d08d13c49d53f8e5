// Whole-scene behaviour: construction, toggling, convergence and camera.

use glam::Vec3;
use morph_core::*;

const DT: f32 = 0.016;

fn small_params(seed: u64) -> SceneParams {
    SceneParams {
        seed: Some(seed),
        foliage: FoliageParams {
            count: 256,
            ..FoliageParams::default()
        },
        baubles: BaubleParams {
            count: 24,
            ..BaubleParams::default()
        },
        gifts: GiftParams {
            count: 8,
            ..GiftParams::default()
        },
        ..SceneParams::default()
    }
}

fn run(scene: &mut Scene, frames: usize) {
    let start = scene.last_frame().elapsed;
    for i in 1..=frames {
        scene.frame(start + i as f32 * DT, DT);
    }
}

#[test]
fn scene_starts_assembling_from_scatter() {
    let scene = Scene::new(&small_params(1)).unwrap();
    assert_eq!(scene.state(), TreeState::TreeShape);
    assert_eq!(scene.foliage().population().morph_factor(), 0.0);
    assert_eq!(scene.ornaments().baubles().morph_factor(), 0.0);
    assert_eq!(scene.star().population().morph_factor(), 0.0);
    assert_eq!(scene.foliage().population().len(), 256);
    assert_eq!(scene.ornaments().bauble_poses().len(), 24);
    assert_eq!(scene.ornaments().gift_poses().len(), 8);
}

#[test]
fn scene_converges_to_tree_then_back_to_scatter() {
    let mut scene = Scene::new(&small_params(2)).unwrap();
    run(&mut scene, 800);

    let foliage = scene.foliage();
    assert!(foliage.population().progress() > 0.999);
    let mut positions = Vec::new();
    foliage.positions_into(&mut positions);
    assert_eq!(positions.len(), foliage.population().len());
    for (p, layout) in positions.iter().zip(foliage.population().layouts()) {
        assert!(
            (*p - layout.endpoints.tree).length() < 0.01,
            "particle {p} not settled on {}",
            layout.endpoints.tree
        );
    }

    for (pose, layout) in scene
        .ornaments()
        .gift_poses()
        .iter()
        .zip(scene.ornaments().gifts().layouts())
    {
        assert!((pose.position - layout.endpoints.tree).length() < 0.01);
    }
    let star = scene.star();
    assert_eq!(star.motion().mode(), StarMode::Upright);
    let apex = star_apex_vec3();
    assert!((star.pose().position.x - apex.x).abs() < 0.01);
    assert!((star.pose().position.z - apex.z).abs() < 0.01);

    assert_eq!(scene.toggle(), TreeState::Scattered);
    run(&mut scene, 800);
    assert!(scene.foliage().population().progress() < 0.001);
    assert!(scene.ornaments().gifts().progress() < 0.001);
    assert_eq!(scene.star().motion().mode(), StarMode::Tumble);
    for (pose, layout) in scene
        .ornaments()
        .bauble_poses()
        .iter()
        .zip(scene.ornaments().baubles().layouts())
    {
        // baubles keep floating around their scatter point
        let d = pose.position - layout.endpoints.scatter;
        assert!(d.x.abs() < 0.01 && d.z.abs() < 0.01);
        assert!(d.y.abs() <= BAUBLE_FLOAT_AMPLITUDE + 0.01);
    }
}

#[test]
fn toggling_mid_flight_reverses_without_jumps() {
    let mut scene = Scene::new(&small_params(3)).unwrap();
    run(&mut scene, 20);
    let before = scene.foliage().population().morph_factor();
    scene.toggle();
    run(&mut scene, 1);
    let after = scene.foliage().population().morph_factor();
    assert!(after < before, "factor should turn around immediately");
    assert!(before - after <= FOLIAGE_MORPH_SPEED * DT + 1e-6);
}

#[test]
fn set_state_is_idempotent() {
    let mut scene = Scene::new(&small_params(4)).unwrap();
    scene.set_state(TreeState::TreeShape);
    assert_eq!(scene.state(), TreeState::TreeShape);
    scene.set_state(TreeState::from(false));
    assert_eq!(scene.state(), TreeState::Scattered);
    assert_eq!(scene.state().target_morph(), 0.0);
}

#[test]
fn large_frame_delta_is_clamped_per_class() {
    let mut scene = Scene::new(&small_params(5)).unwrap();
    let frame = scene.frame(10.0, 10.0);
    assert_eq!(frame.delta, MAX_FRAME_DELTA_SEC);
    let foliage = scene.foliage().population().morph_factor();
    let gifts = scene.ornaments().gifts().morph_factor();
    assert!((foliage - FOLIAGE_MORPH_SPEED * MAX_FRAME_DELTA_SEC).abs() < 1e-6);
    assert!((gifts - ORNAMENT_MORPH_SPEED * MAX_FRAME_DELTA_SEC).abs() < 1e-6);
}

#[test]
fn classes_morph_at_their_own_speeds() {
    let mut scene = Scene::new(&small_params(6)).unwrap();
    run(&mut scene, 30);
    let foliage = scene.foliage().population().morph_factor();
    let baubles = scene.ornaments().baubles().morph_factor();
    let star = scene.star().population().morph_factor();
    assert!(foliage > baubles, "foliage {foliage} should lead baubles {baubles}");
    assert_eq!(baubles, star);
}

#[test]
fn seeded_scenes_match_and_unseeded_scenes_differ() {
    let a = Scene::new(&small_params(7)).unwrap();
    let b = Scene::new(&small_params(7)).unwrap();
    assert_eq!(a.foliage().vertices(), b.foliage().vertices());
    assert_eq!(a.ornaments().gift_poses(), b.ornaments().gift_poses());

    let unseeded = SceneParams {
        seed: None,
        ..small_params(0)
    };
    let c = Scene::new(&unseeded).unwrap();
    let d = Scene::new(&unseeded).unwrap();
    assert_ne!(c.foliage().vertices(), d.foliage().vertices());
}

#[test]
fn foliage_vertices_and_uniforms() {
    let mut scene = Scene::new(&SceneParams {
        pixel_ratio: 3.0,
        ..small_params(8)
    })
    .unwrap();
    let vertices = scene.foliage().vertices();
    assert_eq!(vertices.len(), 256);
    assert_eq!(std::mem::size_of::<ParticleVertex>(), 28);
    let first = &scene.foliage().population().layouts()[0];
    assert_eq!(vertices[0].scatter, first.endpoints.scatter.to_array());
    assert_eq!(vertices[0].random, first.random);

    scene.frame(1.25, DT);
    let uniforms = scene.foliage().frame_uniforms();
    assert_eq!(uniforms.pixel_ratio, MAX_PIXEL_RATIO);
    assert_eq!(uniforms.time, 1.25);
    assert_eq!(uniforms.progress, scene.foliage().population().progress());
}

#[test]
fn invalid_params_are_rejected() {
    let empty = SceneParams {
        foliage: FoliageParams {
            count: 0,
            ..FoliageParams::default()
        },
        ..SceneParams::default()
    };
    assert_eq!(
        Scene::new(&empty).unwrap_err(),
        ConfigError::EmptyPopulation {
            class: ElementClass::Particle
        }
    );

    let slow = SceneParams {
        gifts: GiftParams {
            speed: 0.0,
            ..GiftParams::default()
        },
        ..SceneParams::default()
    };
    assert_eq!(Scene::new(&slow).unwrap_err(), ConfigError::InvalidSpeed(0.0));

    let ratio = SceneParams {
        pixel_ratio: -1.0,
        ..SceneParams::default()
    };
    assert_eq!(
        Scene::new(&ratio).unwrap_err(),
        ConfigError::InvalidPixelRatio(-1.0)
    );

    let inverted = SceneParams {
        star: StarParams {
            upright_enter: 0.7,
            upright_exit: 0.9,
            ..StarParams::default()
        },
        ..SceneParams::default()
    };
    assert!(matches!(
        Scene::new(&inverted),
        Err(ConfigError::InvertedHysteresis { .. })
    ));
}

#[test]
fn empty_population_cannot_be_built_directly() {
    let clock = MorphClock::new(1.0, Smoothing::Linear).unwrap();
    let err = Population::<StarLayout>::new(Vec::new(), clock, Easing::Linear).unwrap_err();
    assert_eq!(err, ConfigError::EmptyPopulation { class: ElementClass::Star });
}

#[test]
fn labels_follow_state() {
    assert_eq!(TreeState::TreeShape.action_label(), "Release Magic");
    assert_eq!(TreeState::TreeShape.status_label(), "STATE: ASSEMBLED");
    assert_eq!(TreeState::Scattered.action_label(), "Assemble Tree");
    assert_eq!(TreeState::Scattered.status_label(), "STATE: ETHEREAL");
    assert_eq!(TreeState::Scattered.toggled(), TreeState::TreeShape);
}

#[test]
fn orbit_camera_starts_at_default_eye() {
    let orbit = OrbitCamera::default();
    let eye = orbit.eye();
    assert!((eye - Vec3::new(0.0, 2.0, 25.0)).length() < 1e-3, "eye {eye}");
    let camera = orbit.camera(16.0 / 9.0);
    assert!((camera.fovy_radians - 45f32.to_radians()).abs() < 1e-6);
    // the scene origin projects to the screen centre
    let clip = camera.view_proj() * Vec3::ZERO.extend(1.0);
    assert!((clip.x / clip.w).abs() < 1e-5);
}

#[test]
fn orbit_camera_rotates_only_while_assembled() {
    let mut orbit = OrbitCamera::default();
    let start = orbit.azimuth;
    orbit.advance(TreeState::Scattered, 1.0);
    assert_eq!(orbit.azimuth, start);
    orbit.advance(TreeState::TreeShape, 1.0);
    assert!((orbit.azimuth - (start + orbit.auto_rotate_speed)).abs() < 1e-6);
    // distance and height are preserved while orbiting
    assert!((orbit.eye().y - 2.0).abs() < 1e-3);
}

#[test]
fn orbit_camera_clamps_distance_and_polar() {
    let close = OrbitCamera::looking_from(Vec3::new(0.0, 0.0, 2.0), Vec3::ZERO);
    assert_eq!(close.distance, CAMERA_MIN_DISTANCE);
    let overhead = OrbitCamera::looking_from(Vec3::new(0.0, 30.0, 0.1), Vec3::ZERO);
    assert!((overhead.polar - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
}
