// Easing, per-class pose refinements and the star rotation state machine.

use glam::Vec3;
use morph_core::*;

const DT: f32 = 0.016;

fn frame(i: usize) -> FrameTime {
    FrameTime::new(i as f32 * DT, DT)
}

#[test]
fn easing_boundary_values() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(0.5), 0.5);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
    assert_eq!(Easing::Linear.apply(0.3), 0.3);
}

#[test]
fn easing_is_monotonic() {
    for easing in [Easing::Linear, Easing::CubicInOut] {
        let mut prev = easing.apply(0.0);
        for i in 1..=1000 {
            let v = easing.apply(i as f32 / 1000.0);
            assert!(v >= prev, "{easing:?} decreased at step {i}");
            prev = v;
        }
    }
}

#[test]
fn single_element_reaches_tree_endpoint_without_overshoot() {
    let gift = GiftLayout {
        endpoints: Endpoints {
            scatter: Vec3::ZERO,
            tree: Vec3::new(10.0, 0.0, 0.0),
        },
        scale: 1.0,
        color: BURGUNDY,
        base_rotation: Vec3::ZERO,
    };
    let clock = MorphClock::new(2.0, Smoothing::Linear).unwrap();
    let mut population = Population::new(vec![gift], clock, Easing::CubicInOut).unwrap();
    assert_eq!(population.len(), 1);
    assert_eq!(population.class(), ElementClass::Gift);

    let mut prev_x = 0.0;
    let mut settled_at = None;
    for i in 0..300 {
        let progress = population.advance(1.0, frame(i));
        let x = gift_pose(&population.layouts()[0], progress, i as f32 * DT).position.x;
        assert!(x >= prev_x, "x moved backwards at frame {i}: {prev_x} -> {x}");
        assert!(x <= 10.0, "overshoot at frame {i}: {x}");
        if settled_at.is_none() && (x - 10.0).abs() < 0.01 {
            settled_at = Some(i);
        }
        prev_x = x;
    }
    assert!(settled_at.is_some(), "never within 0.01 of the tree endpoint");
}

#[test]
fn particle_breathing_settles_when_assembled() {
    let particle = ParticleLayout {
        endpoints: Endpoints {
            scatter: Vec3::new(1.0, 2.0, 3.0),
            tree: Vec3::new(-1.0, 0.0, 1.0),
        },
        random: 0.37,
    };
    let mut max_scattered = 0.0_f32;
    let mut max_assembled = 0.0_f32;
    for i in 0..400 {
        let t = i as f32 * 0.01;
        let s = particle_position(&particle, 0.0, t);
        let a = particle_position(&particle, 1.0, t);
        assert_eq!(s.x, 1.0);
        assert_eq!(a.z, 1.0);
        max_scattered = max_scattered.max((s.y - 2.0).abs());
        max_assembled = max_assembled.max(a.y.abs());
    }
    assert!(max_scattered <= FOLIAGE_BREATH_AMPLITUDE + 1e-6);
    assert!(max_scattered > FOLIAGE_BREATH_AMPLITUDE * 0.9);
    assert!(max_assembled <= FOLIAGE_BREATH_AMPLITUDE * FOLIAGE_FLOAT_ASSEMBLED + 1e-6);
}

#[test]
fn particle_point_size_attenuates_with_depth() {
    let near = particle_point_size(0.5, 1.0, 10.0);
    let far = particle_point_size(0.5, 1.0, 20.0);
    assert!((near - 2.0 * far).abs() < 1e-4);
    // pixel ratio above the cap behaves like the cap
    assert_eq!(
        particle_point_size(0.0, 3.0, 10.0),
        particle_point_size(0.0, MAX_PIXEL_RATIO, 10.0)
    );
    assert!((particle_point_size(0.0, 1.0, 20.0) - 4.0).abs() < 1e-6);
}

#[test]
fn particle_sprite_is_a_soft_disc() {
    assert!(particle_sprite_color(0.5, 0.51).is_none());
    let (center, alpha_center) = particle_sprite_color(0.0, 0.0).unwrap();
    let (_, alpha_edge) = particle_sprite_color(0.0, 0.49).unwrap();
    assert_eq!(alpha_center, 1.0);
    assert!(alpha_edge < 0.01);
    // bright centre leans toward the high colour
    assert!(center[0] > FOLIAGE_LOW[0]);
}

#[test]
fn bauble_float_fades_and_spin_is_constant() {
    let bauble = BaubleLayout {
        endpoints: Endpoints {
            scatter: Vec3::new(0.0, 4.0, 0.0),
            tree: Vec3::new(2.0, 1.0, 0.0),
        },
        scale: 0.3,
        color: GOLD,
        float_speed: 1.0,
        phase: 0.0,
    };
    let t = std::f32::consts::FRAC_PI_2; // sin(t) == 1
    let scattered = bauble_pose(&bauble, 0.0, t);
    assert!((scattered.position.y - (4.0 + BAUBLE_FLOAT_AMPLITUDE)).abs() < 1e-5);
    let assembled = bauble_pose(&bauble, 1.0, t);
    assert!((assembled.position - Vec3::new(2.0, 1.0, 0.0)).length() < 1e-5);

    for progress in [0.0, 0.5, 1.0] {
        let p = bauble_pose(&bauble, progress, 10.0);
        assert_eq!(p.rotation, Vec3::new(0.0, 10.0 * BAUBLE_SPIN_RATE, 0.0));
        assert_eq!(p.scale, 0.3);
    }
}

#[test]
fn gifts_land_flat_when_assembled() {
    let gift = GiftLayout {
        endpoints: Endpoints {
            scatter: Vec3::ZERO,
            tree: Vec3::ONE,
        },
        scale: 0.5,
        color: EMERALD,
        base_rotation: Vec3::new(0.0, 1.2, 0.0),
    };
    for t in [0.0, 0.7, 3.3, 12.0] {
        let tumbling = gift_pose(&gift, 0.0, t);
        assert!((tumbling.rotation.x - t.sin()).abs() < 1e-6);
        assert!((tumbling.rotation.z - t.cos()).abs() < 1e-6);
        assert_eq!(tumbling.rotation.y, 1.2);

        let landed = gift_pose(&gift, 1.0, t);
        assert!(landed.rotation.x.abs() < 1e-6);
        assert!(landed.rotation.z.abs() < 1e-6);
        assert_eq!(landed.rotation.y, 1.2);
        assert_eq!(landed.position, Vec3::ONE);
    }
}

#[test]
fn star_upright_mode_levels_tilt_and_spins() {
    let mut star = StarMotion::default();
    for i in 0..100 {
        assert_eq!(star.step(0.2, frame(i)), StarMode::Tumble);
    }
    let tilted = star.rotation();
    assert!(tilted.x > 0.0 && tilted.z > 0.0);

    let mut prev = star.rotation();
    for i in 100..400 {
        assert_eq!(star.step(0.9, frame(i)), StarMode::Upright);
        let r = star.rotation();
        assert!(r.x.abs() <= prev.x.abs(), "tilt x grew at frame {i}");
        assert!(r.z.abs() <= prev.z.abs(), "tilt z grew at frame {i}");
        assert!(r.y > prev.y, "spin stalled at frame {i}");
        prev = r;
    }
    assert!(prev.x.abs() < tilted.x * 0.01);
    assert!(prev.z.abs() < tilted.z * 0.01);
}

#[test]
fn star_tumbles_on_all_axes_below_threshold() {
    let mut star = StarMotion::default();
    star.step(0.5, frame(0));
    let r = star.rotation();
    let [rx, ry, rz] = STAR_TUMBLE_RATES;
    assert!((r - Vec3::new(rx, ry, rz) * DT).length() < 1e-7);
}

#[test]
fn star_threshold_without_hysteresis_flips_every_crossing() {
    let mut star = StarMotion::default();
    assert_eq!(star.step(0.81, frame(0)), StarMode::Upright);
    assert_eq!(star.step(0.80, frame(1)), StarMode::Tumble);
    assert_eq!(star.step(0.81, frame(2)), StarMode::Upright);
}

#[test]
fn star_hysteresis_holds_mode_inside_band() {
    let mut star = StarMotion::new(0.85, 0.75);
    assert_eq!(star.step(0.80, frame(0)), StarMode::Tumble);
    assert_eq!(star.step(0.90, frame(1)), StarMode::Upright);
    assert_eq!(star.step(0.80, frame(2)), StarMode::Upright);
    assert_eq!(star.step(0.76, frame(3)), StarMode::Upright);
    assert_eq!(star.step(0.75, frame(4)), StarMode::Tumble);
}

#[test]
fn star_drift_accumulates_but_stays_bounded() {
    let layout = StarLayout {
        endpoints: Endpoints {
            scatter: Vec3::new(0.0, 10.0, 0.0),
            tree: star_apex_vec3(),
        },
    };
    let mut star = StarMotion::default();
    let mut moved = false;
    for i in 0..4000 {
        star.step(0.0, frame(i));
        let pose = star.pose(&layout, 0.0);
        assert!(star.drift().abs() < 0.75, "drift {} ran away", star.drift());
        assert_eq!(pose.position.y, 10.0 + star.drift());
        moved |= star.drift().abs() > 0.1;
    }
    assert!(moved, "star never bobbed");
}

#[test]
fn pose_matrix_applies_offset_scale_and_rotation() {
    let pose = Pose {
        position: Vec3::new(1.0, 2.0, 3.0),
        rotation: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
        scale: 2.0,
    };
    let m = pose.model_matrix(scene_offset_vec3());
    let p = m.transform_point3(Vec3::X);
    // +X rotated a quarter turn about +Y lands on -Z, then scaled and moved
    let expected = Vec3::new(1.0, 0.0, 3.0 - 2.0);
    assert!((p - expected).length() < 1e-5, "got {p}");
}
