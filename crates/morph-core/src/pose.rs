//! Per-element pose resolution.
//!
//! Every resolver takes an already-eased progress value. Apart from the star,
//! poses are pure functions of (layout, progress, elapsed time).

use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::clock::FrameTime;
use crate::constants::*;
use crate::easing::lerp;
use crate::layout::{BaubleLayout, GiftLayout, ParticleLayout, StarLayout};

/// What gets pushed to a drawable each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub scale: f32,
}

impl Pose {
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Model matrix with an extra world-space offset applied after the pose.
    pub fn model_matrix(&self, offset: Vec3) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.quat(),
            self.position + offset,
        )
    }
}

// ---------------- Particles ----------------

/// Vertical breathing offset; strong when scattered, nearly still when assembled.
///
/// This is the CPU reference for the foliage vertex shader. Keep the two in sync.
#[inline]
pub fn particle_breath(random: f32, progress: f32, time: f32) -> f32 {
    let breath = (time * FOLIAGE_BREATH_RATE + random * FOLIAGE_BREATH_PHASE_SCALE).sin()
        * FOLIAGE_BREATH_AMPLITUDE;
    breath * lerp(FOLIAGE_FLOAT_SCATTERED, FOLIAGE_FLOAT_ASSEMBLED, progress)
}

#[inline]
pub fn particle_position(layout: &ParticleLayout, progress: f32, time: f32) -> Vec3 {
    let mut pos = layout.endpoints.at(progress);
    pos.y += particle_breath(layout.random, progress, time);
    pos
}

/// Sprite diameter in pixels at the given view-space depth.
#[inline]
pub fn particle_point_size(random: f32, pixel_ratio: f32, view_depth: f32) -> f32 {
    let base = FOLIAGE_POINT_BASE_PX * pixel_ratio.min(MAX_PIXEL_RATIO)
        + random * FOLIAGE_POINT_RANDOM_PX;
    base * (FOLIAGE_POINT_ATTENUATION / view_depth.max(f32::EPSILON))
}

/// Colour and alpha of a particle sprite at `dist` from its centre (0..0.5).
/// Returns `None` outside the disc.
pub fn particle_sprite_color(random: f32, dist: f32) -> Option<([f32; 3], f32)> {
    if dist > 0.5 {
        return None;
    }
    let strength = (1.0 - dist * 2.0).max(0.0).powf(1.5);
    let t = strength * 0.8 + random * 0.2;
    let low = Vec3::from(FOLIAGE_LOW);
    let high = Vec3::from(FOLIAGE_HIGH);
    Some((low.lerp(high, t).to_array(), strength))
}

// ---------------- Ornaments ----------------

pub fn bauble_pose(layout: &BaubleLayout, progress: f32, time: f32) -> Pose {
    let mut position = layout.endpoints.at(progress);
    let amplitude = (1.0 - progress) * BAUBLE_FLOAT_AMPLITUDE;
    position.y += (time * layout.float_speed + layout.phase).sin() * amplitude;
    Pose {
        position,
        rotation: Vec3::new(0.0, time * BAUBLE_SPIN_RATE, 0.0),
        scale: layout.scale,
    }
}

/// Gifts tumble while flying and land level as the tree assembles.
pub fn gift_pose(layout: &GiftLayout, progress: f32, time: f32) -> Pose {
    let base = layout.base_rotation;
    Pose {
        position: layout.endpoints.at(progress),
        rotation: Vec3::new(
            lerp(base.x + time.sin(), 0.0, progress),
            base.y,
            lerp(base.z + time.cos(), 0.0, progress),
        ),
        scale: layout.scale,
    }
}

// ---------------- Star ----------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StarMode {
    #[default]
    Tumble,
    Upright,
}

/// Mutable animation state of the star, kept apart from its layout.
#[derive(Clone, Debug, PartialEq)]
pub struct StarMotion {
    rotation: Vec3,
    drift_y: f32,
    mode: StarMode,
    enter: f32,
    exit: f32,
}

impl Default for StarMotion {
    fn default() -> Self {
        Self::new(STAR_UPRIGHT_THRESHOLD, STAR_UPRIGHT_THRESHOLD)
    }
}

impl StarMotion {
    /// `enter == exit` switches on a single threshold; `exit < enter` adds hysteresis.
    pub fn new(enter: f32, exit: f32) -> Self {
        Self {
            rotation: Vec3::ZERO,
            drift_y: 0.0,
            mode: StarMode::Tumble,
            enter,
            exit,
        }
    }

    #[inline]
    pub fn mode(&self) -> StarMode {
        self.mode
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn drift(&self) -> f32 {
        self.drift_y
    }

    /// Advance rotation and drift by one frame.
    pub fn step(&mut self, progress: f32, frame: FrameTime) -> StarMode {
        self.mode = match self.mode {
            StarMode::Tumble if progress > self.enter => StarMode::Upright,
            StarMode::Upright if progress <= self.exit => StarMode::Tumble,
            mode => mode,
        };

        let dt = frame.delta;
        match self.mode {
            StarMode::Upright => {
                let damp = (dt * STAR_TILT_DAMPING).clamp(0.0, 1.0);
                self.rotation.x = lerp(self.rotation.x, 0.0, damp);
                self.rotation.z = lerp(self.rotation.z, 0.0, damp);
                self.rotation.y += dt * STAR_SPIN_RATE;
            }
            StarMode::Tumble => {
                let [rx, ry, rz] = STAR_TUMBLE_RATES;
                self.rotation += Vec3::new(rx, ry, rz) * dt;
            }
        }

        let amplitude = lerp(STAR_FLOAT_SCATTERED, STAR_FLOAT_ASSEMBLED, progress);
        self.drift_y += (frame.elapsed * STAR_FLOAT_RATE).sin() * amplitude * dt;
        self.mode
    }

    pub fn pose(&self, layout: &StarLayout, progress: f32) -> Pose {
        Pose {
            position: layout.endpoints.at(progress) + Vec3::Y * self.drift_y,
            rotation: self.rotation,
            scale: 1.0,
        }
    }
}
