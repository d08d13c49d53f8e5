//! Toggle and camera state shared with the native frontend.
//!
//! These types avoid platform-specific APIs. The frontend flips the
//! [`TreeState`] on user input and uses the camera types to build its
//! view/projection matrices.

use glam::{Mat4, Vec3};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};

use crate::constants::*;

/// The single external input: which arrangement every population heads for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TreeState {
    Scattered,
    #[default]
    TreeShape,
}

impl TreeState {
    #[inline]
    pub fn is_assembled(self) -> bool {
        self == TreeState::TreeShape
    }

    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            TreeState::Scattered => TreeState::TreeShape,
            TreeState::TreeShape => TreeState::Scattered,
        }
    }

    /// Target morph factor: 0 scattered, 1 assembled.
    #[inline]
    pub fn target_morph(self) -> f32 {
        if self.is_assembled() {
            1.0
        } else {
            0.0
        }
    }

    /// Label for the control that flips to the other state.
    pub fn action_label(self) -> &'static str {
        match self {
            TreeState::Scattered => "Assemble Tree",
            TreeState::TreeShape => "Release Magic",
        }
    }

    pub fn status_label(self) -> &'static str {
        match self {
            TreeState::Scattered => "STATE: ETHEREAL",
            TreeState::TreeShape => "STATE: ASSEMBLED",
        }
    }
}

impl From<bool> for TreeState {
    fn from(assembled: bool) -> Self {
        if assembled {
            TreeState::TreeShape
        } else {
            TreeState::Scattered
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Pixels per world unit at unit view depth for a viewport of `height_px`.
    pub fn focal_length_px(&self, height_px: f32) -> f32 {
        height_px / (2.0 * (self.fovy_radians * 0.5).tan())
    }
}

/// Orbiting camera that slowly circles the tree while it is assembled.
#[derive(Clone, Debug)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    /// Angle from +Y, clamped to [π/4, π/2].
    pub polar: f32,
    /// Angle around +Y measured from +Z.
    pub azimuth: f32,
    /// Radians per second while assembled.
    pub auto_rotate_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::looking_from(Vec3::from(CAMERA_EYE), Vec3::ZERO)
    }
}

impl OrbitCamera {
    pub fn looking_from(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset
            .length()
            .clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
        let polar = (offset.y / offset.length().max(f32::EPSILON))
            .clamp(-1.0, 1.0)
            .acos();
        Self {
            target,
            distance,
            polar: polar.clamp(FRAC_PI_4, FRAC_PI_2),
            azimuth: offset.x.atan2(offset.z),
            auto_rotate_speed: TAU / CAMERA_AUTO_ROTATE_PERIOD_SEC,
        }
    }

    /// Auto-rotate only while the tree is (or is becoming) assembled.
    pub fn advance(&mut self, state: TreeState, delta: f32) {
        if state.is_assembled() {
            self.azimuth = (self.azimuth + self.auto_rotate_speed * delta) % TAU;
        }
    }

    pub fn eye(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.target + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.distance
    }

    pub fn camera(&self, aspect: f32) -> Camera {
        Camera {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}
