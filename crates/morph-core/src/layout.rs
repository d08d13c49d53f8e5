//! Endpoint generation for every element class.
//!
//! Each generator is run once when a population is built. It produces the
//! scattered endpoint, the assembled endpoint and any static per-element
//! variance. Nothing here is touched again after construction.

use glam::{Vec2, Vec3};
use rand::prelude::*;
use std::f32::consts::{PI, TAU};

use crate::constants::*;
use crate::params::{BaubleParams, FoliageParams, GiftParams, StarParams};

/// Which generation rule and pose variant an element uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementClass {
    Particle,
    Bauble,
    Gift,
    Star,
}

impl ElementClass {
    fn stream_salt(self) -> u64 {
        match self {
            ElementClass::Particle => 1,
            ElementClass::Bauble => 2,
            ElementClass::Gift => 3,
            ElementClass::Star => 4,
        }
    }
}

/// Derive an independent RNG per class from the scene seed.
pub fn class_rng(seed: Option<u64>, class: ElementClass) -> StdRng {
    match seed {
        Some(seed) => {
            let mix = seed ^ class.stream_salt().wrapping_mul(0x9E37_79B9_7F4A_7C15);
            StdRng::seed_from_u64(mix)
        }
        None => StdRng::from_entropy(),
    }
}

/// The two fixed positions an element travels between.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Endpoints {
    pub scatter: Vec3,
    pub tree: Vec3,
}

impl Endpoints {
    #[inline]
    pub fn at(&self, progress: f32) -> Vec3 {
        self.scatter.lerp(self.tree, progress)
    }
}

/// Immutable per-element data of one class.
pub trait Layout {
    const CLASS: ElementClass;
    fn endpoints(&self) -> &Endpoints;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleLayout {
    pub endpoints: Endpoints,
    /// Uniform in [0, 1); drives size, colour bias and breathing phase.
    pub random: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BaubleLayout {
    pub endpoints: Endpoints,
    pub scale: f32,
    pub color: [f32; 3],
    pub float_speed: f32,
    pub phase: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GiftLayout {
    pub endpoints: Endpoints,
    pub scale: f32,
    pub color: [f32; 3],
    /// Resting orientation; only the yaw is non-zero.
    pub base_rotation: Vec3,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarLayout {
    pub endpoints: Endpoints,
}

macro_rules! impl_layout {
    ($ty:ty, $class:expr) => {
        impl Layout for $ty {
            const CLASS: ElementClass = $class;
            #[inline]
            fn endpoints(&self) -> &Endpoints {
                &self.endpoints
            }
        }
    };
}

impl_layout!(ParticleLayout, ElementClass::Particle);
impl_layout!(BaubleLayout, ElementClass::Bauble);
impl_layout!(GiftLayout, ElementClass::Gift);
impl_layout!(StarLayout, ElementClass::Star);

// ---------------- Sampling primitives ----------------

/// Spherical to Cartesian with `phi` measured from +Z.
#[inline]
fn from_spherical(r: f32, theta: f32, phi: f32) -> Vec3 {
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

/// Polar angle with `acos` so directions are uniform over the sphere.
#[inline]
fn uniform_polar<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.gen::<f32>() * 2.0 - 1.0).clamp(-1.0, 1.0).acos()
}

/// Uniform by volume inside a ball of `radius`.
pub fn sample_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = uniform_polar(rng);
    // cube root so the radial density matches the volume, not the radius
    let r = rng.gen::<f32>().cbrt() * radius;
    from_spherical(r, theta, phi)
}

/// Uniform direction, radius uniform in `[min_radius, min_radius + span)`.
pub fn sample_in_shell<R: Rng + ?Sized>(rng: &mut R, min_radius: f32, span: f32) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = uniform_polar(rng);
    let r = min_radius + rng.gen::<f32>() * span;
    from_spherical(r, theta, phi)
}

/// Cone radius at a normalized height; 0 at the apex.
#[inline]
pub fn cone_radius_at(y_norm: f32, base_radius: f32) -> f32 {
    ((1.0 - y_norm) * base_radius).max(0.0)
}

/// World-space Y for a normalized height on a cone centred at the origin.
#[inline]
pub fn cone_height_at(y_norm: f32, height: f32) -> f32 {
    (y_norm - 0.5) * height
}

/// Inverse of [`cone_height_at`].
#[inline]
pub fn cone_normalized_height(y: f32, height: f32) -> f32 {
    y / height + 0.5
}

/// Point inside the foliage cone, biased toward the outer shell and twisted
/// into a spiral with height.
pub fn sample_in_cone_shell<R: Rng + ?Sized>(rng: &mut R, params: &FoliageParams) -> Vec3 {
    let y_norm = rng.gen::<f32>();
    let y = cone_height_at(y_norm, params.tree_height);
    let radius = cone_radius_at(y_norm, params.base_radius);
    let shell = rng.gen::<f32>() * (1.0 - params.shell_min) + params.shell_min;
    let angle = rng.gen::<f32>() * TAU + y_norm * params.spiral_twist;
    if radius <= 0.0 {
        return Vec3::new(0.0, y, 0.0);
    }
    let r = radius * shell.sqrt();
    Vec3::new(r * angle.cos(), y, r * angle.sin())
}

// ---------------- Per-class generators ----------------

pub fn generate_particles<R: Rng + ?Sized>(
    rng: &mut R,
    params: &FoliageParams,
) -> Vec<ParticleLayout> {
    (0..params.count)
        .map(|_| {
            let scatter = sample_in_sphere(rng, params.scatter_radius);
            let tree = sample_in_cone_shell(rng, params);
            ParticleLayout {
                endpoints: Endpoints { scatter, tree },
                random: rng.gen(),
            }
        })
        .collect()
}

pub fn generate_baubles<R: Rng + ?Sized>(rng: &mut R, params: &BaubleParams) -> Vec<BaubleLayout> {
    (0..params.count)
        .map(|_| {
            let scatter = sample_in_shell(rng, params.scatter_min_radius, params.scatter_span);

            let y_norm = rng.gen::<f32>();
            let y = cone_height_at(y_norm, params.tree_height);
            let r = cone_radius_at(y_norm, params.base_radius) + params.surface_offset;
            let angle = rng.gen::<f32>() * TAU;
            let tree = Vec3::new(r * angle.cos(), y, r * angle.sin());

            let scale = BAUBLE_SCALE_MIN + rng.gen::<f32>() * BAUBLE_SCALE_SPAN;
            let color = if rng.gen::<f32>() < BAUBLE_GOLD_PROBABILITY {
                GOLD
            } else {
                SILVER
            };
            BaubleLayout {
                endpoints: Endpoints { scatter, tree },
                scale,
                color,
                float_speed: BAUBLE_FLOAT_SPEED_MIN + rng.gen::<f32>(),
                phase: rng.gen::<f32>() * TAU,
            }
        })
        .collect()
}

pub fn generate_gifts<R: Rng + ?Sized>(rng: &mut R, params: &GiftParams) -> Vec<GiftLayout> {
    let count = params.count.max(1) as f32;
    (0..params.count)
        .map(|i| {
            // Scattered gifts stay low, spread over a disc near the floor.
            let theta = rng.gen::<f32>() * TAU;
            let r = rng.gen::<f32>() * params.scatter_radius;
            let scatter = Vec3::new(
                r * theta.cos(),
                params.scatter_floor + rng.gen::<f32>() * params.scatter_height_span,
                r * theta.sin(),
            );

            // Index-based angle rings the base evenly instead of clumping.
            let angle = (i as f32 / count) * TAU * params.ring_winds;
            let ring = params.ring_radius + params.ring_gap + rng.gen::<f32>() * params.ring_span;
            let tree = Vec3::new(
                ring * angle.cos(),
                params.tree_floor + rng.gen::<f32>() * params.tree_height_span,
                ring * angle.sin(),
            );

            let scale = GIFT_SCALE_MIN + rng.gen::<f32>() * GIFT_SCALE_SPAN;
            let color = if rng.gen::<f32>() < GIFT_BURGUNDY_PROBABILITY {
                BURGUNDY
            } else {
                EMERALD
            };
            GiftLayout {
                endpoints: Endpoints { scatter, tree },
                scale,
                color,
                base_rotation: Vec3::new(0.0, rng.gen::<f32>() * PI, 0.0),
            }
        })
        .collect()
}

pub fn generate_star<R: Rng + ?Sized>(rng: &mut R, params: &StarParams) -> StarLayout {
    let r = params.scatter_min_radius + rng.gen::<f32>() * params.scatter_span;
    let theta = rng.gen::<f32>() * TAU;
    let phi = rng.gen::<f32>() * PI;
    StarLayout {
        endpoints: Endpoints {
            scatter: from_spherical(r, theta, phi),
            tree: params.apex,
        },
    }
}

/// Closed outline of an n-pointed star in the XY plane, first tip pointing up.
pub fn star_outline(points: usize, outer_radius: f32, inner_radius: f32) -> Vec<Vec2> {
    let n = points * 2;
    (0..n)
        .map(|i| {
            let r = if i % 2 == 0 { outer_radius } else { inner_radius };
            let angle = (i as f32 / n as f32) * TAU + PI / 2.0;
            Vec2::new(angle.cos() * r, angle.sin() * r)
        })
        .collect()
}
