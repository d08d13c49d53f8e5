//! Tunable parameters for every population, defaulting to the values in
//! [`crate::constants`].

use glam::Vec3;

use crate::clock::Smoothing;
use crate::constants::*;
use crate::easing::Easing;
use crate::error::{ensure_positive, ensure_speed, ConfigError, Result};
use crate::layout::ElementClass;

#[derive(Clone, Debug, PartialEq)]
pub struct FoliageParams {
    pub count: usize,
    pub scatter_radius: f32,
    pub tree_height: f32,
    pub base_radius: f32,
    /// Lower bound of the squared-radius draw; 0 gives a uniform disk, 1 a thin shell.
    pub shell_min: f32,
    pub spiral_twist: f32,
    pub speed: f32,
}

impl Default for FoliageParams {
    fn default() -> Self {
        Self {
            count: FOLIAGE_COUNT,
            scatter_radius: FOLIAGE_SCATTER_RADIUS,
            tree_height: TREE_HEIGHT,
            base_radius: FOLIAGE_BASE_RADIUS,
            shell_min: FOLIAGE_SHELL_MIN,
            spiral_twist: FOLIAGE_SPIRAL_TWIST,
            speed: FOLIAGE_MORPH_SPEED,
        }
    }
}

impl FoliageParams {
    pub fn validate(&self) -> Result<()> {
        ensure_count(ElementClass::Particle, self.count)?;
        ensure_positive("foliage scatter radius", self.scatter_radius)?;
        ensure_positive("foliage tree height", self.tree_height)?;
        ensure_positive("foliage base radius", self.base_radius)?;
        if !(0.0..=1.0).contains(&self.shell_min) {
            return Err(ConfigError::InvalidDimension {
                name: "foliage shell minimum",
                value: self.shell_min,
            });
        }
        ensure_speed(self.speed)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BaubleParams {
    pub count: usize,
    pub scatter_min_radius: f32,
    pub scatter_span: f32,
    pub tree_height: f32,
    pub base_radius: f32,
    pub surface_offset: f32,
    pub speed: f32,
}

impl Default for BaubleParams {
    fn default() -> Self {
        Self {
            count: BAUBLE_COUNT,
            scatter_min_radius: BAUBLE_SCATTER_MIN_RADIUS,
            scatter_span: BAUBLE_SCATTER_SPAN,
            tree_height: TREE_HEIGHT,
            base_radius: BAUBLE_BASE_RADIUS,
            surface_offset: BAUBLE_SURFACE_OFFSET,
            speed: ORNAMENT_MORPH_SPEED,
        }
    }
}

impl BaubleParams {
    pub fn validate(&self) -> Result<()> {
        ensure_count(ElementClass::Bauble, self.count)?;
        ensure_positive("bauble scatter radius", self.scatter_min_radius + self.scatter_span)?;
        ensure_positive("bauble tree height", self.tree_height)?;
        ensure_positive("bauble base radius", self.base_radius)?;
        ensure_speed(self.speed)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GiftParams {
    pub count: usize,
    pub scatter_radius: f32,
    pub scatter_floor: f32,
    pub scatter_height_span: f32,
    pub ring_radius: f32,
    pub ring_gap: f32,
    pub ring_span: f32,
    pub ring_winds: f32,
    pub tree_floor: f32,
    pub tree_height_span: f32,
    pub speed: f32,
}

impl Default for GiftParams {
    fn default() -> Self {
        Self {
            count: GIFT_COUNT,
            scatter_radius: GIFT_SCATTER_RADIUS,
            scatter_floor: GIFT_SCATTER_FLOOR,
            scatter_height_span: GIFT_SCATTER_HEIGHT_SPAN,
            ring_radius: GIFT_RING_RADIUS,
            ring_gap: GIFT_RING_GAP,
            ring_span: GIFT_RING_SPAN,
            ring_winds: GIFT_RING_WINDS,
            tree_floor: GIFT_TREE_FLOOR,
            tree_height_span: GIFT_TREE_HEIGHT_SPAN,
            speed: ORNAMENT_MORPH_SPEED,
        }
    }
}

impl GiftParams {
    pub fn validate(&self) -> Result<()> {
        ensure_count(ElementClass::Gift, self.count)?;
        ensure_positive("gift scatter radius", self.scatter_radius)?;
        ensure_positive("gift ring radius", self.ring_radius)?;
        ensure_positive("gift ring winds", self.ring_winds)?;
        ensure_speed(self.speed)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StarParams {
    pub apex: Vec3,
    pub scatter_min_radius: f32,
    pub scatter_span: f32,
    pub speed: f32,
    /// Upright mode starts once eased progress rises above this.
    pub upright_enter: f32,
    /// Upright mode ends once eased progress falls to or below this.
    pub upright_exit: f32,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            apex: star_apex_vec3(),
            scatter_min_radius: STAR_SCATTER_MIN_RADIUS,
            scatter_span: STAR_SCATTER_SPAN,
            speed: STAR_MORPH_SPEED,
            upright_enter: STAR_UPRIGHT_THRESHOLD,
            upright_exit: STAR_UPRIGHT_THRESHOLD,
        }
    }
}

impl StarParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("star scatter radius", self.scatter_min_radius + self.scatter_span)?;
        if self.upright_exit > self.upright_enter {
            return Err(ConfigError::InvertedHysteresis {
                enter: self.upright_enter,
                exit: self.upright_exit,
            });
        }
        ensure_speed(self.speed)
    }
}

/// Everything needed to build a [`crate::Scene`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    /// Layout seed. `None` draws a fresh layout on every construction.
    pub seed: Option<u64>,
    pub smoothing: Smoothing,
    pub easing: Easing,
    /// Device pixel ratio used for particle sizing; clamped to [`MAX_PIXEL_RATIO`].
    pub pixel_ratio: f32,
    pub foliage: FoliageParams,
    pub baubles: BaubleParams,
    pub gifts: GiftParams,
    pub star: StarParams,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            seed: None,
            smoothing: Smoothing::default(),
            easing: Easing::default(),
            pixel_ratio: 1.0,
            foliage: FoliageParams::default(),
            baubles: BaubleParams::default(),
            gifts: GiftParams::default(),
            star: StarParams::default(),
        }
    }
}

impl SceneParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0) {
            return Err(ConfigError::InvalidPixelRatio(self.pixel_ratio));
        }
        self.foliage.validate()?;
        self.baubles.validate()?;
        self.gifts.validate()?;
        self.star.validate()
    }

    #[inline]
    pub fn effective_pixel_ratio(&self) -> f32 {
        self.pixel_ratio.min(MAX_PIXEL_RATIO)
    }
}

fn ensure_count(class: ElementClass, count: usize) -> Result<()> {
    if count == 0 {
        Err(ConfigError::EmptyPopulation { class })
    } else {
        Ok(())
    }
}
