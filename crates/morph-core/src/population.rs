//! Fixed-size element populations and the drivers that animate them.

use glam::Vec3;
use rand::Rng;

use crate::buffers::{FoliageFrame, ParticleVertex};
use crate::clock::{FrameTime, MorphClock, Smoothing};
use crate::easing::Easing;
use crate::error::{ConfigError, Result};
use crate::layout::{
    generate_baubles, generate_gifts, generate_particles, generate_star, BaubleLayout,
    ElementClass, GiftLayout, Layout, ParticleLayout, StarLayout,
};
use crate::params::{BaubleParams, FoliageParams, GiftParams, StarParams};
use crate::pose::{bauble_pose, gift_pose, particle_position, Pose, StarMotion};

/// Same-class elements sharing one morph clock. Never resized.
#[derive(Clone, Debug)]
pub struct Population<L: Layout> {
    layouts: Box<[L]>,
    clock: MorphClock,
    easing: Easing,
}

impl<L: Layout> Population<L> {
    pub fn new(layouts: Vec<L>, clock: MorphClock, easing: Easing) -> Result<Self> {
        if layouts.is_empty() {
            return Err(ConfigError::EmptyPopulation { class: L::CLASS });
        }
        Ok(Self {
            layouts: layouts.into_boxed_slice(),
            clock,
            easing,
        })
    }

    #[inline]
    pub fn class(&self) -> ElementClass {
        L::CLASS
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    #[inline]
    pub fn layouts(&self) -> &[L] {
        &self.layouts
    }

    #[inline]
    pub fn morph_factor(&self) -> f32 {
        self.clock.factor()
    }

    /// Eased morph factor used for blending.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.easing.apply(self.clock.factor())
    }

    /// Step the clock toward `target` and return the new eased progress.
    pub fn advance(&mut self, target: f32, frame: FrameTime) -> f32 {
        self.clock.tick(target, frame.delta);
        self.progress()
    }
}

// ---------------- Foliage ----------------

/// Point-cloud driver. A GPU host uploads [`FoliageDriver::vertices`] once and
/// feeds [`FoliageDriver::frame_uniforms`] every frame; a CPU host calls
/// [`FoliageDriver::positions_into`] instead.
#[derive(Clone, Debug)]
pub struct FoliageDriver {
    population: Population<ParticleLayout>,
    pixel_ratio: f32,
    time: f32,
}

impl FoliageDriver {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        params: &FoliageParams,
        smoothing: Smoothing,
        easing: Easing,
        pixel_ratio: f32,
    ) -> Result<Self> {
        params.validate()?;
        let layouts = generate_particles(rng, params);
        log::debug!("generated {} foliage particles", layouts.len());
        Self::from_population(
            Population::new(layouts, MorphClock::new(params.speed, smoothing)?, easing)?,
            pixel_ratio,
        )
    }

    pub fn from_population(population: Population<ParticleLayout>, pixel_ratio: f32) -> Result<Self> {
        if !(pixel_ratio.is_finite() && pixel_ratio > 0.0) {
            return Err(ConfigError::InvalidPixelRatio(pixel_ratio));
        }
        Ok(Self {
            population,
            pixel_ratio,
            time: 0.0,
        })
    }

    #[inline]
    pub fn population(&self) -> &Population<ParticleLayout> {
        &self.population
    }

    pub fn update(&mut self, target: f32, frame: FrameTime) {
        self.population.advance(target, frame);
        self.time = frame.elapsed;
    }

    /// Static vertex records; upload once.
    pub fn vertices(&self) -> Vec<ParticleVertex> {
        self.population.layouts().iter().map(ParticleVertex::from).collect()
    }

    pub fn frame_uniforms(&self) -> FoliageFrame {
        FoliageFrame {
            time: self.time,
            progress: self.population.progress(),
            pixel_ratio: self.pixel_ratio,
        }
    }

    /// Host-side evaluation of the same formula the foliage shader runs.
    pub fn positions_into(&self, out: &mut Vec<Vec3>) {
        let progress = self.population.progress();
        out.clear();
        out.extend(
            self.population
                .layouts()
                .iter()
                .map(|p| particle_position(p, progress, self.time)),
        );
    }
}

// ---------------- Ornaments ----------------

/// Instanced baubles and gifts, posed on the CPU every frame.
#[derive(Clone, Debug)]
pub struct OrnamentDriver {
    baubles: Population<BaubleLayout>,
    gifts: Population<GiftLayout>,
    bauble_poses: Vec<Pose>,
    gift_poses: Vec<Pose>,
}

impl OrnamentDriver {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        bauble_params: &BaubleParams,
        gift_params: &GiftParams,
        smoothing: Smoothing,
        easing: Easing,
    ) -> Result<Self> {
        bauble_params.validate()?;
        gift_params.validate()?;
        let baubles = generate_baubles(rng, bauble_params);
        let gifts = generate_gifts(rng, gift_params);
        log::debug!("generated {} baubles and {} gifts", baubles.len(), gifts.len());
        Ok(Self::from_populations(
            Population::new(baubles, MorphClock::new(bauble_params.speed, smoothing)?, easing)?,
            Population::new(gifts, MorphClock::new(gift_params.speed, smoothing)?, easing)?,
        ))
    }

    pub fn from_populations(
        baubles: Population<BaubleLayout>,
        gifts: Population<GiftLayout>,
    ) -> Self {
        let mut driver = Self {
            bauble_poses: Vec::with_capacity(baubles.len()),
            gift_poses: Vec::with_capacity(gifts.len()),
            baubles,
            gifts,
        };
        driver.write_poses(0.0);
        driver
    }

    #[inline]
    pub fn baubles(&self) -> &Population<BaubleLayout> {
        &self.baubles
    }

    #[inline]
    pub fn gifts(&self) -> &Population<GiftLayout> {
        &self.gifts
    }

    #[inline]
    pub fn bauble_poses(&self) -> &[Pose] {
        &self.bauble_poses
    }

    #[inline]
    pub fn gift_poses(&self) -> &[Pose] {
        &self.gift_poses
    }

    /// Instance colours; fixed at creation.
    pub fn bauble_colors(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.baubles.layouts().iter().map(|b| b.color)
    }

    pub fn gift_colors(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.gifts.layouts().iter().map(|g| g.color)
    }

    pub fn update(&mut self, target: f32, frame: FrameTime) {
        self.baubles.advance(target, frame);
        self.gifts.advance(target, frame);
        self.write_poses(frame.elapsed);
    }

    fn write_poses(&mut self, time: f32) {
        let progress = self.baubles.progress();
        self.bauble_poses.clear();
        self.bauble_poses.extend(
            self.baubles
                .layouts()
                .iter()
                .map(|b| bauble_pose(b, progress, time)),
        );

        let progress = self.gifts.progress();
        self.gift_poses.clear();
        self.gift_poses.extend(
            self.gifts
                .layouts()
                .iter()
                .map(|g| gift_pose(g, progress, time)),
        );
    }
}

// ---------------- Star ----------------

#[derive(Clone, Debug)]
pub struct StarDriver {
    population: Population<StarLayout>,
    motion: StarMotion,
    pose: Pose,
}

impl StarDriver {
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        params: &StarParams,
        smoothing: Smoothing,
        easing: Easing,
    ) -> Result<Self> {
        params.validate()?;
        let layout = generate_star(rng, params);
        log::debug!("star scatter endpoint {:?}", layout.endpoints.scatter);
        let population =
            Population::new(vec![layout], MorphClock::new(params.speed, smoothing)?, easing)?;
        Ok(Self::from_population(
            population,
            StarMotion::new(params.upright_enter, params.upright_exit),
        ))
    }

    pub fn from_population(population: Population<StarLayout>, motion: StarMotion) -> Self {
        let pose = motion.pose(&population.layouts()[0], population.progress());
        Self {
            population,
            motion,
            pose,
        }
    }

    #[inline]
    pub fn population(&self) -> &Population<StarLayout> {
        &self.population
    }

    #[inline]
    pub fn motion(&self) -> &StarMotion {
        &self.motion
    }

    #[inline]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn update(&mut self, target: f32, frame: FrameTime) {
        let progress = self.population.advance(target, frame);
        self.motion.step(progress, frame);
        self.pose = self.motion.pose(&self.population.layouts()[0], progress);
    }
}
