use crate::clock::FrameTime;
use crate::error::Result;
use crate::layout::{class_rng, ElementClass};
use crate::params::SceneParams;
use crate::population::{FoliageDriver, OrnamentDriver, StarDriver};
use crate::state::TreeState;

/// All populations of one mounted scene plus the toggle they follow.
///
/// Built once; layouts are never regenerated. Dropping the scene is teardown.
#[derive(Clone, Debug)]
pub struct Scene {
    state: TreeState,
    frame: FrameTime,
    foliage: FoliageDriver,
    ornaments: OrnamentDriver,
    star: StarDriver,
}

impl Scene {
    pub fn new(params: &SceneParams) -> Result<Self> {
        params.validate()?;
        let seed = params.seed;
        let foliage = FoliageDriver::generate(
            &mut class_rng(seed, ElementClass::Particle),
            &params.foliage,
            params.smoothing,
            params.easing,
            params.effective_pixel_ratio(),
        )?;
        // Baubles and gifts come from the same ornament stream.
        let ornaments = OrnamentDriver::generate(
            &mut class_rng(seed, ElementClass::Bauble),
            &params.baubles,
            &params.gifts,
            params.smoothing,
            params.easing,
        )?;
        let star = StarDriver::generate(
            &mut class_rng(seed, ElementClass::Star),
            &params.star,
            params.smoothing,
            params.easing,
        )?;
        log::info!(
            "scene ready: {} particles, {} baubles, {} gifts, seed {:?}",
            foliage.population().len(),
            ornaments.baubles().len(),
            ornaments.gifts().len(),
            seed
        );
        Ok(Self {
            state: TreeState::default(),
            frame: FrameTime::default(),
            foliage,
            ornaments,
            star,
        })
    }

    #[inline]
    pub fn state(&self) -> TreeState {
        self.state
    }

    pub fn set_state(&mut self, state: TreeState) {
        if state != self.state {
            log::info!("tree state -> {:?}", state);
            self.state = state;
        }
    }

    /// Flip the toggle and return the new state.
    pub fn toggle(&mut self) -> TreeState {
        self.set_state(self.state.toggled());
        self.state
    }

    /// The per-frame callback. `delta` is clamped before use.
    pub fn frame(&mut self, elapsed: f32, delta: f32) -> FrameTime {
        let frame = FrameTime::new(elapsed, delta);
        let target = self.state.target_morph();
        self.foliage.update(target, frame);
        self.ornaments.update(target, frame);
        self.star.update(target, frame);
        self.frame = frame;
        frame
    }

    #[inline]
    pub fn last_frame(&self) -> FrameTime {
        self.frame
    }

    #[inline]
    pub fn foliage(&self) -> &FoliageDriver {
        &self.foliage
    }

    #[inline]
    pub fn ornaments(&self) -> &OrnamentDriver {
        &self.ornaments
    }

    #[inline]
    pub fn star(&self) -> &StarDriver {
        &self.star
    }
}
