//! Per-population morph factor smoothing and frame timing.

use crate::constants::MAX_FRAME_DELTA_SEC;
use crate::error::{ensure_speed, Result};

/// How far a clock moves toward its target in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Smoothing {
    /// `lerp(factor, target, delta * speed)`. Frame-rate dependent.
    #[default]
    Linear,
    /// `1 - exp(-speed * delta)`. Same convergence at any frame rate.
    Exponential,
}

impl Smoothing {
    /// Fraction of the remaining distance covered this frame, always in [0, 1].
    #[inline]
    pub fn step_fraction(self, speed: f32, delta: f32) -> f32 {
        let fraction = match self {
            Smoothing::Linear => speed * delta,
            Smoothing::Exponential => 1.0 - (-speed * delta).exp(),
        };
        fraction.clamp(0.0, 1.0)
    }
}

/// Timing handed to every population once per display refresh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the scene started, monotonic.
    pub elapsed: f32,
    /// Seconds since the previous frame, already clamped.
    pub delta: f32,
}

impl FrameTime {
    pub fn new(elapsed: f32, delta: f32) -> Self {
        Self {
            elapsed: if elapsed.is_finite() { elapsed } else { 0.0 },
            delta: clamp_delta(delta),
        }
    }
}

/// Clamp a raw frame delta to `[0, MAX_FRAME_DELTA_SEC]`; NaN becomes 0.
#[inline]
pub fn clamp_delta(delta: f32) -> f32 {
    if !delta.is_finite() {
        log::trace!("non-finite frame delta {delta} treated as 0");
        return 0.0;
    }
    if delta <= 0.0 {
        return 0.0;
    }
    if delta > MAX_FRAME_DELTA_SEC {
        log::trace!("frame delta {delta:.3}s clamped to {MAX_FRAME_DELTA_SEC}s");
        return MAX_FRAME_DELTA_SEC;
    }
    delta
}

/// The one piece of cross-frame state a population owns.
///
/// The factor is 0 when fully scattered and 1 when fully assembled. It moves
/// toward its target asymptotically and is clamped to [0, 1] after every step.
#[derive(Clone, Debug, PartialEq)]
pub struct MorphClock {
    factor: f32,
    speed: f32,
    smoothing: Smoothing,
}

impl MorphClock {
    pub fn new(speed: f32, smoothing: Smoothing) -> Result<Self> {
        ensure_speed(speed)?;
        Ok(Self {
            factor: 0.0,
            speed,
            smoothing,
        })
    }

    /// Start from a given factor instead of fully scattered.
    pub fn with_factor(mut self, factor: f32) -> Self {
        self.factor = sanitize(factor);
        self
    }

    #[inline]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Advance one frame toward `target` and return the new factor.
    pub fn tick(&mut self, target: f32, delta: f32) -> f32 {
        let target = sanitize(target);
        let alpha = self.smoothing.step_fraction(self.speed, clamp_delta(delta));
        self.factor = sanitize(self.factor + (target - self.factor) * alpha);
        self.factor
    }
}

#[inline]
fn sanitize(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
