//! Easing curves and scalar blend helpers.

/// Reparametrization applied to a raw morph factor before position blending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    /// Raw factor, no shaping.
    Linear,
    /// Cubic ease-in-out: slow start, fast middle, slow finish.
    #[default]
    CubicInOut,
}

impl Easing {
    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Easing::Linear => x.clamp(0.0, 1.0),
            Easing::CubicInOut => ease_in_out_cubic(x),
        }
    }
}

/// `4x³` below the midpoint, `1 - (-2x + 2)³ / 2` above it. Input is clamped to [0, 1].
#[inline]
pub fn ease_in_out_cubic(x: f32) -> f32 {
    let x = x.clamp(0.0, 1.0);
    if x < 0.5 {
        4.0 * x * x * x
    } else {
        1.0 - (-2.0 * x + 2.0).powi(3) / 2.0
    }
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_is_symmetric_around_midpoint() {
        for i in 0..=50 {
            let t = i as f32 / 100.0;
            let lo = ease_in_out_cubic(t);
            let hi = ease_in_out_cubic(1.0 - t);
            assert!((lo + hi - 1.0).abs() < 1e-5, "asymmetric at {t}");
        }
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(ease_in_out_cubic(-0.5), 0.0);
        assert_eq!(ease_in_out_cubic(1.5), 1.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp(3.0, 7.0, 0.0), 3.0);
        assert_eq!(lerp(3.0, 7.0, 1.0), 7.0);
        assert!((lerp(1.0, 0.1, 0.5) - 0.55).abs() < 1e-6);
    }
}
