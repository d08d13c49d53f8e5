//! Construction-time contract violations.
//!
//! Frame updates never fail; everything that can go wrong is caught when a
//! population or scene is built from its parameters.

use crate::layout::ElementClass;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{class:?} population must contain at least one element")]
    EmptyPopulation { class: ElementClass },

    #[error("morph speed must be positive and finite, got {0}")]
    InvalidSpeed(f32),

    #[error("{name} must be positive and finite, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },

    #[error("pixel ratio must be positive and finite, got {0}")]
    InvalidPixelRatio(f32),

    #[error("star upright exit threshold {exit} is above enter threshold {enter}")]
    InvertedHysteresis { enter: f32, exit: f32 },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Reject zero, negative, NaN and infinite values for a named dimension.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDimension { name, value })
    }
}

pub(crate) fn ensure_speed(value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpeed(value))
    }
}
