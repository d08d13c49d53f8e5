//! Plain-old-data records handed to a GPU.

use bytemuck::{Pod, Zeroable};

use crate::layout::ParticleLayout;

/// One foliage particle as uploaded once at scene creation.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub scatter: [f32; 3],
    pub tree: [f32; 3],
    pub random: f32,
}

impl From<&ParticleLayout> for ParticleVertex {
    fn from(layout: &ParticleLayout) -> Self {
        Self {
            scatter: layout.endpoints.scatter.to_array(),
            tree: layout.endpoints.tree.to_array(),
            random: layout.random,
        }
    }
}

/// Per-frame scalars the foliage shader needs; everything else is static.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FoliageFrame {
    pub time: f32,
    /// Eased morph progress.
    pub progress: f32,
    pub pixel_ratio: f32,
}
