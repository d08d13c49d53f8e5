pub mod buffers;
pub mod clock;
pub mod constants;
pub mod easing;
pub mod error;
pub mod layout;
pub mod params;
pub mod population;
pub mod pose;
pub mod scene;
pub mod state;

pub use buffers::*;
pub use clock::*;
pub use constants::*;
pub use easing::*;
pub use error::ConfigError;
pub use layout::*;
pub use params::*;
pub use population::*;
pub use pose::*;
pub use scene::*;
pub use state::*;

// Shaders bundled as string constants
pub static FOLIAGE_WGSL: &str = include_str!("../shaders/foliage.wgsl");
pub static ORNAMENT_WGSL: &str = include_str!("../shaders/ornament.wgsl");
