use glam::Vec3;

// Shared layout/animation tuning constants used by the core and the native frontend.

// Scene layout
pub const SCENE_OFFSET: [f32; 3] = [0.0, -2.0, 0.0]; // world-space offset applied to every population
pub const TREE_HEIGHT: f32 = 10.0; // shared cone height for foliage and baubles

// Frame timing
pub const MAX_FRAME_DELTA_SEC: f32 = 0.1; // clamp for delta time after stalls/backgrounding

// Foliage (point cloud)
pub const FOLIAGE_COUNT: usize = 8000;
pub const FOLIAGE_SCATTER_RADIUS: f32 = 12.0;
pub const FOLIAGE_BASE_RADIUS: f32 = 3.5;
pub const FOLIAGE_SHELL_MIN: f32 = 0.2; // radius = base * sqrt(U * (1 - min) + min)
pub const FOLIAGE_SPIRAL_TWIST: f32 = 10.0; // radians of extra azimuth from base to apex
pub const FOLIAGE_MORPH_SPEED: f32 = 2.0;
pub const FOLIAGE_BREATH_RATE: f32 = 2.0; // angular rate of the breathing offset
pub const FOLIAGE_BREATH_PHASE_SCALE: f32 = 10.0; // random attribute -> phase
pub const FOLIAGE_BREATH_AMPLITUDE: f32 = 0.05;
pub const FOLIAGE_FLOAT_SCATTERED: f32 = 1.0; // breathing multiplier when fully scattered
pub const FOLIAGE_FLOAT_ASSEMBLED: f32 = 0.1; // breathing multiplier when fully assembled
pub const FOLIAGE_POINT_BASE_PX: f32 = 4.0;
pub const FOLIAGE_POINT_RANDOM_PX: f32 = 2.0;
pub const FOLIAGE_POINT_ATTENUATION: f32 = 20.0; // size scales with attenuation / view depth
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Baubles (instanced spheres)
pub const BAUBLE_COUNT: usize = 150;
pub const BAUBLE_SCATTER_MIN_RADIUS: f32 = 4.0;
pub const BAUBLE_SCATTER_SPAN: f32 = 14.0;
pub const BAUBLE_BASE_RADIUS: f32 = 3.8; // slightly wider than the foliage cone
pub const BAUBLE_SURFACE_OFFSET: f32 = 0.1; // sits just outside the cone surface
pub const BAUBLE_SCALE_MIN: f32 = 0.15;
pub const BAUBLE_SCALE_SPAN: f32 = 0.25;
pub const BAUBLE_GOLD_PROBABILITY: f32 = 0.4;
pub const BAUBLE_FLOAT_SPEED_MIN: f32 = 0.5;
pub const BAUBLE_FLOAT_AMPLITUDE: f32 = 0.5; // multiplied by (1 - progress)
pub const BAUBLE_SPIN_RATE: f32 = 0.2; // radians per second around +Y
pub const ORNAMENT_MORPH_SPEED: f32 = 1.5;

// Gifts (instanced boxes)
pub const GIFT_COUNT: usize = 40;
pub const GIFT_SCATTER_RADIUS: f32 = 8.0;
pub const GIFT_SCATTER_FLOOR: f32 = -5.0;
pub const GIFT_SCATTER_HEIGHT_SPAN: f32 = 3.0;
pub const GIFT_RING_RADIUS: f32 = 4.2;
pub const GIFT_RING_GAP: f32 = 0.5;
pub const GIFT_RING_SPAN: f32 = 1.5;
pub const GIFT_RING_WINDS: f32 = 2.0; // times the gift ring wraps the base
pub const GIFT_TREE_FLOOR: f32 = -5.0;
pub const GIFT_TREE_HEIGHT_SPAN: f32 = 1.5;
pub const GIFT_SCALE_MIN: f32 = 0.4;
pub const GIFT_SCALE_SPAN: f32 = 0.4;
pub const GIFT_BURGUNDY_PROBABILITY: f32 = 0.5;

// Star (apex mesh)
pub const STAR_APEX: [f32; 3] = [0.0, 5.8, 0.0]; // foliage tops out at +5
pub const STAR_SCATTER_MIN_RADIUS: f32 = 10.0;
pub const STAR_SCATTER_SPAN: f32 = 8.0;
pub const STAR_MORPH_SPEED: f32 = 1.5;
pub const STAR_UPRIGHT_THRESHOLD: f32 = 0.8;
pub const STAR_SPIN_RATE: f32 = 0.5;
pub const STAR_TILT_DAMPING: f32 = 2.0;
pub const STAR_TUMBLE_RATES: [f32; 3] = [0.2, 0.2, 0.1];
pub const STAR_FLOAT_RATE: f32 = 1.5;
pub const STAR_FLOAT_SCATTERED: f32 = 0.5;
pub const STAR_FLOAT_ASSEMBLED: f32 = 0.05;
pub const STAR_POINTS: usize = 5;
pub const STAR_OUTER_RADIUS: f32 = 1.0;
pub const STAR_INNER_RADIUS: f32 = 0.5;
pub const STAR_DEPTH: f32 = 0.3;

// Palette (linear-ish sRGB triples)
pub const GOLD: [f32; 3] = [1.0, 0.843, 0.0]; // #FFD700
pub const SILVER: [f32; 3] = [0.753, 0.753, 0.753]; // #C0C0C0
pub const BURGUNDY: [f32; 3] = [0.502, 0.0, 0.125]; // #800020
pub const EMERALD: [f32; 3] = [0.012, 0.271, 0.157]; // #034528
pub const FOLIAGE_LOW: [f32; 3] = [0.012, 0.220, 0.125]; // #033820
pub const FOLIAGE_HIGH: [f32; 3] = GOLD;
pub const STAR_EMISSIVE: [f32; 3] = [1.0, 0.533, 0.0]; // #FF8800

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 2.0, 25.0];
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 100.0;
pub const CAMERA_MIN_DISTANCE: f32 = 10.0;
pub const CAMERA_MAX_DISTANCE: f32 = 40.0;
pub const CAMERA_AUTO_ROTATE_PERIOD_SEC: f32 = 120.0; // one orbit while assembled

#[inline]
pub fn scene_offset_vec3() -> Vec3 {
    Vec3::from(SCENE_OFFSET)
}

#[inline]
pub fn star_apex_vec3() -> Vec3 {
    Vec3::from(STAR_APEX)
}
