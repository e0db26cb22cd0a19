//! Pod Brawler - A side-scrolling brawler simulation core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (actors, physics, combat, game loop)
//! - `tuning`: Data-driven game balance and level layout

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Side length of one square sprite cell (pixels)
    pub const SPRITE_SIZE: f32 = 144.0;

    /// Full fade from opaque to invisible in 1s
    pub const FADE_RATE: f32 = 1.0;
    /// Opacity below this snaps to zero (absorbs f32 drift)
    pub const FADE_EPSILON: f32 = 1e-4;

    /// Duration of the white hit flash after taking damage (ms)
    pub const HIT_FLASH_MS: f64 = 200.0;
    /// Delay between a hostile starting an attack and the hero taking damage (ms)
    pub const HERO_DAMAGE_DELAY_MS: f64 = 200.0;
    /// Vertical proximity window for attacks (pixels)
    pub const PROXIMITY_Y: f32 = 30.0;

    /// Downward acceleration (vy gains GRAVITY px/ms every second)
    pub const GRAVITY: f32 = 3.0;
    /// Upward impulse seeded into vy by a jump (px/ms)
    pub const JUMP_IMPULSE: f32 = -1.0;
    /// Height levitation pods pull actors toward (world y)
    pub const LEVITATION_TARGET_Y: f32 = 65.0;
    /// Proportional gain divisor for levitation pull
    pub const LEVITATION_DAMPING: f32 = 200.0;

    /// Camera follows the hero only between these canvas x positions
    pub const LEFT_BOUNDS: f32 = 100.0;
    pub const RIGHT_BOUNDS: f32 = 500.0;
    /// Canvas height; actors whose sprite drops below this die
    pub const FLOOR_Y: f32 = 600.0;

    /// Distance a patrolling hostile looks ahead before turning (pixels)
    pub const PATROL_PROBE: f32 = 5.0;
    /// Frames between average FPS samples
    pub const FPS_SAMPLE_FRAMES: u64 = 20;
    /// Hard cap on unit steps in one boundary search
    pub const MAX_STEP_SEARCH: u32 = 10_000;
}

/// Signed unit for a facing direction (+1 right, -1 left)
#[inline]
pub fn facing_sign(facing_right: bool) -> f32 {
    if facing_right { 1.0 } else { -1.0 }
}
