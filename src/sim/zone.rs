//! Level geometry queries
//!
//! The simulation never looks inside the level's geometry. Everything goes
//! through [`ZoneOracle::zone_info`], which answers two questions for a point:
//! is it traversable, and is it inside a levitation pod.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Answer for a single point query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneInfo {
    pub in_bounds: bool,
    pub levitating: bool,
}

impl ZoneInfo {
    pub const SOLID: Self = Self {
        in_bounds: false,
        levitating: false,
    };
    pub const OPEN: Self = Self {
        in_bounds: true,
        levitating: false,
    };
}

/// Point-query surface over level geometry
pub trait ZoneOracle {
    fn zone_info(&self, point: Vec2) -> ZoneInfo;
}

impl<F> ZoneOracle for F
where
    F: Fn(Vec2) -> ZoneInfo,
{
    fn zone_info(&self, point: Vec2) -> ZoneInfo {
        self(point)
    }
}

/// Axis-aligned rectangle, half-open on the max edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }
}

/// Zone oracle built from rectangles: a point is in bounds if any region
/// holds it, and levitating if it is in bounds and any pod holds it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RectZones {
    pub regions: Vec<Rect>,
    #[serde(default)]
    pub pods: Vec<Rect>,
}

impl RectZones {
    pub fn new(regions: Vec<Rect>, pods: Vec<Rect>) -> Self {
        Self { regions, pods }
    }
}

impl ZoneOracle for RectZones {
    fn zone_info(&self, point: Vec2) -> ZoneInfo {
        let in_bounds = self.regions.iter().any(|r| r.contains(point));
        ZoneInfo {
            in_bounds,
            levitating: in_bounds && self.pods.iter().any(|r| r.contains(point)),
        }
    }
}

/// Scalar physics and camera parameters of a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelPhysics {
    /// vy gain per second (px/ms per s)
    pub gravity: f32,
    /// Canvas x the camera stops tracking at when moving left
    pub left_bounds: f32,
    /// Canvas x the camera stops tracking at when moving right
    pub right_bounds: f32,
    /// World y levitation pods pull toward
    pub levitation_target_y: f32,
    /// Lower edge of the playfield
    pub floor_y: f32,
}

impl Default for LevelPhysics {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            left_bounds: LEFT_BOUNDS,
            right_bounds: RIGHT_BOUNDS,
            levitation_target_y: LEVITATION_TARGET_Y,
            floor_y: FLOOR_Y,
        }
    }
}

/// A playable level: physics parameters plus its zone oracle
pub struct Level {
    pub physics: LevelPhysics,
    zones: Box<dyn ZoneOracle>,
}

impl Level {
    pub fn new(physics: LevelPhysics, zones: impl ZoneOracle + 'static) -> Self {
        Self {
            physics,
            zones: Box::new(zones),
        }
    }

    #[inline]
    pub fn zone_info(&self, point: Vec2) -> ZoneInfo {
        self.zones.zone_info(point)
    }

    #[inline]
    pub fn in_bounds(&self, point: Vec2) -> bool {
        self.zone_info(point).in_bounds
    }

    #[inline]
    pub fn levitating(&self, point: Vec2) -> bool {
        self.zone_info(point).levitating
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Level")
            .field("physics", &self.physics)
            .finish_non_exhaustive()
    }
}
