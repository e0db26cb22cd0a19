//! Game balance and level layout
//!
//! Loaded from JSON; anything left out falls back to the stock values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::actor::{ActorConfig, Role, Spawn};
use crate::sim::combat::CombatRules;
use crate::sim::zone::{LevelPhysics, Rect, RectZones};

/// Configuration and world-building failures
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("{role:?} spawned out of bounds at ({x}, {y})")]
    SpawnOutOfBounds { role: Role, x: f32, y: f32 },
}

/// Everything needed to build a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub hero: ActorConfig,
    pub hero_spawn: Spawn,
    pub hostile: ActorConfig,
    pub hostile_spawns: Vec<Spawn>,
    pub physics: LevelPhysics,
    pub combat: CombatRules,
    /// Opacity lost per second by dead actors
    pub fade_rate: f32,
    pub layout: RectZones,
}

impl Default for Tuning {
    fn default() -> Self {
        let hostile_spawns = [600.0, 1460.0, 2602.0, 3000.0, 6402.0, 6602.0]
            .into_iter()
            .map(|x| Spawn::new(x, 381.0, true, true))
            .collect();

        Self {
            hero: ActorConfig::hero(),
            hero_spawn: Spawn::new(30.0, 381.0, true, false),
            hostile: ActorConfig::hostile(),
            hostile_spawns,
            physics: LevelPhysics::default(),
            combat: CombatRules::default(),
            fade_rate: FADE_RATE,
            layout: stock_layout(),
        }
    }
}

/// Stock level, in sprite-center coordinates. Open sky above y 300, ground
/// strips with their surface at y 453, pillars to jump, one levitation pod
/// over a chasm and one bottomless pit.
fn stock_layout() -> RectZones {
    let ground = |x0: f32, x1: f32| Rect::new(x0, 300.0, x1, 454.0);
    RectZones::new(
        vec![
            Rect::new(0.0, 0.0, 7000.0, 300.0),
            ground(0.0, 1100.0),
            ground(1160.0, 2300.0),
            ground(2360.0, 3340.0),
            Rect::new(3400.0, 300.0, 3800.0, 800.0),
            ground(3800.0, 5000.0),
            Rect::new(5000.0, 300.0, 5150.0, 800.0),
            ground(5150.0, 6200.0),
            ground(6260.0, 7000.0),
        ],
        vec![Rect::new(3400.0, 0.0, 3800.0, 800.0)],
    )
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!(
            "Loaded tuning from {} ({} hostiles)",
            path.display(),
            tuning.hostile_spawns.len()
        );
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        validate_actor("hero", &self.hero)?;
        validate_actor("hostile", &self.hostile)?;

        let p = &self.physics;
        if !(p.left_bounds < p.right_bounds) {
            return invalid(
                "physics.left_bounds",
                format!("{} must be left of right_bounds {}", p.left_bounds, p.right_bounds),
            );
        }
        if !p.gravity.is_finite() {
            return invalid("physics.gravity", "must be finite");
        }
        if !(self.fade_rate > 0.0) {
            return invalid("fade_rate", "must be positive");
        }
        if !(self.combat.hero_damage_delay_ms >= 0.0) {
            return invalid("combat.hero_damage_delay_ms", "must not be negative");
        }
        if !(self.combat.proximity_y > 0.0) {
            return invalid("combat.proximity_y", "must be positive");
        }
        if self.layout.regions.is_empty() {
            return invalid("layout.regions", "level has no traversable space");
        }
        Ok(())
    }
}

fn validate_actor(field: &'static str, config: &ActorConfig) -> Result<(), TuningError> {
    if config.max_health == 0 {
        return invalid(field, "max_health must be at least 1");
    }
    if !(config.player_speed >= 0.0) {
        return invalid(field, "player_speed must not be negative");
    }
    if !(config.attack_range > 0.0) {
        return invalid(field, "attack_range must be positive");
    }
    if !(config.min_attack_interval >= 0.0) {
        return invalid(field, "min_attack_interval must not be negative");
    }
    if !(config.sprite_interval > 0.0) {
        return invalid(field, "sprite_interval must be positive");
    }
    if !(config.sprite_size > 0.0) {
        return invalid(field, "sprite_size must be positive");
    }
    if let Some((kind, _)) = config.motions.iter().find(|(_, m)| m.num_sprites == 0) {
        return invalid(field, format!("{:?} motion has no frames", kind));
    }
    Ok(())
}

fn invalid(field: &'static str, reason: impl Into<String>) -> Result<(), TuningError> {
    Err(TuningError::Invalid {
        field,
        reason: reason.into(),
    })
}
