//! Actors: the hero and the hostiles share one type
//!
//! An actor is parameterized by an [`ActorConfig`] (speeds, ranges, motion
//! table) and tagged with a [`Role`] that only the combat coordinator reads.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::events::{ActorId, DeferredKind, EventQueue};
use super::motion::{Motion, MotionKind, MotionTable};
use crate::consts::*;

/// Which side an actor fights on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Hero,
    Hostile,
}

/// Immutable per-actor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Horizontal run speed (px/s)
    pub player_speed: f32,
    /// Horizontal reach when initiating an attack (px)
    pub attack_range: f32,
    /// Cooldown between attacks (ms)
    pub min_attack_interval: f64,
    pub max_health: u32,
    /// Time per animation frame (ms)
    pub sprite_interval: f32,
    pub motions: MotionTable,
    pub start_motion: MotionKind,
    #[serde(default = "default_sprite_size")]
    pub sprite_size: f32,
}

fn default_sprite_size() -> f32 {
    SPRITE_SIZE
}

impl ActorConfig {
    pub fn hero() -> Self {
        Self {
            player_speed: 300.0,
            attack_range: 100.0,
            min_attack_interval: 200.0,
            max_health: 3,
            sprite_interval: 90.0,
            motions: MotionTable::HERO,
            start_motion: MotionKind::Standing,
            sprite_size: SPRITE_SIZE,
        }
    }

    pub fn hostile() -> Self {
        Self {
            player_speed: 100.0,
            attack_range: 100.0,
            min_attack_interval: 2000.0,
            max_health: 3,
            sprite_interval: 160.0,
            motions: MotionTable::HOSTILE,
            start_motion: MotionKind::Running,
            sprite_size: SPRITE_SIZE,
        }
    }
}

/// Where and how an actor enters the level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spawn {
    pub x: f32,
    pub y: f32,
    pub facing_right: bool,
    #[serde(default)]
    pub moving: bool,
}

impl Spawn {
    pub fn new(x: f32, y: f32, facing_right: bool, moving: bool) -> Self {
        Self {
            x,
            y,
            facing_right,
            moving,
        }
    }
}

/// A hero or hostile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub role: Role,
    pub config: ActorConfig,
    /// Top-left of the sprite cell in world space
    pub pos: Vec2,
    /// Velocity (px/ms); `x` records the horizontal step taken last frame
    pub vel: Vec2,
    pub facing_right: bool,
    pub health: u32,
    pub alive: bool,
    pub opacity: f32,
    pub moving: bool,
    pub airborne: bool,
    pub attacking: bool,
    pub can_attack: bool,
    /// Draw from the white hit sheet
    pub hit_flash: bool,
    pub motion: MotionKind,
    pub last_motion: MotionKind,
    pub sprite_seq: u32,
    pub time_since_last_sprite_frame: f32,
}

impl Actor {
    pub fn new(id: ActorId, role: Role, config: ActorConfig, spawn: Spawn) -> Self {
        let start = config.start_motion;
        Self {
            id,
            role,
            pos: Vec2::new(spawn.x, spawn.y),
            vel: Vec2::ZERO,
            facing_right: spawn.facing_right,
            health: config.max_health,
            alive: true,
            opacity: 1.0,
            moving: spawn.moving,
            airborne: false,
            attacking: false,
            can_attack: true,
            hit_flash: false,
            motion: start,
            last_motion: start,
            sprite_seq: 0,
            time_since_last_sprite_frame: 0.0,
            config,
        }
    }

    pub fn is_hero(&self) -> bool {
        self.role == Role::Hero
    }

    /// Descriptor of the active motion
    pub fn current_motion(&self) -> &Motion {
        self.config.motions.get(self.motion)
    }

    /// Center of the sprite cell, snapped to whole pixels
    pub fn center(&self) -> Vec2 {
        let half = self.config.sprite_size / 2.0;
        Vec2::new(self.pos.x.round() + half, self.pos.y.round() + half)
    }

    /// Whether `x` lies strictly on the side this actor faces
    pub fn faces(&self, x: f32) -> bool {
        if self.facing_right {
            x - self.pos.x > 0.0
        } else {
            self.pos.x - x > 0.0
        }
    }

    /// Dead and fully faded
    pub fn is_removable(&self) -> bool {
        !self.alive && self.opacity <= 0.0
    }

    /// Start an attack if the cooldown allows. Returns whether it started.
    pub fn attack(&mut self, events: &mut EventQueue) -> bool {
        if !self.can_attack {
            return false;
        }
        self.attacking = true;
        self.can_attack = false;
        events.schedule(
            self.config.min_attack_interval,
            self.id,
            DeferredKind::AttackReady,
        );
        true
    }

    pub fn move_right(&mut self) {
        self.moving = true;
        self.facing_right = true;
    }

    pub fn move_left(&mut self) {
        self.moving = true;
        self.facing_right = false;
    }

    pub fn stop(&mut self) {
        self.moving = false;
    }

    pub fn jump(&mut self) {
        if !self.airborne {
            self.airborne = true;
            self.vel.y = JUMP_IMPULSE;
        }
    }

    /// Lose one health (floored at 0) and flash white for a moment
    pub fn damage(&mut self, events: &mut EventQueue) {
        self.health = self.health.saturating_sub(1);
        self.hit_flash = true;
        events.schedule(HIT_FLASH_MS, self.id, DeferredKind::HitFlashEnd);
        log::debug!("{:?} {:?} hit, health {}", self.role, self.id, self.health);
    }

    /// Flip to dead if health ran out or the sprite dropped below `floor_y`.
    /// Returns true on the transition.
    pub fn settle_life(&mut self, floor_y: f32) -> bool {
        if !self.alive {
            return false;
        }
        let fell = self.pos.y + self.config.sprite_size > floor_y;
        if self.health == 0 || fell {
            self.alive = false;
            log::debug!(
                "{:?} {:?} died ({})",
                self.role,
                self.id,
                if fell { "fell" } else { "health" }
            );
            return true;
        }
        false
    }

    /// Pick the motion for this frame from the action flags
    pub fn update_animation_motion(&mut self) {
        // Attack finishes once its own animation reaches the last frame
        if self.attacking
            && self.motion == MotionKind::Attacking
            && self.sprite_seq >= self.current_motion().last_frame()
        {
            self.attacking = false;
        }

        self.motion = if self.attacking {
            MotionKind::Attacking
        } else if self.airborne {
            MotionKind::Airborne
        } else {
            self.vel.y = 0.0;
            if self.moving {
                MotionKind::Running
            } else {
                MotionKind::Standing
            }
        };
    }

    /// Advance the sprite frame by elapsed time
    pub fn update_animation_frame(&mut self, dt_ms: f32) {
        self.time_since_last_sprite_frame += dt_ms;

        if self.time_since_last_sprite_frame > self.config.sprite_interval {
            let motion = *self.current_motion();
            if self.sprite_seq < motion.last_frame() {
                self.sprite_seq += 1;
            } else if motion.looping {
                self.sprite_seq = 0;
            }
            self.time_since_last_sprite_frame = 0.0;
        }

        if self.motion != self.last_motion {
            self.sprite_seq = 0;
            self.last_motion = self.motion;
        }
    }

    /// Fade a dead actor toward invisible
    pub fn fade(&mut self, dt_ms: f32, fade_rate: f32) {
        if self.alive || self.opacity <= 0.0 {
            return;
        }
        self.opacity -= dt_ms.max(0.0) * fade_rate / 1000.0;
        if self.opacity < FADE_EPSILON {
            self.opacity = 0.0;
        }
    }
}
