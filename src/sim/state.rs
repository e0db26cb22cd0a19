//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`]. Rendering and UI
//! read it through [`ActorView`], [`HealthDisplay`] and the phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, Role, Spawn};
use super::combat::{CombatRules, DelayedDamagePolicy};
use super::events::{ActorId, DeferredKind, EventQueue};
use super::zone::{Level, LevelPhysics, ZoneOracle};
use crate::consts::*;
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level built, waiting for start
    Ready,
    /// Active gameplay
    Playing,
    /// Hero died
    HeroDefeated,
    /// Every hostile removed
    Victory,
}

impl GamePhase {
    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::HeroDefeated | GamePhase::Victory)
    }
}

/// Horizontal camera follow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Horizontal offset added to world x to get canvas x
    pub level_x: f32,
    /// Where the hero is drawn on the canvas
    pub hero_canvas: Vec2,
}

impl Camera {
    pub fn new(hero: &Actor) -> Self {
        Self {
            level_x: 0.0,
            hero_canvas: hero.pos,
        }
    }

    /// Follow the hero's last displacement, only while the hero stays inside
    /// the canvas window between the left and right bounds. Left of the left
    /// bound the hero is drawn at its world position.
    pub fn follow(&mut self, old_hero_x: f32, hero: &Actor, physics: &LevelPhysics) {
        self.hero_canvas.y = hero.pos.y;
        let diff_x = hero.pos.x - old_hero_x;
        let new_canvas_x = self.hero_canvas.x + diff_x;

        if diff_x > 0.0 && new_canvas_x < physics.right_bounds {
            self.hero_canvas.x += diff_x;
        }
        if diff_x < 0.0 && new_canvas_x > physics.left_bounds {
            self.hero_canvas.x += diff_x;
        }
        if hero.pos.x < physics.left_bounds {
            self.hero_canvas.x = hero.pos.x;
        }

        self.level_x = self.hero_canvas.x - hero.pos.x;
    }

    /// World position to canvas position
    #[inline]
    pub fn to_canvas(&self, world: Vec2) -> Vec2 {
        world + Vec2::new(self.level_x, 0.0)
    }
}

/// Read-only projection of hero health for the health bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthDisplay {
    pub health: u32,
    pub max_health: u32,
}

impl HealthDisplay {
    /// Filled width of a bar `max_width` wide
    pub fn fill_width(&self, max_width: f32) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        max_width * self.health as f32 / self.max_health as f32
    }
}

/// Frame rate sampling for the HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameStats {
    /// Average FPS, resampled every [`FPS_SAMPLE_FRAMES`] frames
    pub avg_fps: f32,
}

impl FrameStats {
    pub fn record(&mut self, frame: u64, dt_ms: f32) {
        if frame % FPS_SAMPLE_FRAMES == 0 && dt_ms > 0.0 {
            self.avg_fps = (1000.0 / dt_ms * 10.0).round() / 10.0;
        }
    }
}

/// What the renderer needs to draw one actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorView {
    pub id: ActorId,
    /// Canvas position of the sprite's top-left corner
    pub pos: Vec2,
    /// Top-left of the source cell in the sprite sheet
    pub src: Vec2,
    pub size: f32,
    pub opacity: f32,
    /// Sprites face left; the renderer mirrors when this is set
    pub facing_right: bool,
    /// Draw from the hit sheet instead of the normal sheet
    pub hit_flash: bool,
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    pub phase: GamePhase,
    pub hero: Actor,
    /// Surviving hostiles, in spawn order
    pub hostiles: Vec<Actor>,
    pub level: Level,
    pub camera: Camera,
    pub events: EventQueue,
    pub rules: CombatRules,
    /// Opacity lost per second by dead actors
    pub fade_rate: f32,
    /// Frames simulated while playing
    pub frame: u64,
    pub stats: FrameStats,
}

impl GameState {
    /// Assemble a game. Every actor must start with its center in bounds.
    pub fn new(
        level: Level,
        hero: Actor,
        hostiles: Vec<Actor>,
        rules: CombatRules,
    ) -> Result<Self, TuningError> {
        for actor in std::iter::once(&hero).chain(hostiles.iter()) {
            if !level.in_bounds(actor.center()) {
                return Err(TuningError::SpawnOutOfBounds {
                    role: actor.role,
                    x: actor.pos.x,
                    y: actor.pos.y,
                });
            }
        }
        log::info!(
            "Level ready: hero at ({}, {}), {} hostiles",
            hero.pos.x,
            hero.pos.y,
            hostiles.len()
        );

        Ok(Self {
            phase: GamePhase::Ready,
            camera: Camera::new(&hero),
            hero,
            hostiles,
            level,
            events: EventQueue::new(),
            rules,
            fade_rate: FADE_RATE,
            frame: 0,
            stats: FrameStats::default(),
        })
    }

    /// Build the level described by `tuning`, using its rectangle layout
    pub fn from_tuning(tuning: &Tuning) -> Result<Self, TuningError> {
        Self::with_zones(tuning, tuning.layout.clone())
    }

    /// Build actors and rules from `tuning` over a custom zone oracle
    pub fn with_zones(
        tuning: &Tuning,
        zones: impl ZoneOracle + 'static,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        let level = Level::new(tuning.physics, zones);
        let hero = Actor::new(ActorId::HERO, Role::Hero, tuning.hero.clone(), tuning.hero_spawn);
        let hostiles = spawn_hostiles(tuning, &tuning.hostile_spawns);
        let mut state = Self::new(level, hero, hostiles, tuning.combat)?;
        state.fade_rate = tuning.fade_rate;
        Ok(state)
    }

    /// Ready -> Playing
    pub fn start(&mut self) {
        if self.phase == GamePhase::Ready {
            self.phase = GamePhase::Playing;
            log::info!("Game started");
        }
    }

    /// Enter a terminal phase. Pending hero damage is cancelled; cosmetic
    /// timers keep running so hit flashes still clear.
    pub fn end(&mut self, phase: GamePhase) {
        debug_assert!(phase.is_over());
        let dropped = self.events.cancel_kind(DeferredKind::Damage);
        self.phase = phase;
        log::info!(
            "Game over: {:?} after {} frames ({} pending hits dropped)",
            phase,
            self.frame,
            dropped
        );
    }

    /// Look up a live entry by id
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        if id == self.hero.id {
            return Some(&self.hero);
        }
        self.hostiles.iter().find(|a| a.id == id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        find_actor(&mut self.hero, &mut self.hostiles, id)
    }

    /// Apply every deferred event due at the current clock
    pub fn apply_due_events(&mut self) {
        for event in self.events.drain_due() {
            if event.kind == DeferredKind::Damage
                && self.rules.damage_policy == DelayedDamagePolicy::CancelWithAttacker
                && !self.actor(event.source).is_some_and(|a| a.alive)
            {
                log::trace!("Dropped hit from departed {:?}", event.source);
                continue;
            }

            let Some(target) = find_actor(&mut self.hero, &mut self.hostiles, event.target) else {
                log::trace!("{:?} for removed {:?} ignored", event.kind, event.target);
                continue;
            };
            match event.kind {
                DeferredKind::AttackReady => target.can_attack = true,
                DeferredKind::HitFlashEnd => target.hit_flash = false,
                DeferredKind::Damage => target.damage(&mut self.events),
            }
        }
    }

    /// Drop hostiles that are dead and fully faded. Returns how many went.
    pub fn remove_defeated(&mut self) -> usize {
        let mut removed = Vec::new();
        self.hostiles.retain(|h| {
            if h.is_removable() {
                removed.push(h.id);
                false
            } else {
                true
            }
        });

        for id in &removed {
            self.events.cancel_target(*id);
            if self.rules.damage_policy == DelayedDamagePolicy::CancelWithAttacker {
                self.events.cancel_source(*id);
            }
            log::debug!("Removed {:?}, {} hostiles left", id, self.hostiles.len());
        }
        removed.len()
    }

    pub fn health_display(&self) -> HealthDisplay {
        HealthDisplay {
            health: self.hero.health,
            max_health: self.hero.config.max_health,
        }
    }

    pub fn hostiles_remaining(&self) -> usize {
        self.hostiles.len()
    }

    /// Hero's y past which a fall counts as lethal
    pub fn fall_through_y(&self) -> f32 {
        self.level.physics.floor_y - self.hero.config.sprite_size * 2.0 / 3.0
    }

    /// Draw list: hostiles first, hero on top
    pub fn views(&self) -> Vec<ActorView> {
        self.hostiles
            .iter()
            .chain(std::iter::once(&self.hero))
            .map(|a| self.view_of(a))
            .collect()
    }

    fn view_of(&self, actor: &Actor) -> ActorView {
        let size = actor.config.sprite_size;
        ActorView {
            id: actor.id,
            pos: self.camera.to_canvas(actor.pos),
            src: Vec2::new(
                actor.sprite_seq as f32 * size,
                actor.current_motion().index as f32 * size,
            ),
            size,
            opacity: actor.opacity,
            facing_right: actor.facing_right,
            hit_flash: actor.hit_flash,
        }
    }
}

fn spawn_hostiles(tuning: &Tuning, spawns: &[Spawn]) -> Vec<Actor> {
    spawns
        .iter()
        .zip(1u32..)
        .map(|(spawn, id)| Actor::new(ActorId(id), Role::Hostile, tuning.hostile.clone(), *spawn))
        .collect()
}

fn find_actor<'a>(hero: &'a mut Actor, hostiles: &'a mut [Actor], id: ActorId) -> Option<&'a mut Actor> {
    if id == hero.id {
        return Some(hero);
    }
    hostiles.iter_mut().find(|a| a.id == id)
}
