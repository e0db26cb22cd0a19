//! Motion integration and collision resolution against level zones
//!
//! The level is opaque: all we can do is ask whether a point is in bounds.
//! When a tentative move lands out of bounds we revert it and walk toward the
//! boundary one pixel at a time, then back off one pixel.

use glam::Vec2;

use super::actor::Actor;
use super::zone::Level;
use crate::consts::*;
use crate::facing_sign;

/// Everything a physics step needs from the outside world for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Frame delta (ms)
    pub dt_ms: f32,
    pub level: &'a Level,
    /// Opacity lost per second by dead actors
    pub fade_rate: f32,
}

impl<'a> FrameContext<'a> {
    pub fn new(dt_ms: f32, level: &'a Level) -> Self {
        Self {
            dt_ms,
            level,
            fade_rate: FADE_RATE,
        }
    }
}

/// Advance one actor by a frame.
///
/// Living actors first check for death (health gone or fallen off the
/// level); if they survive they run vertical velocity, vertical position,
/// horizontal position, then their animation update. Dead actors only fade.
pub fn step_actor(actor: &mut Actor, ctx: &FrameContext) {
    if !actor.alive {
        actor.fade(ctx.dt_ms, ctx.fade_rate);
        return;
    }
    if actor.settle_life(ctx.level.physics.floor_y) {
        return;
    }

    update_vertical_velocity(actor, ctx);
    update_vertical_position(actor, ctx);
    update_horizontal_position(actor, ctx);

    actor.update_animation_motion();
    actor.update_animation_frame(ctx.dt_ms);
}

/// Apply gravity, or levitation pull while inside a pod
pub fn update_vertical_velocity(actor: &mut Actor, ctx: &FrameContext) {
    let physics = &ctx.level.physics;
    actor.vel.y += physics.gravity * ctx.dt_ms / 1000.0;

    if ctx.level.levitating(actor.center()) {
        actor.vel.y = (physics.levitation_target_y - actor.pos.y) / LEVITATION_DAMPING;
    }
}

/// Move vertically, landing on floors and stopping at ceilings
pub fn update_vertical_position(actor: &mut Actor, ctx: &FrameContext) {
    let level = ctx.level;
    let old_y = actor.pos.y;
    actor.pos.y += actor.vel.y * ctx.dt_ms;

    if level.in_bounds(actor.center()) {
        actor.airborne = true;
        return;
    }

    actor.pos.y = old_y;

    // Landing snaps down to the floor; a blocked rise just stays put
    if actor.vel.y > 0.0 {
        step_to_boundary(actor, level, Vec2::Y);
        actor.vel.y = 0.0;
        actor.airborne = false;
    }
}

/// Run in the faced direction, stopping flush against walls
pub fn update_horizontal_position(actor: &mut Actor, ctx: &FrameContext) {
    let level = ctx.level;
    let old_x = actor.pos.x;
    let sign = facing_sign(actor.facing_right);

    if actor.moving {
        let change_x = actor.config.player_speed * ctx.dt_ms / 1000.0;
        actor.pos.x += sign * change_x;
    }

    if !level.in_bounds(actor.center()) {
        actor.pos.x = old_x;
        step_to_boundary(actor, level, Vec2::new(sign, 0.0));
    }

    actor.vel.x = if ctx.dt_ms > 0.0 {
        (actor.pos.x - old_x) / ctx.dt_ms
    } else {
        0.0
    };
}

/// Unit-step `actor` along `dir` while its center stays in bounds, then back
/// off one step. Returns the number of steps taken before backing off.
///
/// The start position is assumed in bounds. If the search runs past
/// [`MAX_STEP_SEARCH`] the oracle has no boundary in that direction and the
/// actor is left where it started.
pub fn step_to_boundary(actor: &mut Actor, level: &Level, dir: Vec2) -> u32 {
    let start = actor.pos;
    let mut steps = 0;

    while level.in_bounds(actor.center()) {
        if steps >= MAX_STEP_SEARCH {
            log::warn!(
                "{:?} {:?}: no boundary within {} px along {:?}",
                actor.role,
                actor.id,
                MAX_STEP_SEARCH,
                dir
            );
            actor.pos = start;
            return steps;
        }
        actor.pos += dir;
        steps += 1;
    }
    actor.pos -= dir;
    log::trace!("{:?} snapped {} px along {:?}", actor.id, steps, dir);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::actor::{ActorConfig, Role, Spawn};
    use crate::sim::events::ActorId;
    use crate::sim::motion::MotionKind;
    use crate::sim::zone::{LevelPhysics, Rect, RectZones, ZoneInfo};
    use proptest::prelude::*;

    const HALF: f32 = SPRITE_SIZE / 2.0;

    fn actor_at(x: f32, y: f32) -> Actor {
        Actor::new(
            ActorId(1),
            Role::Hostile,
            ActorConfig::hostile(),
            Spawn::new(x, y, true, false),
        )
    }

    fn floor_level(floor: f32) -> Level {
        Level::new(LevelPhysics::default(), move |p: Vec2| ZoneInfo {
            in_bounds: p.y < floor,
            levitating: false,
        })
    }

    #[test]
    fn test_falling_lands_on_flat_floor() {
        let level = floor_level(500.0);
        let ctx = FrameContext::new(16.0, &level);
        let mut a = actor_at(0.0, 500.0 - HALF - 10.0);
        a.vel.y = 2.0;
        a.airborne = true;

        update_vertical_position(&mut a, &ctx);

        assert_eq!(a.center().y, 499.0);
        assert_eq!(a.vel.y, 0.0);
        assert!(!a.airborne);
    }

    #[test]
    fn test_falling_lands_on_slope() {
        // Floor rises 1px for every 2px to the right
        let level = Level::new(LevelPhysics::default(), |p: Vec2| ZoneInfo {
            in_bounds: p.y < 600.0 - p.x / 2.0,
            levitating: false,
        });
        let ctx = FrameContext::new(16.0, &level);
        let mut a = actor_at(200.0 - HALF, 400.0);
        a.vel.y = 3.0;

        update_vertical_position(&mut a, &ctx);

        let surface = 600.0 - a.center().x / 2.0;
        assert!(a.center().y < surface);
        assert!(surface - a.center().y <= 1.0);
        assert_eq!(a.vel.y, 0.0);
        assert!(!a.airborne);
    }

    #[test]
    fn test_falling_lands_on_ledge_of_rect_zones() {
        let zones = RectZones::new(
            vec![
                Rect::new(0.0, 0.0, 300.0, 453.0),
                Rect::new(300.0, 0.0, 600.0, 300.0),
            ],
            vec![],
        );
        let level = Level::new(LevelPhysics::default(), zones);
        let ctx = FrameContext::new(16.0, &level);
        let mut a = actor_at(400.0 - HALF, 200.0);
        a.vel.y = 3.0;

        update_vertical_position(&mut a, &ctx);

        assert_eq!(a.center().y, 299.0);
        assert!(!a.airborne);
    }

    #[test]
    fn test_free_fall_sets_airborne() {
        let level = floor_level(10_000.0);
        let ctx = FrameContext::new(10.0, &level);
        let mut a = actor_at(0.0, 100.0);
        a.vel.y = 0.5;
        update_vertical_position(&mut a, &ctx);
        assert_eq!(a.pos.y, 105.0);
        assert!(a.airborne);
    }

    #[test]
    fn test_ceiling_blocks_without_search() {
        let level = Level::new(LevelPhysics::default(), |p: Vec2| ZoneInfo {
            in_bounds: p.y >= 100.0 && p.y < 1000.0,
            levitating: false,
        });
        let ctx = FrameContext::new(16.0, &level);
        let mut a = actor_at(0.0, 110.0 - HALF);
        a.vel.y = -1.0;
        a.airborne = true;

        update_vertical_position(&mut a, &ctx);

        assert_eq!(a.pos.y, 110.0 - HALF);
        assert_eq!(a.vel.y, -1.0);
        assert!(a.airborne);
    }

    #[test]
    fn test_gravity_accumulates() {
        let level = floor_level(10_000.0);
        let ctx = FrameContext::new(100.0, &level);
        let mut a = actor_at(0.0, 0.0);
        update_vertical_velocity(&mut a, &ctx);
        assert!((a.vel.y - GRAVITY * 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_levitation_overrides_gravity() {
        let level = Level::new(LevelPhysics::default(), |_p: Vec2| ZoneInfo {
            in_bounds: true,
            levitating: true,
        });
        let ctx = FrameContext::new(16.0, &level);
        let mut a = actor_at(0.0, 265.0);
        a.vel.y = 5.0;
        update_vertical_velocity(&mut a, &ctx);
        assert_eq!(a.vel.y, (LEVITATION_TARGET_Y - 265.0) / LEVITATION_DAMPING);
        assert!(a.vel.y < 0.0);
    }

    #[test]
    fn test_running_into_wall_stops_flush() {
        let level = Level::new(LevelPhysics::default(), |p: Vec2| ZoneInfo {
            in_bounds: p.x < 400.0,
            levitating: false,
        });
        let ctx = FrameContext::new(100.0, &level);
        let mut a = actor_at(400.0 - HALF - 5.0, 0.0);
        a.move_right();

        update_horizontal_position(&mut a, &ctx);

        assert_eq!(a.center().x, 399.0);
    }

    #[test]
    fn test_running_left_into_wall() {
        let level = Level::new(LevelPhysics::default(), |p: Vec2| ZoneInfo {
            in_bounds: p.x >= 0.0,
            levitating: false,
        });
        let ctx = FrameContext::new(100.0, &level);
        let mut a = actor_at(-HALF + 5.0, 0.0);
        a.move_left();

        update_horizontal_position(&mut a, &ctx);

        assert_eq!(a.center().x, 0.0);
    }

    #[test]
    fn test_running_in_open_space() {
        let level = floor_level(10_000.0);
        let ctx = FrameContext::new(100.0, &level);
        let mut a = actor_at(0.0, 0.0);
        a.move_left();
        update_horizontal_position(&mut a, &ctx);
        assert_eq!(a.pos.x, -10.0);
        assert!((a.vel.x + 0.1).abs() < 1e-6);

        a.stop();
        update_horizontal_position(&mut a, &ctx);
        assert_eq!(a.pos.x, -10.0);
        assert_eq!(a.vel.x, 0.0);
    }

    #[test]
    fn test_step_search_gives_up_without_boundary() {
        let level = floor_level(f32::INFINITY);
        let mut a = actor_at(0.0, 0.0);
        let steps = step_to_boundary(&mut a, &level, Vec2::Y);
        assert_eq!(steps, MAX_STEP_SEARCH);
        assert_eq!(a.pos, Vec2::ZERO);
    }

    #[test]
    fn test_step_actor_dead_only_fades() {
        let level = floor_level(500.0);
        let ctx = FrameContext::new(250.0, &level);
        let mut a = actor_at(0.0, 0.0);
        a.alive = false;
        a.moving = true;
        step_actor(&mut a, &ctx);
        assert_eq!(a.pos, Vec2::ZERO);
        assert_eq!(a.opacity, 0.75);
    }

    #[test]
    fn test_step_actor_death_check_precedes_movement() {
        let level = floor_level(10_000.0);
        let ctx = FrameContext::new(16.0, &level);
        let mut a = actor_at(0.0, 0.0);
        a.health = 0;
        a.moving = true;
        step_actor(&mut a, &ctx);
        assert!(!a.alive);
        assert_eq!(a.pos, Vec2::ZERO);
        assert_eq!(a.opacity, 1.0);
    }

    #[test]
    fn test_step_actor_settles_on_ground() {
        let level = floor_level(453.0);
        let ctx = FrameContext::new(16.0, &level);
        let mut a = actor_at(100.0, 380.0);
        a.moving = true;
        for _ in 0..30 {
            step_actor(&mut a, &ctx);
        }
        assert_eq!(a.center().y, 452.0);
        assert!(!a.airborne);
        assert_eq!(a.motion, MotionKind::Running);
        assert!(a.pos.x > 100.0);
    }

    proptest! {
        #[test]
        fn prop_fall_lands_on_boundary(
            start_y in 0.0f32..300.0,
            gap in 1.0f32..30.0,
            vy in 2.0f32..8.0,
            dt in 16.0f32..33.0,
        ) {
            let mut a = actor_at(0.0, start_y);
            let floor = a.center().y + gap;
            let level = floor_level(floor);
            let ctx = FrameContext::new(dt, &level);
            a.vel.y = vy;
            a.airborne = true;

            update_vertical_position(&mut a, &ctx);

            let c = a.center();
            prop_assert!(c.y < floor);
            prop_assert!(floor - c.y <= 1.0);
            prop_assert_eq!(a.vel.y, 0.0);
            prop_assert!(!a.airborne);
        }
    }
}
