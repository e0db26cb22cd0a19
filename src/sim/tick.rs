//! Per-frame simulation step
//!
//! Core game loop: one call per display frame, driven by the frame delta.

use serde::{Deserialize, Serialize};

use super::collision::{FrameContext, step_actor};
use super::combat::{hero_strike, run_hostile_ai};
use super::state::{GamePhase, GameState};

/// Horizontal hero command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Left,
    Right,
    Stop,
}

/// Hero commands for a single frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub movement: Option<Move>,
    pub jump: bool,
    pub attack: bool,
    /// Leave the ready screen
    pub start: bool,
}

/// Advance the game by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if input.start {
        state.start();
    }

    match state.phase {
        GamePhase::Ready => return,
        GamePhase::HeroDefeated | GamePhase::Victory => {
            settle(state, dt_ms);
            return;
        }
        GamePhase::Playing => {}
    }

    state.frame += 1;
    state.stats.record(state.frame, dt_ms);
    state.events.advance(dt_ms as f64);
    state.apply_due_events();

    state.remove_defeated();

    if !state.hero.alive {
        state.end(GamePhase::HeroDefeated);
        return;
    }
    if state.hostiles.is_empty() {
        state.end(GamePhase::Victory);
        return;
    }

    apply_hero_input(state, input);

    run_hostile_ai(
        &mut state.hostiles,
        &state.hero,
        &state.level,
        &state.rules,
        &mut state.events,
    );

    let ctx = FrameContext {
        dt_ms,
        level: &state.level,
        fade_rate: state.fade_rate,
    };
    for hostile in &mut state.hostiles {
        step_actor(hostile, &ctx);
    }

    let old_hero_x = state.hero.pos.x;
    step_actor(&mut state.hero, &ctx);
    state
        .camera
        .follow(old_hero_x, &state.hero, &state.level.physics);

    // Fell into a hole: dies on its next update
    if state.hero.pos.y > state.fall_through_y() && state.hero.health > 0 {
        log::debug!("Hero fell through at y={}", state.hero.pos.y);
        state.hero.health = 0;
    }

    log::trace!(
        "frame {}: hero ({:.1}, {:.1}) hp {} | {} hostiles",
        state.frame,
        state.hero.pos.x,
        state.hero.pos.y,
        state.hero.health,
        state.hostiles.len()
    );
}

fn apply_hero_input(state: &mut GameState, input: &TickInput) {
    if !state.hero.alive {
        return;
    }
    let hero = &mut state.hero;
    match input.movement {
        Some(Move::Left) => hero.move_left(),
        Some(Move::Right) => hero.move_right(),
        Some(Move::Stop) => hero.stop(),
        None => {}
    }
    if input.jump {
        hero.jump();
    }
    if input.attack {
        let hits = hero_strike(hero, &mut state.hostiles, &state.rules, &mut state.events);
        if hits > 0 {
            log::debug!("Hero strike hit {} hostiles", hits);
        }
    }
}

/// After the game ends: timers run out and the fallen keep fading, nothing
/// else moves
fn settle(state: &mut GameState, dt_ms: f32) {
    state.events.advance(dt_ms as f64);
    state.apply_due_events();
    for actor in state.hostiles.iter_mut().chain(std::iter::once(&mut state.hero)) {
        actor.fade(dt_ms, state.fade_rate);
    }
}
