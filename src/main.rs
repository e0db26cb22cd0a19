//! Pod Brawler headless driver
//!
//! Builds the stock level (or one from a tuning JSON given as the first
//! argument), plays it with a scripted hero at a fixed frame rate and logs
//! the outcome. Set `RUST_LOG=debug` to watch the fight.

use pod_brawler::Tuning;
use pod_brawler::sim::{GameState, Move, TickInput, tick};

/// Fixed frame delta (ms)
const FRAME_MS: f32 = 16.0;
/// Give up after five simulated minutes
const MAX_FRAMES: u64 = 60 * 60 * 5;

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pod Brawler (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let mut state = match GameState::from_tuning(&tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot build level: {}", e);
            std::process::exit(1);
        }
    };

    let mut pilot = Pilot::default();
    let mut input = TickInput {
        start: true,
        ..Default::default()
    };
    for _ in 0..MAX_FRAMES {
        tick(&mut state, &input, FRAME_MS);
        if state.phase.is_over() {
            break;
        }
        input = pilot.next_input(&state);
    }

    let health = state.health_display();
    println!(
        "{:?} after {:.1}s: hero health {}/{}, {} hostiles left, ~{} fps",
        state.phase,
        state.events.now_ms() / 1000.0,
        health.health,
        health.max_health,
        state.hostiles_remaining(),
        state.stats.avg_fps
    );
}

/// Scripted hero: runs right, jumps when blocked, swings at anything close
#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
struct Pilot {
    blocked_frames: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl Pilot {
    fn next_input(&mut self, state: &GameState) -> TickInput {
        let hero = &state.hero;
        let threat = state.hostiles.iter().any(|h| {
            h.alive && (h.pos.x - hero.pos.x).abs() < hero.config.attack_range * 0.8
        });

        if hero.moving && hero.vel.x == 0.0 && !hero.airborne {
            self.blocked_frames += 1;
        } else {
            self.blocked_frames = 0;
        }

        TickInput {
            movement: Some(Move::Right),
            jump: self.blocked_frames > 2,
            attack: threat && hero.can_attack,
            start: false,
        }
    }
}
