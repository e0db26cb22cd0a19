//! Hostile AI and combat resolution
//!
//! Hostiles patrol back and forth and swing at the hero when it is close and
//! in front of them. The hero's hit lands a fixed delay after the swing
//! starts, independent of how the attack animation plays out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::events::{DeferredKind, EventQueue};
use super::zone::Level;
use crate::consts::*;
use crate::facing_sign;

/// What happens to a hero hit that is still pending when its attacker goes away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DelayedDamagePolicy {
    /// Once a swing starts the hit lands, even if the attacker dies or is
    /// removed in the meantime
    #[default]
    LockedIn,
    /// Pending hits are dropped when the attacker dies or is removed
    CancelWithAttacker,
}

/// Combat tuning that is not per-actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    /// Delay before a hostile's hit lands on the hero (ms)
    pub hero_damage_delay_ms: f64,
    /// Vertical window for `nearby` (px)
    pub proximity_y: f32,
    pub damage_policy: DelayedDamagePolicy,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            hero_damage_delay_ms: HERO_DAMAGE_DELAY_MS,
            proximity_y: PROXIMITY_Y,
            damage_policy: DelayedDamagePolicy::LockedIn,
        }
    }
}

/// Whether `b` is within `a`'s reach. Uses `a`'s attack range only, so the
/// relation is not symmetric.
#[inline]
pub fn nearby(a: &Actor, b: &Actor, proximity_y: f32) -> bool {
    (a.pos.x - b.pos.x).abs() < a.config.attack_range && (a.pos.y - b.pos.y).abs() < proximity_y
}

/// Whether `hostile` should start an attack on `hero` this frame
pub fn should_attack(hostile: &Actor, hero: &Actor, rules: &CombatRules) -> bool {
    hostile.alive
        && hero.alive
        && !hostile.attacking
        && hostile.can_attack
        && nearby(hero, hostile, rules.proximity_y)
        && hostile.faces(hero.pos.x)
}

/// Turn a hostile around when the ground a few pixels ahead is out of bounds
pub fn patrol(hostile: &mut Actor, level: &Level) {
    if !hostile.alive {
        return;
    }
    let probe = Vec2::new(facing_sign(hostile.facing_right) * PATROL_PROBE, 0.0);
    let ahead = hostile.center() + probe;
    if !level.in_bounds(ahead) {
        hostile.facing_right = !hostile.facing_right;
        log::trace!("{:?} turned around at x={}", hostile.id, hostile.pos.x);
    }
}

/// Run patrol and attack decisions for every hostile, in collection order.
/// Returns how many attacks started.
pub fn run_hostile_ai(
    hostiles: &mut [Actor],
    hero: &Actor,
    level: &Level,
    rules: &CombatRules,
    events: &mut EventQueue,
) -> usize {
    let mut started = 0;
    for hostile in hostiles.iter_mut() {
        patrol(hostile, level);

        if should_attack(hostile, hero, rules) && hostile.attack(events) {
            events.schedule_from(
                rules.hero_damage_delay_ms,
                hostile.id,
                hero.id,
                DeferredKind::Damage,
            );
            log::debug!(
                "{:?} attacks hero, hit due in {}ms",
                hostile.id,
                rules.hero_damage_delay_ms
            );
            started += 1;
        }
    }
    started
}

/// Hero swing: damages every living hostile in reach and in front of the
/// hero. Returns how many were hit; zero if the hero could not attack.
pub fn hero_strike(
    hero: &mut Actor,
    hostiles: &mut [Actor],
    rules: &CombatRules,
    events: &mut EventQueue,
) -> usize {
    if !hero.alive || !hero.attack(events) {
        return 0;
    }
    let mut hits = 0;
    for hostile in hostiles.iter_mut() {
        if hostile.alive && nearby(hero, hostile, rules.proximity_y) && hero.faces(hostile.pos.x) {
            hostile.damage(events);
            hits += 1;
        }
    }
    hits
}
