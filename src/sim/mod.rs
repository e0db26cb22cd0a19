//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering and
//! platform concerns:
//! - One synchronous step per display frame, driven by the frame delta
//! - Timed effects are queued events checked against the frame clock
//! - Stable iteration order (spawn order for hostiles, hero last)

pub mod actor;
pub mod collision;
pub mod combat;
pub mod events;
pub mod motion;
pub mod state;
pub mod tick;
pub mod zone;

pub use actor::{Actor, ActorConfig, Role, Spawn};
pub use collision::{FrameContext, step_actor, step_to_boundary};
pub use combat::{CombatRules, DelayedDamagePolicy, hero_strike, nearby, run_hostile_ai};
pub use events::{ActorId, DeferredKind, EventQueue, ScheduledEvent};
pub use motion::{Motion, MotionKind, MotionTable};
pub use state::{ActorView, Camera, FrameStats, GamePhase, GameState, HealthDisplay};
pub use tick::{Move, TickInput, tick};
pub use zone::{Level, LevelPhysics, Rect, RectZones, ZoneInfo, ZoneOracle};
