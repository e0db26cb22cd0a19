//! Deferred, frame-clocked events
//!
//! Timed mutations (attack cooldown, hit flash, delayed damage) are queued
//! here with a due time and drained by the game loop once the frame clock
//! reaches it. Nothing fires between frames.

use serde::{Deserialize, Serialize};

/// Stable actor handle (hero is always 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    pub const HERO: Self = Self(0);
}

/// What happens when an event comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredKind {
    /// Attack cooldown elapsed
    AttackReady,
    /// Hit flash ends
    HitFlashEnd,
    /// One unit of damage lands
    Damage,
}

/// A queued event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Frame clock time (ms) at which the event fires
    pub due_ms: f64,
    /// Actor the event mutates
    pub target: ActorId,
    /// Actor that caused the event (same as target for self timers)
    pub source: ActorId,
    pub kind: DeferredKind,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
}

/// Pending events plus the frame clock they are measured against
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    now_ms: f64,
    pending: Vec<ScheduledEvent>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current frame clock (ms)
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Advance the frame clock
    pub fn advance(&mut self, dt_ms: f64) {
        self.now_ms += dt_ms.max(0.0);
    }

    /// Queue a self-targeted event `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: f64, target: ActorId, kind: DeferredKind) {
        self.schedule_from(delay_ms, target, target, kind);
    }

    /// Queue an event caused by `source` that mutates `target`
    pub fn schedule_from(
        &mut self,
        delay_ms: f64,
        source: ActorId,
        target: ActorId,
        kind: DeferredKind,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(ScheduledEvent {
            due_ms: self.now_ms + delay_ms.max(0.0),
            target,
            source,
            kind,
            seq,
        });
    }

    /// Remove and return all events due at the current clock, in due order
    pub fn drain_due(&mut self) -> Vec<ScheduledEvent> {
        let now = self.now_ms;
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|e| e.due_ms <= now);
        self.pending = rest;
        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due
    }

    /// Drop every event targeting `id`
    pub fn cancel_target(&mut self, id: ActorId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|e| e.target != id);
        before - self.pending.len()
    }

    /// Drop every event caused by `id` on some other actor
    pub fn cancel_source(&mut self, id: ActorId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|e| e.source != id || e.target == id);
        before - self.pending.len()
    }

    /// Drop every event of one kind
    pub fn cancel_kind(&mut self, kind: DeferredKind) -> usize {
        let before = self.pending.len();
        self.pending.retain(|e| e.kind != kind);
        before - self.pending.len()
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduledEvent> {
        self.pending.iter()
    }
}
