//! Contracts for the game systems the planner talks to.

use std::fmt;

use pursuit_core::Vec3;

// ── Target ────────────────────────────────────────────────────────────────────

/// Read-only access to the chased target's world position.
///
/// Implemented for any `Fn() -> Vec3`, so a caller can pass a closure over
/// shared state.  Use [`FixedTarget`] for a target that never moves.
pub trait TargetSource {
    fn position(&self) -> Vec3;
}

/// A target that stays put.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedTarget(pub Vec3);

impl TargetSource for FixedTarget {
    fn position(&self) -> Vec3 {
        self.0
    }
}

impl<F: Fn() -> Vec3> TargetSource for F {
    fn position(&self) -> Vec3 {
        self()
    }
}

// ── Notifications ─────────────────────────────────────────────────────────────

/// Game-facing events raised by the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChaseEvent {
    /// The hand came within attack range of the target.
    Attack,
    /// The target was grabbed; the retreat begins.
    Captured,
    /// The hand brought the target back to its home node.
    Delivered,
}

impl ChaseEvent {
    /// Stable event name for game-side dispatch tables.
    pub fn name(self) -> &'static str {
        match self {
            ChaseEvent::Attack    => "attack",
            ChaseEvent::Captured  => "target_captured",
            ChaseEvent::Delivered => "target_delivered",
        }
    }
}

impl fmt::Display for ChaseEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fire-and-forget receiver for [`ChaseEvent`]s.
pub trait NotificationSink {
    fn emit(&mut self, event: ChaseEvent);
}

/// Discards every event.
pub struct NullSink;

impl NotificationSink for NullSink {
    fn emit(&mut self, _event: ChaseEvent) {}
}

/// Collects events in order; handy for tests and replays.
impl NotificationSink for Vec<ChaseEvent> {
    fn emit(&mut self, event: ChaseEvent) {
        self.push(event);
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn emit(&mut self, event: ChaseEvent) {
        (**self).emit(event);
    }
}
