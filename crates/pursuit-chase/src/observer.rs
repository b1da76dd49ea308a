//! Observer hooks for tracing the planner's decisions.

use pursuit_core::{NodeId, SimTime};

use crate::{HopKind, IdleReason};

/// Callbacks invoked by [`Pursuer`](crate::Pursuer) at each decision point.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers see what happened; they
/// cannot steer the planner.
///
/// # Example: hop counter
///
/// ```rust,ignore
/// struct HopCounter(usize);
///
/// impl ChaseObserver for HopCounter {
///     fn on_arrived(&mut self, _now: SimTime, _node: NodeId, _kind: HopKind) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait ChaseObserver {
    /// A chase (re)started at `home`.
    fn on_chase_started(&mut self, _now: SimTime, _home: NodeId) {}

    /// A fresh path toward the target was computed.
    fn on_replanned(&mut self, _now: SimTime, _path: &[NodeId]) {}

    /// A hop was committed and motion started.
    fn on_hop_committed(
        &mut self,
        _now:      SimTime,
        _from:     NodeId,
        _to:       NodeId,
        _duration: f64,
        _kind:     HopKind,
    ) {}

    /// The hand reached `node`.
    fn on_arrived(&mut self, _now: SimTime, _node: NodeId, _kind: HopKind) {}

    /// The planner entered the attacking phase; `distance` is hand to target.
    fn on_attack(&mut self, _now: SimTime, _distance: f32) {}

    /// The planner started holding without a plan.
    fn on_idle(&mut self, _now: SimTime, _reason: IdleReason) {}

    /// The target was captured.
    fn on_captured(&mut self, _now: SimTime) {}

    /// The hand delivered the target to `home`.
    fn on_delivered(&mut self, _now: SimTime, _home: NodeId) {}
}

/// A [`ChaseObserver`] that does nothing.
pub struct NoopObserver;

impl ChaseObserver for NoopObserver {}

/// Forwards every hook to `tracing` as a structured event.
///
/// Hops and replans are logged at `debug`, phase changes at `info`.
#[derive(Debug, Default)]
pub struct TracingObserver;

impl ChaseObserver for TracingObserver {
    fn on_chase_started(&mut self, now: SimTime, home: NodeId) {
        tracing::info!(time = now.0, %home, "chase started");
    }

    fn on_replanned(&mut self, now: SimTime, path: &[NodeId]) {
        tracing::debug!(time = now.0, hops = path.len().saturating_sub(1), ?path, "path found");
    }

    fn on_hop_committed(
        &mut self,
        now:      SimTime,
        from:     NodeId,
        to:       NodeId,
        duration: f64,
        kind:     HopKind,
    ) {
        tracing::debug!(time = now.0, %from, %to, duration, ?kind, "hop committed");
    }

    fn on_arrived(&mut self, now: SimTime, node: NodeId, kind: HopKind) {
        tracing::debug!(time = now.0, %node, ?kind, "arrived");
    }

    fn on_attack(&mut self, now: SimTime, distance: f32) {
        tracing::info!(time = now.0, distance, "within attack range");
    }

    fn on_idle(&mut self, now: SimTime, reason: IdleReason) {
        tracing::debug!(time = now.0, ?reason, "holding position");
    }

    fn on_captured(&mut self, now: SimTime) {
        tracing::info!(time = now.0, "target captured");
    }

    fn on_delivered(&mut self, now: SimTime, home: NodeId) {
        tracing::info!(time = now.0, %home, "target delivered");
    }
}
