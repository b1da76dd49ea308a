//! The `Pursuer`, the chase/retreat decision loop for one hand.

use pursuit_core::{ChaseConfig, NodeId, SimTime, Vec3, within_range};
use pursuit_motion::{Interpolator, MotionError, StepOutcome, hop_duration};
use pursuit_nav::{Graph, ProximityIndex, ProximityQuery};

use crate::{
    ChaseError, ChaseEvent, ChaseObserver, ChasePhase, ChaseResult, ChaseState, HopKind,
    IdleReason, NotificationSink, TargetSource,
};

/// Zero-length hops complete without motion; this caps how many one planning
/// call may chain before giving up for the tick.
const INSTANT_HOP_BUDGET: usize = 64;

/// How a committed hop got under way.
enum HopStart {
    Moving,
    /// Both endpoints share a position; the hop completed on the spot.
    Instant,
}

/// Drives one pursuing hand.
///
/// Owns the [`ChaseState`] and the hand's [`Interpolator`], and consults the
/// injected collaborators:
///
/// - `G: Graph`: shortest paths and node positions,
/// - `P: ProximityIndex`: locating the target on the graph,
/// - `T: TargetSource`: the target's world position,
/// - `N: NotificationSink`: game-facing [`ChaseEvent`]s.
///
/// A game usually passes the same `&NavGraph` as both `G` and `P`.
///
/// # Control flow
///
/// ```text
/// start_chase ─► plan_next_hop ─► begin motion ─► step … step ─► Arrived
///                     ▲                                            │
///                     └──────────── on_arrived_at_next_node ◄──────┘
/// ```
///
/// Every call is synchronous and single-threaded; re-planning happens inside
/// the `step` that detects arrival.
pub struct Pursuer<G, P, T, N> {
    config:    ChaseConfig,
    graph:     G,
    proximity: P,
    target:    T,
    sink:      N,
    state:     ChaseState,
    motion:    Interpolator,
}

impl<G, P, T, N> Pursuer<G, P, T, N>
where
    G: Graph,
    P: ProximityIndex,
    T: TargetSource,
    N: NotificationSink,
{
    /// Validate `config` and assemble an inactive pursuer.
    pub fn new(config: ChaseConfig, graph: G, proximity: P, target: T, sink: N) -> ChaseResult<Self> {
        config.validate()?;
        let motion = Interpolator::new(Vec3::ZERO, config.arrival_epsilon);
        Ok(Self {
            config,
            graph,
            proximity,
            target,
            sink,
            state: ChaseState::new(),
            motion,
        })
    }

    // ── Public operations ─────────────────────────────────────────────────

    /// Start (or restart) a chase from `home`.
    ///
    /// Discards any hop in flight, puts the hand on `home`, resets
    /// `path_traveled` to `[home]`, clears `captured`, and plans the first
    /// hop.  Safe to call at any time.
    ///
    /// # Errors
    ///
    /// [`ChaseError::UnknownHome`] if `home` is not in the graph; the
    /// pursuer is left untouched.
    pub fn start_chase<O: ChaseObserver>(
        &mut self,
        home:     NodeId,
        now:      SimTime,
        observer: &mut O,
    ) -> ChaseResult<()> {
        if !self.graph.contains(home) {
            return Err(ChaseError::UnknownHome(home));
        }
        let home_pos = self.graph.position(home).ok_or(ChaseError::UnknownHome(home))?;

        self.motion.place(home_pos);
        self.state.restart(home, now);
        observer.on_chase_started(now, home);
        self.plan_next_hop(now, observer);
        Ok(())
    }

    /// Decide what to do from the current graph node: attack, start the next
    /// hop, retreat, or hold.
    ///
    /// No-op while a hop is in flight or when no chase is active.
    pub fn plan_next_hop<O: ChaseObserver>(&mut self, now: SimTime, observer: &mut O) {
        if !self.state.is_active() || self.motion.is_moving() {
            return;
        }

        for _ in 0..INSTANT_HOP_BUDGET {
            let Some((from, to, kind)) = self.decide(now, observer) else {
                return;
            };
            match self.begin_hop(from, to, kind, now, observer) {
                Some(HopStart::Moving) | None => return,
                Some(HopStart::Instant) => self.complete_hop(now, observer),
            }
        }

        tracing::warn!(
            time = now.0,
            anchor = ?self.state.anchor(),
            budget = INSTANT_HOP_BUDGET,
            "zero-length hop budget exhausted; holding until next tick"
        );
        self.hold(IdleReason::HopBudgetExhausted, now, observer);
    }

    /// Finish the current hop and re-plan.
    ///
    /// Called by [`step`](Self::step) when the interpolator reports arrival.
    /// Calling it directly mid-hop snaps the hop to complete.
    pub fn on_arrived_at_next_node<O: ChaseObserver>(&mut self, now: SimTime, observer: &mut O) {
        let end = self.state.hop.and(self.state.next_node).and_then(|n| self.graph.position(n));
        match end {
            Some(pos) => self.motion.place(pos),
            None => self.motion.cancel(),
        }
        self.complete_hop(now, observer);
        self.plan_next_hop(now, observer);
    }

    /// Advance the hand to `now`; re-plans on arrival.
    pub fn step<O: ChaseObserver>(&mut self, now: SimTime, observer: &mut O) -> StepOutcome {
        let outcome = self.motion.step(now);
        if outcome == StepOutcome::Arrived {
            self.on_arrived_at_next_node(now, observer);
        }
        outcome
    }

    /// One driver tick: step while moving, otherwise retry planning while
    /// holding.  Does nothing before `start_chase` or after delivery.
    pub fn update<O: ChaseObserver>(&mut self, now: SimTime, observer: &mut O) {
        if self.motion.is_moving() {
            self.step(now, observer);
        } else if self.state.phase.is_holding() {
            self.plan_next_hop(now, observer);
        }
    }

    /// Mark the target as grabbed.  The next planning decision retreats; a
    /// hop already in flight finishes first.
    pub fn capture<O: ChaseObserver>(&mut self, now: SimTime, observer: &mut O) {
        if self.state.captured || !self.state.is_active() {
            return;
        }
        self.state.captured = true;
        observer.on_captured(now);
        self.sink.emit(ChaseEvent::Captured);
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn state(&self) -> &ChaseState {
        &self.state
    }

    pub fn config(&self) -> &ChaseConfig {
        &self.config
    }

    pub fn phase(&self) -> ChasePhase {
        self.state.phase
    }

    /// The hand's interpolated world position.
    pub fn hand_position(&self) -> Vec3 {
        self.motion.position()
    }

    pub fn is_moving(&self) -> bool {
        self.motion.is_moving()
    }

    pub fn motion(&self) -> &Interpolator {
        &self.motion
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    /// World positions of `current_path`, for a debug line renderer.
    pub fn planned_positions(&self) -> Vec<Vec3> {
        self.state
            .current_path
            .iter()
            .filter_map(|&n| self.graph.position(n))
            .collect()
    }

    // ── Decision logic ────────────────────────────────────────────────────

    /// Pick the next hop, or apply a holding outcome and return `None`.
    fn decide<O: ChaseObserver>(
        &mut self,
        now:      SimTime,
        observer: &mut O,
    ) -> Option<(NodeId, NodeId, HopKind)> {
        if self.state.captured {
            return self.plan_retreat(now, observer);
        }

        let target = self.target.position();
        let hand   = self.motion.position();
        if within_range(hand, target, self.config.attack_range) {
            return self.attack(hand.distance(target), now, observer);
        }

        self.plan_chase(target, now, observer)
    }

    fn plan_chase<O: ChaseObserver>(
        &mut self,
        target:   Vec3,
        now:      SimTime,
        observer: &mut O,
    ) -> Option<(NodeId, NodeId, HopKind)> {
        let query = ProximityQuery {
            point:      target,
            category:   &self.config.waypoint_category,
            max_radius: self.config.search_radius,
            mask:       self.config.layer_mask,
        };
        if let Some(node) = self.proximity.nearest(&query) {
            self.state.last_known_target_node = Some(node);
        }
        let Some(goal) = self.state.last_known_target_node else {
            self.hold(IdleReason::NoTargetNode, now, observer);
            return None;
        };

        let anchor = self.state.anchor()?;
        self.state.previous_node = Some(anchor);

        let path = match self.graph.shortest_path(anchor, goal) {
            Some(p) if !p.is_empty() => p,
            _ => {
                self.hold(IdleReason::NoPath, now, observer);
                return None;
            }
        };

        self.state.current_path = path;
        match self.state.current_path.get(1).copied() {
            Some(next) => {
                observer.on_replanned(now, &self.state.current_path);
                Some((anchor, next, HopKind::Advance))
            }
            // Already standing on the target's node.
            None => {
                let distance = self.motion.position().distance(target);
                self.attack(distance, now, observer)
            }
        }
    }

    /// Enter the attacking phase.  With `grab_on_attack` the target is
    /// captured on the spot and the first retreat hop is returned.
    fn attack<O: ChaseObserver>(
        &mut self,
        distance: f32,
        now:      SimTime,
        observer: &mut O,
    ) -> Option<(NodeId, NodeId, HopKind)> {
        if self.state.phase != ChasePhase::Attacking {
            self.state.phase = ChasePhase::Attacking;
            observer.on_attack(now, distance);
            self.sink.emit(ChaseEvent::Attack);
        }
        if self.config.grab_on_attack {
            self.capture(now, observer);
            return self.plan_retreat(now, observer);
        }
        None
    }

    /// Walk `path_traveled` backwards one node; deliver when only home is
    /// left.
    fn plan_retreat<O: ChaseObserver>(
        &mut self,
        now:      SimTime,
        observer: &mut O,
    ) -> Option<(NodeId, NodeId, HopKind)> {
        let traveled = &self.state.path_traveled;
        let n = traveled.len();
        if n <= 1 {
            let home = self.state.home()?;
            self.state.current_path.clear();
            self.state.phase = ChasePhase::Delivered;
            observer.on_delivered(now, home);
            self.sink.emit(ChaseEvent::Delivered);
            return None;
        }

        let (from, to) = (traveled[n - 1], traveled[n - 2]);
        self.state.current_path = traveled.iter().rev().copied().collect();
        self.state.previous_node = Some(from);
        Some((from, to, HopKind::Retreat))
    }

    // ── Hop mechanics ─────────────────────────────────────────────────────

    /// Start motion and commit the hop.  Returns `None` (after holding) if
    /// the graph cannot place either endpoint or the hop cannot be timed.
    fn begin_hop<O: ChaseObserver>(
        &mut self,
        from:     NodeId,
        to:       NodeId,
        kind:     HopKind,
        now:      SimTime,
        observer: &mut O,
    ) -> Option<HopStart> {
        let (Some(a), Some(b)) = (self.graph.position(from), self.graph.position(to)) else {
            self.hold(IdleReason::UnplacedNode, now, observer);
            return None;
        };

        let timed = hop_duration(a, b, self.config.agent_speed)
            .and_then(|d| self.motion.begin(a, b, d, now).map(|()| (d, HopStart::Moving)));
        let (duration, start) = match timed {
            Ok(started) => started,
            // Coincident endpoints: the duration check fires before the
            // length check, so both errors mean "already there".
            Err(MotionError::ZeroLength) => (0.0, HopStart::Instant),
            Err(MotionError::NonPositiveDuration(d)) if d == 0.0 => (0.0, HopStart::Instant),
            Err(err) => {
                tracing::warn!(time = now.0, %from, %to, error = %err, "cannot time hop; holding");
                self.hold(IdleReason::InvalidHop, now, observer);
                return None;
            }
        };
        if let HopStart::Instant = start {
            self.motion.place(b);
        }

        self.state.next_node = Some(to);
        self.state.hop = Some(kind);
        self.state.phase = match kind {
            HopKind::Advance => ChasePhase::Advancing,
            HopKind::Retreat => ChasePhase::Retreating,
        };
        observer.on_hop_committed(now, from, to, duration, kind);
        Some(start)
    }

    /// Record the hop in `path_traveled`.
    fn complete_hop<O: ChaseObserver>(&mut self, now: SimTime, observer: &mut O) {
        let (Some(kind), Some(node)) = (self.state.hop.take(), self.state.next_node) else {
            return;
        };
        match kind {
            HopKind::Advance => self.state.path_traveled.push(node),
            HopKind::Retreat => {
                if self.state.path_traveled.len() > 1 {
                    self.state.path_traveled.pop();
                }
            }
        }
        self.state.last_progress = now;
        observer.on_arrived(now, node, kind);
    }

    /// Hold position without a plan, notifying only on a change of reason.
    fn hold<O: ChaseObserver>(&mut self, reason: IdleReason, now: SimTime, observer: &mut O) {
        let phase = ChasePhase::Idle(reason);
        if self.state.phase != phase {
            self.state.phase = phase;
            observer.on_idle(now, reason);
        }
    }
}
