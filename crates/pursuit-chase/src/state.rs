//! Per-hand chase state.

use std::fmt;

use pursuit_core::{NodeId, SimTime};

/// Why the planner is holding position without a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleReason {
    /// No waypoint has ever been found near the target.
    NoTargetNode,
    /// The graph has no path to the last known target node.
    NoPath,
    /// Too many zero-length hops were completed in a single planning call.
    HopBudgetExhausted,
    /// The graph has no position for one end of the next hop.
    UnplacedNode,
    /// The next hop has no finite positive travel time.
    InvalidHop,
}

/// Coarse mode of the planner, used for transition notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChasePhase {
    /// No chase has been started.
    Inactive,
    /// A chase started and no decision has been made yet.
    Planning,
    /// Chasing, but holding at the current graph node this tick.
    Idle(IdleReason),
    /// Moving along a chase hop.
    Advancing,
    /// In range of the target, holding position.
    Attacking,
    /// Moving along a retreat hop with the captured target.
    Retreating,
    /// Home reached with the target; the chase is over.
    Delivered,
}

impl ChasePhase {
    /// `true` while the planner should be re-invoked when not moving.
    pub fn is_holding(self) -> bool {
        matches!(self, ChasePhase::Planning | ChasePhase::Idle(_) | ChasePhase::Attacking)
    }
}

impl fmt::Display for ChasePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChasePhase::Inactive   => f.write_str("inactive"),
            ChasePhase::Planning   => f.write_str("planning"),
            ChasePhase::Idle(r)    => write!(f, "idle({r:?})"),
            ChasePhase::Advancing  => f.write_str("advancing"),
            ChasePhase::Attacking  => f.write_str("attacking"),
            ChasePhase::Retreating => f.write_str("retreating"),
            ChasePhase::Delivered  => f.write_str("delivered"),
        }
    }
}

/// Direction of a hop, decided when it is committed.  On arrival an advance
/// extends `path_traveled` and a retreat shortens it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HopKind {
    Advance,
    Retreat,
}

/// Everything the planner remembers between ticks.
///
/// Invariant while a chase is active: `path_traveled` is non-empty and its
/// last element is the hand's last confirmed graph node.
#[derive(Debug, Clone, PartialEq)]
pub struct ChaseState {
    /// Nodes reached since the chase started, home first.
    pub path_traveled: Vec<NodeId>,

    /// Most recent plan from `previous_node` toward the target.
    pub current_path: Vec<NodeId>,

    /// Start of the current (or last) hop.
    pub previous_node: Option<NodeId>,

    /// End of the current (or last) hop.
    pub next_node: Option<NodeId>,

    /// Last waypoint seen near the target.  Only a fresh find replaces it.
    pub last_known_target_node: Option<NodeId>,

    /// The target has been grabbed; plan retreats instead of chases.
    pub captured: bool,

    pub phase: ChasePhase,

    /// Direction of the hop in flight, if any.
    pub hop: Option<HopKind>,

    /// When `path_traveled` last changed.
    pub last_progress: SimTime,
}

impl ChaseState {
    pub fn new() -> Self {
        Self {
            path_traveled:          Vec::new(),
            current_path:           Vec::new(),
            previous_node:          None,
            next_node:              None,
            last_known_target_node: None,
            captured:               false,
            phase:                  ChasePhase::Inactive,
            hop:                    None,
            last_progress:          SimTime::ZERO,
        }
    }

    /// Reset for a chase starting at `home`.
    ///
    /// `last_known_target_node` is kept: it is only ever replaced by a fresh
    /// proximity hit.
    pub fn restart(&mut self, home: NodeId, now: SimTime) {
        self.path_traveled.clear();
        self.path_traveled.push(home);
        self.current_path.clear();
        self.previous_node = None;
        self.next_node     = None;
        self.captured      = false;
        self.phase         = ChasePhase::Planning;
        self.hop           = None;
        self.last_progress = now;
    }

    /// The hand's last confirmed graph node.
    #[inline]
    pub fn anchor(&self) -> Option<NodeId> {
        self.path_traveled.last().copied()
    }

    #[inline]
    pub fn home(&self) -> Option<NodeId> {
        self.path_traveled.first().copied()
    }

    /// `true` between `start_chase` and delivery.
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, ChasePhase::Inactive | ChasePhase::Delivered)
    }
}

impl Default for ChaseState {
    fn default() -> Self {
        Self::new()
    }
}
