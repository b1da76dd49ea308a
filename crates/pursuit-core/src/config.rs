//! Operator-tuned chase parameters.

use crate::{CoreError, CoreResult, LayerMask};

/// Tunables for one pursuing hand.
///
/// Set once by the operator (typically loaded from a scene file by the
/// application crate) and never mutated during a chase.  Call
/// [`validate`](Self::validate) before use; `Pursuer::new` does this for you.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChaseConfig {
    /// World units per second along a hop.  Must be `> 0`.
    pub agent_speed: f32,

    /// The hand attacks when the target is strictly closer than this.
    /// Must be `>= 0`; `0` disables the range check entirely.
    pub attack_range: f32,

    /// A hop is complete once the hand is closer than this to the hop's end.
    /// Must be `> 0` so floating-point accumulation cannot stall arrival.
    pub arrival_epsilon: f32,

    /// Category of nodes considered when locating the target on the graph.
    pub waypoint_category: String,

    /// Maximum distance from the target at which a waypoint still counts.
    pub search_radius: f32,

    /// Layers visible to the target-locating query.
    pub layer_mask: LayerMask,

    /// Capture the target as soon as the attack branch fires and start the
    /// retreat in the same planning call.
    pub grab_on_attack: bool,
}

impl ChaseConfig {
    pub const DEFAULT_WAYPOINT_CATEGORY: &'static str = "AmbientWaypoint";

    /// Reject values that would make the planner or interpolator misbehave.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.agent_speed.is_finite() && self.agent_speed > 0.0) {
            return Err(invalid("agent_speed", format!("must be > 0, got {}", self.agent_speed)));
        }
        if !(self.attack_range.is_finite() && self.attack_range >= 0.0) {
            return Err(invalid("attack_range", format!("must be >= 0, got {}", self.attack_range)));
        }
        if !(self.arrival_epsilon.is_finite() && self.arrival_epsilon > 0.0) {
            return Err(invalid(
                "arrival_epsilon",
                format!("must be > 0, got {}", self.arrival_epsilon),
            ));
        }
        if !(self.search_radius.is_finite() && self.search_radius > 0.0) {
            return Err(invalid("search_radius", format!("must be > 0, got {}", self.search_radius)));
        }
        if self.waypoint_category.is_empty() {
            return Err(invalid("waypoint_category", "must not be empty".to_owned()));
        }
        Ok(())
    }
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            agent_speed:       1.0,
            attack_range:      10.0,
            arrival_epsilon:   0.001,
            waypoint_category: Self::DEFAULT_WAYPOINT_CATEGORY.to_owned(),
            search_radius:     100.0,
            layer_mask:        LayerMask::ALL,
            grab_on_attack:    false,
        }
    }
}

fn invalid(field: &'static str, reason: String) -> CoreError {
    CoreError::InvalidConfig { field, reason }
}
