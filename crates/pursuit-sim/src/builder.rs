//! Fluent builder for constructing a [`ChaseSim`].

use pursuit_chase::{NotificationSink, Pursuer, TargetSource};
use pursuit_core::{ChaseConfig, FixedClock, NodeId, SimTime};
use pursuit_nav::{Graph, ProximityIndex};

use crate::{ChaseSim, SimError, SimResult};

/// Fluent builder for [`ChaseSim<G, P, T, N>`].
///
/// # Required inputs
///
/// - [`ChaseConfig`]: speed, attack range, proximity query, …
/// - `G: Graph` and `P: ProximityIndex`: usually the same `&NavGraph`
/// - `T: TargetSource`: where the target is
/// - `N: NotificationSink`: receives game-facing events
/// - `.home(node)`: where the chase starts and the target is delivered
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                               |
/// |-----------------------|---------------------------------------|
/// | `.fixed_step(secs)`   | `FixedClock::DEFAULT_STEP_SECS`       |
/// | `.start_at(t)`        | `SimTime::ZERO`                       |
/// | `.stall_timeout(s)`   | none (never reports a stall)          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = ChaseSimBuilder::new(config, &graph, &graph, target, NullSink)
///     .home(door)
///     .stall_timeout(30.0)
///     .build()?;
/// sim.start(&mut TracingObserver)?;
/// sim.run_for(120.0, &mut TracingObserver);
/// ```
pub struct ChaseSimBuilder<G, P, T, N> {
    config:        ChaseConfig,
    graph:         G,
    proximity:     P,
    target:        T,
    sink:          N,
    home:          Option<NodeId>,
    step_secs:     f64,
    start:         SimTime,
    stall_timeout: Option<f64>,
}

impl<G, P, T, N> ChaseSimBuilder<G, P, T, N>
where
    G: Graph,
    P: ProximityIndex,
    T: TargetSource,
    N: NotificationSink,
{
    /// Create a builder with all required collaborators.
    pub fn new(config: ChaseConfig, graph: G, proximity: P, target: T, sink: N) -> Self {
        Self {
            config,
            graph,
            proximity,
            target,
            sink,
            home:          None,
            step_secs:     FixedClock::DEFAULT_STEP_SECS,
            start:         SimTime::ZERO,
            stall_timeout: None,
        }
    }

    /// The node the chase starts from and the target is brought back to.
    pub fn home(mut self, home: NodeId) -> Self {
        self.home = Some(home);
        self
    }

    /// Seconds per tick.
    pub fn fixed_step(mut self, secs: f64) -> Self {
        self.step_secs = secs;
        self
    }

    pub fn start_at(mut self, start: SimTime) -> Self {
        self.start = start;
        self
    }

    /// Report [`TickOutcome::Stalled`][crate::TickOutcome::Stalled] after
    /// `secs` without reaching a new graph node.
    pub fn stall_timeout(mut self, secs: f64) -> Self {
        self.stall_timeout = Some(secs);
        self
    }

    /// Validate inputs and return a ready-to-start [`ChaseSim`].
    pub fn build(self) -> SimResult<ChaseSim<G, P, T, N>> {
        if !(self.step_secs.is_finite() && self.step_secs > 0.0) {
            return Err(SimError::Config(format!(
                "fixed step must be > 0 seconds, got {}",
                self.step_secs
            )));
        }
        if let Some(limit) = self.stall_timeout {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(SimError::Config(format!(
                    "stall timeout must be > 0 seconds, got {limit}"
                )));
            }
        }
        let home = self
            .home
            .ok_or_else(|| SimError::Config("home node not set".to_owned()))?;
        if !self.graph.contains(home) {
            return Err(pursuit_chase::ChaseError::UnknownHome(home).into());
        }

        let pursuer = Pursuer::new(self.config, self.graph, self.proximity, self.target, self.sink)?;

        Ok(ChaseSim {
            clock: FixedClock::new(self.start, self.step_secs),
            pursuer,
            home,
            stall_timeout: self.stall_timeout,
        })
    }
}
