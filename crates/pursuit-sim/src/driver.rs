//! The `ChaseSim` fixed-step driver.

use pursuit_chase::{ChaseObserver, ChasePhase, NotificationSink, Pursuer, TargetSource};
use pursuit_core::{FixedClock, NodeId, SimTime};
use pursuit_nav::{Graph, ProximityIndex};

use crate::SimResult;

/// What one [`ChaseSim::tick`] left behind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The chase is still under way.
    Running,
    /// The target reached home; further ticks do nothing.
    Delivered,
    /// `path_traveled` has not changed for at least the stall timeout.
    Stalled { idle_secs: f64 },
}

/// Drives one [`Pursuer`] from a [`FixedClock`].
///
/// Each tick advances the clock by one fixed step and calls
/// [`Pursuer::update`].  With a stall timeout set, a tick also reports
/// [`TickOutcome::Stalled`] once the hand has gone that long without reaching
/// a new graph node; the chase keeps running and the caller decides what to
/// do about it.
///
/// Create via [`ChaseSimBuilder`][crate::ChaseSimBuilder].
pub struct ChaseSim<G, P, T, N> {
    /// Fixed-step simulation clock.
    pub clock: FixedClock,

    /// The pursuing hand.
    pub pursuer: Pursuer<G, P, T, N>,

    pub(crate) home:          NodeId,
    pub(crate) stall_timeout: Option<f64>,
}

impl<G, P, T, N> ChaseSim<G, P, T, N>
where
    G: Graph,
    P: ProximityIndex,
    T: TargetSource,
    N: NotificationSink,
{
    /// Start the chase from the configured home node at the current time.
    pub fn start<O: ChaseObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        self.pursuer.start_chase(self.home, self.clock.now(), observer)?;
        tracing::debug!(home = %self.home, time = self.clock.now().0, "simulation started");
        Ok(())
    }

    /// Advance one fixed step.
    pub fn tick<O: ChaseObserver>(&mut self, observer: &mut O) -> TickOutcome {
        self.clock.advance();
        self.pursuer.update(self.clock.now(), observer);

        if self.pursuer.phase() == ChasePhase::Delivered {
            return TickOutcome::Delivered;
        }
        match self.stall_timeout {
            Some(limit) if self.pursuer.state().is_active() => {
                let idle_secs = self.stalled_for();
                if idle_secs >= limit {
                    TickOutcome::Stalled { idle_secs }
                } else {
                    TickOutcome::Running
                }
            }
            _ => TickOutcome::Running,
        }
    }

    /// Tick for up to `secs` of simulated time, stopping early on delivery
    /// or a stall.  Returns the last outcome.
    pub fn run_for<O: ChaseObserver>(&mut self, secs: f64, observer: &mut O) -> TickOutcome {
        let steps = self.clock.steps_for_secs(secs);
        let mut outcome = TickOutcome::Running;
        for _ in 0..steps {
            outcome = self.tick(observer);
            if outcome != TickOutcome::Running {
                if let TickOutcome::Stalled { idle_secs } = outcome {
                    tracing::warn!(
                        time = self.clock.now().0,
                        idle_secs,
                        phase = %self.pursuer.phase(),
                        "chase stalled"
                    );
                }
                break;
            }
        }
        outcome
    }

    /// Seconds since `path_traveled` last changed.
    pub fn stalled_for(&self) -> f64 {
        self.clock.now().since(self.pursuer.state().last_progress)
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    #[inline]
    pub fn home(&self) -> NodeId {
        self.home
    }

    #[inline]
    pub fn stall_timeout(&self) -> Option<f64> {
        self.stall_timeout
    }
}
