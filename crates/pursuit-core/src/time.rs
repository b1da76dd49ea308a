//! Simulation time model.
//!
//! # Design
//!
//! The chase runs on continuous time: hop durations are `distance / speed`
//! seconds and rarely land on a tick boundary.  Time is therefore an `f64`
//! number of seconds since an arbitrary origin, wrapped in [`SimTime`].
//!
//! Nothing in the workspace reads a wall clock.  Callers supply monotonic
//! time, either their own or from a [`FixedClock`] advanced once per step.

use std::fmt;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp in seconds.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn from_secs(secs: f64) -> Self {
        SimTime(secs)
    }

    #[inline]
    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self`, clamped at zero so a caller
    /// that hands in a stale timestamp never sees negative elapsed time.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl std::ops::Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: f64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}s", self.0)
    }
}

// ── FixedClock ────────────────────────────────────────────────────────────────

/// Fixed-rate step clock, the analogue of an engine's fixed update.
///
/// The current time is derived from the step count rather than accumulated,
/// so long runs do not drift.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedClock {
    /// Time of step 0.
    pub start: SimTime,
    /// Seconds per step.  Default: 0.02 (50 Hz).
    pub step_secs: f64,
    /// Steps taken so far.
    pub steps: u64,
}

impl FixedClock {
    pub const DEFAULT_STEP_SECS: f64 = 0.02;

    pub fn new(start: SimTime, step_secs: f64) -> Self {
        Self { start, step_secs, steps: 0 }
    }

    /// Current simulation time.
    #[inline]
    pub fn now(&self) -> SimTime {
        SimTime(self.start.0 + self.steps as f64 * self.step_secs)
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.steps += 1;
    }

    /// How many steps span `secs` seconds? (rounds up)
    #[inline]
    pub fn steps_for_secs(&self, secs: f64) -> u64 {
        if secs <= 0.0 {
            return 0;
        }
        (secs / self.step_secs).ceil() as u64
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new(SimTime::ZERO, Self::DEFAULT_STEP_SECS)
    }
}

impl fmt::Display for FixedClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {} ({})", self.steps, self.now())
    }
}
