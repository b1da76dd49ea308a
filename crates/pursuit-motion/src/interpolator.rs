//! The hand's continuous motion between graph nodes.

use pursuit_core::{SimTime, Vec3};

use crate::{MotionError, MotionResult, MotionSegment};

/// Result of one [`Interpolator::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// No segment in flight; nothing changed.
    Idle,
    /// Still travelling; `progress` is the fraction completed.
    Moving { progress: f32 },
    /// The hand reached the segment's end during this step.  Reported once
    /// per [`begin`](Interpolator::begin).
    Arrived,
}

/// Moves the hand along one segment at a time and reports arrival.
///
/// The interpolator never calls back into its owner: arrival is a return
/// value, and the owner decides what happens next.
#[derive(Debug, Clone)]
pub struct Interpolator {
    segment:  Option<MotionSegment>,
    position: Vec3,
    /// Highest progress reported for the current segment.
    progress: f32,
    epsilon:  f32,
}

impl Interpolator {
    /// A stationary interpolator at `position`.
    pub fn new(position: Vec3, arrival_epsilon: f32) -> Self {
        Self {
            segment:  None,
            position,
            progress: 0.0,
            epsilon:  arrival_epsilon,
        }
    }

    /// Start moving from `from` to `to` over `duration` seconds beginning at
    /// `now`.  Any segment already in flight is discarded.
    ///
    /// # Errors
    ///
    /// [`MotionError::NonPositiveDuration`] unless `duration > 0`, and
    /// [`MotionError::ZeroLength`] when `from == to`.  The interpolator is
    /// unchanged on error.
    pub fn begin(&mut self, from: Vec3, to: Vec3, duration: f64, now: SimTime) -> MotionResult<()> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(MotionError::NonPositiveDuration(duration));
        }
        if from == to {
            return Err(MotionError::ZeroLength);
        }
        self.segment  = Some(MotionSegment { from, to, start: now, duration });
        self.position = from;
        self.progress = 0.0;
        Ok(())
    }

    /// Advance the hand to its position at `now`.
    ///
    /// Progress never decreases within a segment, even if `now` goes
    /// backwards.  Once the hand is within the arrival epsilon of the end, the
    /// segment is cleared and [`StepOutcome::Arrived`] is returned; later calls
    /// return [`StepOutcome::Idle`] until the next `begin`.
    pub fn step(&mut self, now: SimTime) -> StepOutcome {
        let Some(seg) = self.segment else {
            return StepOutcome::Idle;
        };

        self.progress = seg.progress(now).max(self.progress);
        self.position = seg.position_at(self.progress);

        if self.position.distance(seg.to) < self.epsilon {
            self.segment = None;
            StepOutcome::Arrived
        } else {
            StepOutcome::Moving { progress: self.progress }
        }
    }

    /// Drop the in-flight segment, leaving the hand where it is.
    pub fn cancel(&mut self) {
        self.segment  = None;
        self.progress = 0.0;
    }

    /// Cancel any motion and put the hand at `position`.
    pub fn place(&mut self, position: Vec3) {
        self.cancel();
        self.position = position;
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.segment.is_some()
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn segment(&self) -> Option<&MotionSegment> {
        self.segment.as_ref()
    }

    /// Progress of the current segment; `0.0` when stationary.
    #[inline]
    pub fn progress(&self) -> f32 {
        if self.segment.is_some() { self.progress } else { 0.0 }
    }

    #[inline]
    pub fn arrival_epsilon(&self) -> f32 {
        self.epsilon
    }
}

/// Seconds to travel from `from` to `to` at `speed` units per second.
///
/// # Errors
///
/// [`MotionError::NonPositiveSpeed`] unless `speed > 0`.
pub fn hop_duration(from: Vec3, to: Vec3, speed: f32) -> MotionResult<f64> {
    if !(speed.is_finite() && speed > 0.0) {
        return Err(MotionError::NonPositiveSpeed(speed));
    }
    Ok(from.distance(to) as f64 / speed as f64)
}
