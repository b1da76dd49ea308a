//! A single timed hop between two world positions.

use pursuit_core::{SimTime, Vec3};

/// One in-flight hop: the hand leaves `from` at `start` and reaches `to`
/// after `duration` seconds.
///
/// Only [`Interpolator::begin`](crate::Interpolator::begin) creates segments,
/// and it guarantees `duration > 0` and `from != to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSegment {
    pub from:     Vec3,
    pub to:       Vec3,
    pub start:    SimTime,
    pub duration: f64,
}

impl MotionSegment {
    /// Fraction of the hop completed at `now`, in `[0.0, 1.0]`.
    pub fn progress(&self, now: SimTime) -> f32 {
        (now.since(self.start) / self.duration).clamp(0.0, 1.0) as f32
    }

    /// Position at fraction `t`.  Exactly `to` at `t >= 1` so arrival never
    /// depends on floating-point accumulation.
    pub fn position_at(&self, t: f32) -> Vec3 {
        if t >= 1.0 {
            self.to
        } else {
            self.from.lerp(self.to, t)
        }
    }
}
