//! `pursuit-motion` — timed interpolation of the hand between graph nodes.
//!
//! # Crate layout
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`segment`]      | `MotionSegment`: one timed hop                        |
//! | [`interpolator`] | `Interpolator`, `StepOutcome`, `hop_duration`         |
//! | [`error`]        | `MotionError`, `MotionResult<T>`                      |
//!
//! # Movement model
//!
//! 1. The planner computes `duration = distance / speed` and calls
//!    `Interpolator::begin(from, to, duration, now)`.
//! 2. An external fixed-rate driver calls `Interpolator::step(now)` once per
//!    tick; the hand is placed at `lerp(from, to, t)` with
//!    `t = clamp((now - start) / duration, 0, 1)`.
//! 3. When the hand is within the arrival epsilon of `to`, `step` returns
//!    `StepOutcome::Arrived` exactly once and the planner re-plans.

pub mod error;
pub mod interpolator;
pub mod segment;


pub use error::{MotionError, MotionResult};
pub use interpolator::{Interpolator, StepOutcome, hop_duration};
pub use segment::MotionSegment;
