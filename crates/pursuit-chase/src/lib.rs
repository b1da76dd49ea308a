//! `pursuit-chase` — the chase/retreat planner for a pursuing hand.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`state`]    | `ChaseState`, `ChasePhase`, `HopKind`, `IdleReason`        |
//! | [`planner`]  | `Pursuer`: start, plan, step, capture, retreat             |
//! | [`collab`]   | `TargetSource`, `NotificationSink`, `ChaseEvent`           |
//! | [`observer`] | `ChaseObserver`, `NoopObserver`, `TracingObserver`         |
//! | [`error`]    | `ChaseError`, `ChaseResult<T>`                             |
//!
//! # Quick start
//!
//! ```rust,ignore
//! let mut hand = Pursuer::new(ChaseConfig::default(), &graph, &graph, FixedTarget(target), NullSink)?;
//! hand.start_chase(home, clock.now(), &mut NoopObserver)?;
//! loop {
//!     clock.advance();
//!     hand.update(clock.now(), &mut NoopObserver);
//! }
//! ```

pub mod collab;
pub mod error;
pub mod observer;
pub mod planner;
pub mod state;


pub use collab::{ChaseEvent, FixedTarget, NotificationSink, NullSink, TargetSource};
pub use error::{ChaseError, ChaseResult};
pub use observer::{ChaseObserver, NoopObserver, TracingObserver};
pub use planner::Pursuer;
pub use state::{ChasePhase, ChaseState, HopKind, IdleReason};
