//! `pursuit-sim` — fixed-step driving, stall detection, and recording for a
//! pursuing hand.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`driver`]  | `ChaseSim`, `TickOutcome`, the fixed-step loop             |
//! | [`builder`] | `ChaseSimBuilder`                                          |
//! | [`target`]  | `SharedTarget`, `WanderingTarget`                          |
//! | [`hop_log`] | `HopLog`, a CSV `ChaseObserver`                            |
//! | [`error`]   | `SimError`, `SimResult<T>`                                 |
//!
//! # Tick loop
//!
//! ```text
//! start:  Pursuer::start_chase(home, clock.now())
//! tick:   clock.advance()
//!         Pursuer::update(clock.now())      step motion or retry planning
//!         delivered?                        → TickOutcome::Delivered
//!         now − last_progress ≥ timeout?    → TickOutcome::Stalled
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let target = SharedTarget::new(spawn);
//! let mut sim = ChaseSimBuilder::new(config, &graph, &graph, target.clone(), NullSink)
//!     .home(door)
//!     .build()?;
//! sim.start(&mut TracingObserver)?;
//! while sim.tick(&mut TracingObserver) == TickOutcome::Running {
//!     target.set(wanderer.advance(sim.clock.step_secs, &graph));
//! }
//! ```

pub mod builder;
pub mod driver;
pub mod error;
pub mod hop_log;
pub mod target;

#[cfg(test)]
mod tests;

pub use builder::ChaseSimBuilder;
pub use driver::{ChaseSim, TickOutcome};
pub use error::{SimError, SimResult};
pub use hop_log::HopLog;
pub use target::{SharedTarget, WanderingTarget};
