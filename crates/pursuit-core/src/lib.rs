//! `pursuit-core` — foundational types for the pursuit workspace.
//!
//! This crate is a dependency of every other `pursuit-*` crate.  It has no
//! `pursuit-*` dependencies and minimal external ones (`glam` for vector
//! math and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `EdgeId`                                     |
//! | [`geo`]      | `Vec3` re-export, `LayerMask`, range helpers           |
//! | [`time`]     | `SimTime`, `FixedClock`                                |
//! | [`config`]   | `ChaseConfig` and its validation                       |
//! | [`error`]    | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::ChaseConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{LayerMask, Vec3, within_range};
pub use ids::{EdgeId, NodeId};
pub use time::{FixedClock, SimTime};
