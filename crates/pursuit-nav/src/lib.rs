//! `pursuit-nav` — navigation graph, shortest paths, and proximity queries.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`network`]   | `NavGraph` (CSR + R-tree), `NavGraphBuilder`              |
//! | [`path`]      | `Graph` trait, `NodePath`, Dijkstra                       |
//! | [`proximity`] | `ProximityIndex` trait, `ProximityQuery`                  |
//! | [`layout`]    | `GraphLayout`: named nodes and links, serde-loadable      |
//! | [`error`]     | `NavError`, `NavResult<T>`                                |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash for the node-name index.                            |
//! | `serde`   | Derives `Serialize`/`Deserialize` on layout types.         |

pub mod error;
pub mod layout;
pub mod network;
pub mod path;
pub mod proximity;

#[cfg(test)]
mod tests;

pub use error::{NavError, NavResult};
pub use layout::{GraphLayout, LinkLayout, NodeLayout};
pub use network::{NavGraph, NavGraphBuilder};
pub use path::{Graph, NodePath};
pub use proximity::{ProximityIndex, ProximityQuery};
