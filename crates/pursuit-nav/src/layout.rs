//! Declarative graph description, loadable from scene files.
//!
//! Links refer to nodes by name so hand-written layouts stay readable.

use pursuit_core::{NodeId, Vec3};

use crate::{NavError, NavGraph, NavGraphBuilder, NavResult};

/// One node of a [`GraphLayout`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeLayout {
    pub name: String,
    pub position: Vec3,
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub layer: u8,
}

/// A link between two named nodes.  Bidirectional unless `one_way` is set;
/// costed by Euclidean length unless `cost` is given.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkLayout {
    pub from: String,
    pub to: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub one_way: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphLayout {
    pub nodes: Vec<NodeLayout>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub links: Vec<LinkLayout>,
}

impl GraphLayout {
    /// Resolve names and build the graph.
    pub fn build(&self) -> NavResult<NavGraph> {
        let mut b = NavGraphBuilder::new();
        for n in &self.nodes {
            b.add_waypoint(n.name.clone(), n.position, &n.category, n.layer);
        }

        // Names are resolved against layout order; duplicates are left for
        // `build` to report.
        let lookup = |name: &str| {
            self.nodes
                .iter()
                .position(|n| n.name == name)
                .map(NodeId::from_index)
                .ok_or_else(|| NavError::UnknownName(name.to_owned()))
        };

        for link in &self.links {
            let from = lookup(&link.from)?;
            let to   = lookup(&link.to)?;
            let cost = match link.cost {
                Some(c) => c,
                None => self.nodes[from.index()].position.distance(self.nodes[to.index()].position),
            };
            b.add_directed_link(from, to, cost);
            if !link.one_way {
                b.add_directed_link(to, from, cost);
            }
        }

        b.build()
    }
}
