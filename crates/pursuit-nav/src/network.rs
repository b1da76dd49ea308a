//! Navigation graph representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing links.
//! Given a `NodeId n`, its outgoing links occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All link arrays (`edge_from`, `edge_to`, `edge_cost`) are sorted by source
//! node and indexed by `EdgeId`, so a node's outgoing links are a contiguous
//! memory scan in Dijkstra's inner loop.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over node positions answers "nearest node of a
//! category near a point" for [`ProximityIndex`](crate::ProximityIndex).

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use pursuit_core::{EdgeId, NodeId, Vec3};

use crate::{NavError, NavResult};

#[cfg(feature = "fx-hash")]
type NameIndex = rustc_hash::FxHashMap<String, NodeId>;
#[cfg(not(feature = "fx-hash"))]
type NameIndex = std::collections::HashMap<String, NodeId>;

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 3-D point with the node's id, category, and
/// layer so proximity filters never touch the main arrays.
#[derive(Clone)]
pub(crate) struct NodeEntry {
    point:              [f32; 3],
    pub(crate) id:       NodeId,
    pub(crate) category: u16,
    pub(crate) layer:    u8,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── NavGraph ──────────────────────────────────────────────────────────────────

/// Directed navigation graph in CSR format plus a spatial index.
///
/// Immutable once built.  Do not construct directly; use [`NavGraphBuilder`].
pub struct NavGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// World position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<Vec3>,

    /// Display name of each node.  Unique within the graph.
    pub node_name: Vec<String>,

    /// Index into `categories` for each node.
    pub node_category: Vec<u16>,

    /// Layer (0–31) of each node, matched against query layer masks.
    pub node_layer: Vec<u8>,

    /// Interned category names.
    pub categories: Vec<String>,

    // ── CSR link adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Source node of each link; used for path reconstruction.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each link.
    pub edge_to: Vec<NodeId>,

    /// Traversal cost of each link.  Euclidean length unless overridden.
    pub edge_cost: Vec<f32>,

    // ── Lookup structures ─────────────────────────────────────────────────
    names: NameIndex,
    pub(crate) spatial_idx: RTree<NodeEntry>,
}

impl NavGraph {
    /// Construct an empty graph with no nodes or links.
    ///
    /// Every path query against an empty graph returns `NodeNotFound`.
    pub fn empty() -> Self {
        Self {
            node_pos:       Vec::new(),
            node_name:      Vec::new(),
            node_category:  Vec::new(),
            node_layer:     Vec::new(),
            categories:     vec![NavGraphBuilder::UNCATEGORIZED.to_owned()],
            node_out_start: vec![0],
            edge_from:      Vec::new(),
            edge_to:        Vec::new(),
            edge_cost:      Vec::new(),
            names:          NameIndex::default(),
            spatial_idx:    RTree::new(),
        }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    #[inline]
    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_pos.len()
    }

    // ── Node attributes ───────────────────────────────────────────────────

    #[inline]
    pub fn node_position(&self, node: NodeId) -> Option<Vec3> {
        self.node_pos.get(node.index()).copied()
    }

    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.node_name.get(node.index()).map(String::as_str)
    }

    pub fn node_category(&self, node: NodeId) -> Option<&str> {
        self.node_category
            .get(node.index())
            .map(|&c| self.categories[c as usize].as_str())
    }

    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// All node ids in ascending order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.node_pos.len()).map(NodeId::from_index)
    }

    /// Interned index of `category`, if any node uses it.
    pub(crate) fn category_index(&self, category: &str) -> Option<u16> {
        self.categories
            .iter()
            .position(|c| c == category)
            .map(|i| i as u16)
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing links from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(EdgeId::from_index)
    }

    /// Nodes directly reachable from `node`.
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(node).map(|e| self.edge_to[e.index()])
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// World positions along `path`, for handing a planned path to a debug
    /// line renderer.  Unknown ids are skipped.
    pub fn path_positions(&self, path: &[NodeId]) -> Vec<Vec3> {
        path.iter().filter_map(|&n| self.node_position(n)).collect()
    }
}

// ── NavGraphBuilder ───────────────────────────────────────────────────────────

/// Construct a [`NavGraph`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use pursuit_core::Vec3;
/// use pursuit_nav::NavGraphBuilder;
///
/// let mut b = NavGraphBuilder::new();
/// let a = b.add_node("door", Vec3::ZERO);
/// let c = b.add_waypoint("hall", Vec3::new(4.0, 0.0, 0.0), "AmbientWaypoint", 0);
/// b.add_link(a, c);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 2); // bidirectional
/// ```
pub struct NavGraphBuilder {
    nodes:      Vec<RawNode>,
    categories: Vec<String>,
    raw_edges:  Vec<RawEdge>,
}

struct RawNode {
    name:     String,
    pos:      Vec3,
    category: u16,
    layer:    u8,
}

struct RawEdge {
    from: NodeId,
    to:   NodeId,
    cost: f32,
}

impl NavGraphBuilder {
    /// Category given to nodes added without one.
    pub const UNCATEGORIZED: &'static str = "";

    pub fn new() -> Self {
        Self {
            nodes:      Vec::new(),
            categories: vec![Self::UNCATEGORIZED.to_owned()],
            raw_edges:  Vec::new(),
        }
    }

    /// Add an uncategorized node on layer 0 and return its `NodeId`
    /// (sequential from 0).
    pub fn add_node(&mut self, name: impl Into<String>, pos: Vec3) -> NodeId {
        self.push_node(name.into(), pos, 0, 0)
    }

    /// Add a node tagged with `category` on `layer`.
    pub fn add_waypoint(
        &mut self,
        name:     impl Into<String>,
        pos:      Vec3,
        category: &str,
        layer:    u8,
    ) -> NodeId {
        let category = self.intern(category);
        self.push_node(name.into(), pos, category, layer)
    }

    /// Add a **directed** link with an explicit traversal cost.
    pub fn add_directed_link(&mut self, from: NodeId, to: NodeId, cost: f32) {
        self.raw_edges.push(RawEdge { from, to, cost });
    }

    /// Add links in **both directions**, costed by the Euclidean distance
    /// between the two nodes.
    ///
    /// Endpoints that were never added are reported by `build`.
    pub fn add_link(&mut self, a: NodeId, b: NodeId) {
        let cost = match (self.nodes.get(a.index()), self.nodes.get(b.index())) {
            (Some(na), Some(nb)) => na.pos.distance(nb.pos),
            _ => 0.0,
        };
        self.add_directed_link(a, b, cost);
        self.add_directed_link(b, a, cost);
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Validate and consume the builder, producing a [`NavGraph`].
    ///
    /// Fails on duplicate node names, links referencing unknown nodes, and
    /// negative or non-finite link costs.
    pub fn build(self) -> NavResult<NavGraph> {
        let node_count = self.nodes.len();

        let mut names = NameIndex::default();
        for (i, node) in self.nodes.iter().enumerate() {
            if names.insert(node.name.clone(), NodeId::from_index(i)).is_some() {
                return Err(NavError::DuplicateName(node.name.clone()));
            }
        }

        for e in &self.raw_edges {
            for end in [e.from, e.to] {
                if end.index() >= node_count {
                    return Err(NavError::NodeNotFound(end));
                }
            }
            if !(e.cost.is_finite() && e.cost >= 0.0) {
                return Err(NavError::BadLinkCost { from: e.from, to: e.to, cost: e.cost });
            }
        }

        // Sort links by source node for CSR construction.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| (e.from.0, e.to.0));

        let edge_from: Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:   Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_cost: Vec<f32>    = raw.iter().map(|e| e.cost).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| NodeEntry {
                point:    n.pos.to_array(),
                id:       NodeId::from_index(i),
                category: n.category,
                layer:    n.layer,
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let mut node_pos      = Vec::with_capacity(node_count);
        let mut node_name     = Vec::with_capacity(node_count);
        let mut node_category = Vec::with_capacity(node_count);
        let mut node_layer    = Vec::with_capacity(node_count);
        for n in self.nodes {
            node_pos.push(n.pos);
            node_name.push(n.name);
            node_category.push(n.category);
            node_layer.push(n.layer);
        }

        Ok(NavGraph {
            node_pos,
            node_name,
            node_category,
            node_layer,
            categories: self.categories,
            node_out_start,
            edge_from,
            edge_to,
            edge_cost,
            names,
            spatial_idx,
        })
    }

    fn push_node(&mut self, name: String, pos: Vec3, category: u16, layer: u8) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(RawNode { name, pos, category, layer });
        id
    }

    fn intern(&mut self, category: &str) -> u16 {
        match self.categories.iter().position(|c| c == category) {
            Some(i) => i as u16,
            None => {
                self.categories.push(category.to_owned());
                (self.categories.len() - 1) as u16
            }
        }
    }
}

impl Default for NavGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
