//! The `Graph` trait and the default Dijkstra shortest-path search.
//!
//! # Pluggability
//!
//! The planner in `pursuit-chase` only sees the [`Graph`] trait, so games can
//! hand it their own navigation structure (navmesh portals, A* over a grid)
//! without touching the chase logic.  [`NavGraph`] implements it with
//! Dijkstra over link costs.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pursuit_core::{EdgeId, NodeId, Vec3};

use crate::network::NavGraph;
use crate::{NavError, NavResult};

// ── NodePath ──────────────────────────────────────────────────────────────────

/// The result of a path query: the visited nodes in order, both endpoints
/// included, and the summed link cost.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePath {
    pub nodes: Vec<NodeId>,
    pub total_cost: f32,
}

impl NodePath {
    /// `true` if the source and destination are the same node.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Number of links traversed.
    pub fn hop_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

// ── Graph trait ───────────────────────────────────────────────────────────────

/// Read-only navigation graph as seen by the chase planner.
///
/// Implementations must be deterministic: identical graph state and
/// arguments always produce the same path.
pub trait Graph {
    /// `true` if `node` belongs to the graph.
    fn contains(&self, node: NodeId) -> bool;

    /// World position of `node`, or `None` if it is not in the graph.
    fn position(&self, node: NodeId) -> Option<Vec3>;

    /// Shortest node sequence from `from` to `to`, both included.
    ///
    /// Returns `None` when no path exists.  `from == to` yields a one-node
    /// path.
    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>>;
}

impl<G: Graph + ?Sized> Graph for &G {
    fn contains(&self, node: NodeId) -> bool {
        (**self).contains(node)
    }

    fn position(&self, node: NodeId) -> Option<Vec3> {
        (**self).position(node)
    }

    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        (**self).shortest_path(from, to)
    }
}

impl Graph for NavGraph {
    fn contains(&self, node: NodeId) -> bool {
        self.contains_node(node)
    }

    fn position(&self, node: NodeId) -> Option<Vec3> {
        self.node_position(node)
    }

    fn shortest_path(&self, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
        self.find_path(from, to).ok().map(|p| p.nodes)
    }
}

impl NavGraph {
    /// Dijkstra from `from` to `to` over `edge_cost`.
    ///
    /// Equal-cost frontier entries are popped in ascending `NodeId` order, so
    /// ties resolve the same way on every run.
    pub fn find_path(&self, from: NodeId, to: NodeId) -> NavResult<NodePath> {
        for end in [from, to] {
            if !self.contains_node(end) {
                return Err(NavError::NodeNotFound(end));
            }
        }
        dijkstra(self, from, to)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

/// Min-heap entry.  `BinaryHeap` is a max-heap, so the ordering is reversed;
/// the secondary `NodeId` key makes tie-breaking deterministic.
#[derive(Copy, Clone, PartialEq)]
struct Frontier {
    cost: f32,
    node: NodeId,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn dijkstra(graph: &NavGraph, from: NodeId, to: NodeId) -> NavResult<NodePath> {
    if from == to {
        return Ok(NodePath { nodes: vec![from], total_cost: 0.0 });
    }

    let n = graph.node_count();
    let mut dist      = vec![f32::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(Frontier { cost: 0.0, node: from });

    while let Some(Frontier { cost, node }) = heap.pop() {
        if node == to {
            return Ok(reconstruct(graph, &prev_edge, from, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[node.index()] {
            continue;
        }

        for edge in graph.out_edges(node) {
            let neighbor = graph.edge_to[edge.index()];
            let new_cost = cost + graph.edge_cost[edge.index()];

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                prev_edge[neighbor.index()] = edge;
                heap.push(Frontier { cost: new_cost, node: neighbor });
            }
        }
    }

    Err(NavError::NoPath { from, to })
}

fn reconstruct(
    graph:     &NavGraph,
    prev_edge: &[EdgeId],
    from:      NodeId,
    to:        NodeId,
    total:     f32,
) -> NodePath {
    let mut nodes = vec![to];
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        debug_assert_ne!(e, EdgeId::INVALID, "reached node without a predecessor");
        cur = graph.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    NodePath { nodes, total_cost: total }
}
