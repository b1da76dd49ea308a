//! Unit tests for pursuit-nav.
//!
//! All tests use hand-built graphs.

#[cfg(test)]
mod helpers {
    use pursuit_core::{NodeId, Vec3};
    use crate::{NavGraph, NavGraphBuilder};

    pub const WAYPOINT: &str = "AmbientWaypoint";

    /// Small corridor network on the XZ plane.
    ///
    /// ```text
    ///   0(0,0) ── 1(10,0) ── 2(20,0)
    ///     │                    │
    ///   3(0,30) ──────────── 4(20,30)
    /// ```
    ///
    /// Links are Euclidean-costed:
    ///   0→1→2→4 = 10 + 10 + 30 = 50
    ///   0→3→4   = 30 + 20      = 50
    /// Tie broken deterministically by the Dijkstra frontier ordering.
    ///
    /// Nodes 1, 2, 4 are waypoints; 4 is on layer 2, the rest on layer 0.
    pub fn corridor() -> (NavGraph, [NodeId; 5]) {
        let mut b = NavGraphBuilder::new();
        let n0 = b.add_node("door", Vec3::new(0.0, 0.0, 0.0));
        let n1 = b.add_waypoint("hall_a", Vec3::new(10.0, 0.0, 0.0), WAYPOINT, 0);
        let n2 = b.add_waypoint("hall_b", Vec3::new(20.0, 0.0, 0.0), WAYPOINT, 0);
        let n3 = b.add_node("vent", Vec3::new(0.0, 0.0, 30.0));
        let n4 = b.add_waypoint("lab", Vec3::new(20.0, 0.0, 30.0), WAYPOINT, 2);

        b.add_link(n0, n1);
        b.add_link(n1, n2);
        b.add_link(n2, n4);
        b.add_link(n0, n3);
        b.add_link(n3, n4);

        (b.build().unwrap(), [n0, n1, n2, n3, n4])
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use pursuit_core::{NodeId, Vec3};
    use crate::{NavError, NavGraph, NavGraphBuilder};

    #[test]
    fn empty_build() {
        let g = NavGraphBuilder::new().build().unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert!(NavGraph::empty().is_empty());
    }

    #[test]
    fn add_link_is_bidirectional_and_euclidean() {
        let mut b = NavGraphBuilder::new();
        let a = b.add_node("a", Vec3::ZERO);
        let c = b.add_node("c", Vec3::new(3.0, 4.0, 0.0));
        b.add_link(a, c);
        let g = b.build().unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edge_cost, vec![5.0, 5.0]);
    }

    #[test]
    fn csr_out_edges() {
        let (g, [n0, n1, n2, n3, n4]) = super::helpers::corridor();
        assert_eq!(g.out_degree(n0), 2);
        assert_eq!(g.out_degree(n1), 2);
        assert_eq!(g.out_degree(n2), 2);
        assert_eq!(g.out_degree(n3), 2);
        assert_eq!(g.out_degree(n4), 2);
        for e in g.out_edges(n1) {
            assert_eq!(g.edge_from[e.index()], n1);
        }
        let neighbors: Vec<_> = g.neighbors(n0).collect();
        assert_eq!(neighbors, vec![n1, n3]);
    }

    #[test]
    fn name_and_category_lookup() {
        let (g, [n0, n1, ..]) = super::helpers::corridor();
        assert_eq!(g.node_by_name("door"), Some(n0));
        assert_eq!(g.node_name(n1), Some("hall_a"));
        assert_eq!(g.node_category(n1), Some(super::helpers::WAYPOINT));
        assert_eq!(g.node_category(n0), Some(""));
        assert_eq!(g.node_by_name("attic"), None);
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut b = NavGraphBuilder::new();
        b.add_node("x", Vec3::ZERO);
        b.add_node("x", Vec3::ONE);
        assert!(matches!(b.build(), Err(NavError::DuplicateName(n)) if n == "x"));
    }

    #[test]
    fn link_to_unknown_node_rejected() {
        let mut b = NavGraphBuilder::new();
        let a = b.add_node("a", Vec3::ZERO);
        b.add_directed_link(a, NodeId(9), 1.0);
        assert!(matches!(b.build(), Err(NavError::NodeNotFound(NodeId(9)))));
    }

    #[test]
    fn negative_cost_rejected() {
        let mut b = NavGraphBuilder::new();
        let a = b.add_node("a", Vec3::ZERO);
        let c = b.add_node("c", Vec3::ONE);
        b.add_directed_link(a, c, -1.0);
        assert!(matches!(b.build(), Err(NavError::BadLinkCost { .. })));
    }

    #[test]
    fn path_positions_follow_path() {
        let (g, [n0, n1, n2, ..]) = super::helpers::corridor();
        let pts = g.path_positions(&[n0, n1, n2]);
        assert_eq!(pts, vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::new(20.0, 0.0, 0.0)]);
    }
}

// ── Shortest paths ────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use pursuit_core::{NodeId, Vec3};
    use crate::{Graph, NavError, NavGraphBuilder};

    #[test]
    fn trivial_same_node() {
        let (g, [n0, ..]) = super::helpers::corridor();
        let p = g.find_path(n0, n0).unwrap();
        assert!(p.is_trivial());
        assert_eq!(p.nodes, vec![n0]);
        assert_eq!(g.shortest_path(n0, n0), Some(vec![n0]));
    }

    #[test]
    fn shortest_path_prefers_cheaper_route() {
        let (g, [_, n1, n2, _, n4]) = super::helpers::corridor();
        // From hall_a: 1→2→4 = 40 vs 1→0→3→4 = 60.
        let p = g.find_path(n1, n4).unwrap();
        assert_eq!(p.nodes, vec![n1, n2, n4]);
        assert_eq!(p.hop_count(), 2);
        assert_eq!(p.total_cost, 40.0);
    }

    #[test]
    fn equal_cost_paths_are_deterministic() {
        let (g, [n0, _, _, _, n4]) = super::helpers::corridor();
        let first = g.shortest_path(n0, n4).unwrap();
        for _ in 0..10 {
            assert_eq!(g.shortest_path(n0, n4).unwrap(), first);
        }
        assert_eq!(first.first(), Some(&n0));
        assert_eq!(first.last(), Some(&n4));
    }

    #[test]
    fn disconnected_returns_none() {
        let mut b = NavGraphBuilder::new();
        let a = b.add_node("a", Vec3::ZERO);
        let c = b.add_node("c", Vec3::X);
        let g = b.build().unwrap();
        assert!(matches!(g.find_path(a, c), Err(NavError::NoPath { .. })));
        assert_eq!(g.shortest_path(a, c), None);
    }

    #[test]
    fn one_way_blocks_return() {
        let mut b = NavGraphBuilder::new();
        let a = b.add_node("a", Vec3::ZERO);
        let c = b.add_node("c", Vec3::X);
        b.add_directed_link(a, c, 1.0);
        let g = b.build().unwrap();
        assert!(g.shortest_path(a, c).is_some());
        assert!(g.shortest_path(c, a).is_none());
    }

    #[test]
    fn unknown_endpoint_is_not_found() {
        let (g, [n0, ..]) = super::helpers::corridor();
        assert!(matches!(g.find_path(n0, NodeId(99)), Err(NavError::NodeNotFound(_))));
        assert!(!g.contains(NodeId(99)));
        assert_eq!(g.position(NodeId(99)), None);
    }

    #[test]
    fn graph_trait_through_reference() {
        fn hops<G: Graph>(g: G, a: NodeId, b: NodeId) -> usize {
            g.shortest_path(a, b).map_or(0, |p| p.len() - 1)
        }
        let (g, [_, n1, _, _, n4]) = super::helpers::corridor();
        assert_eq!(hops(&g, n1, n4), 2);
    }
}

// ── Proximity ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod proximity {
    use pursuit_core::{LayerMask, Vec3};
    use crate::{NavGraphBuilder, ProximityIndex, ProximityQuery};
    use super::helpers::WAYPOINT;

    fn query(point: Vec3, radius: f32, mask: LayerMask) -> ProximityQuery<'static> {
        ProximityQuery { point, category: WAYPOINT, max_radius: radius, mask }
    }

    #[test]
    fn nearest_waypoint_skips_other_categories() {
        let (g, [_, n1, ..]) = super::helpers::corridor();
        // Closest node to the origin is the uncategorized door; hall_a wins.
        let hit = g.nearest(&query(Vec3::new(1.0, 0.0, 0.0), 100.0, LayerMask::ALL));
        assert_eq!(hit, Some(n1));
    }

    #[test]
    fn radius_limits_search() {
        let (g, _) = super::helpers::corridor();
        assert_eq!(g.nearest(&query(Vec3::new(0.0, 0.0, 15.0), 5.0, LayerMask::ALL)), None);
    }

    #[test]
    fn layer_mask_filters() {
        let (g, [.., n2, _, n4]) = super::helpers::corridor();
        let near_lab = Vec3::new(20.0, 0.0, 29.0);
        assert_eq!(g.nearest(&query(near_lab, 100.0, LayerMask::ALL)), Some(n4));
        // Hide layer 2: hall_b is the next waypoint out.
        let masked = LayerMask::ALL.without(2);
        assert_eq!(g.nearest(&query(near_lab, 100.0, masked)), Some(n2));
    }

    #[test]
    fn unknown_category_finds_nothing() {
        let (g, _) = super::helpers::corridor();
        let q = ProximityQuery {
            point:      Vec3::ZERO,
            category:   "Vent",
            max_radius: 1_000.0,
            mask:       LayerMask::ALL,
        };
        assert_eq!(g.nearest(&q), None);
    }

    #[test]
    fn empty_graph_finds_nothing() {
        let g = NavGraphBuilder::new().build().unwrap();
        assert_eq!(g.nearest(&query(Vec3::ZERO, 10.0, LayerMask::ALL)), None);
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout {
    use pursuit_core::Vec3;
    use crate::{GraphLayout, LinkLayout, NavError, NodeLayout};

    fn node(name: &str, x: f32) -> NodeLayout {
        NodeLayout {
            name:     name.to_owned(),
            position: Vec3::new(x, 0.0, 0.0),
            category: String::new(),
            layer:    0,
        }
    }

    fn link(from: &str, to: &str, one_way: bool) -> LinkLayout {
        LinkLayout { from: from.to_owned(), to: to.to_owned(), one_way, cost: None }
    }

    #[test]
    fn builds_named_links() {
        let layout = GraphLayout {
            nodes: vec![node("a", 0.0), node("b", 2.0), node("c", 5.0)],
            links: vec![link("a", "b", false), link("b", "c", true)],
        };
        let g = layout.build().unwrap();
        assert_eq!(g.edge_count(), 3);
        let a = g.node_by_name("a").unwrap();
        let c = g.node_by_name("c").unwrap();
        let p = g.find_path(a, c).unwrap();
        assert_eq!(p.total_cost, 5.0);
        assert!(g.find_path(c, a).is_err());
    }

    #[test]
    fn unknown_link_name_rejected() {
        let layout = GraphLayout {
            nodes: vec![node("a", 0.0)],
            links: vec![link("a", "zz", false)],
        };
        assert!(matches!(layout.build(), Err(NavError::UnknownName(n)) if n == "zz"));
    }
}
