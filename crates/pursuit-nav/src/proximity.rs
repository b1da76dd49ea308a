//! "Nearest node of a category near a point" queries.

use pursuit_core::{LayerMask, NodeId, Vec3};

use crate::network::NavGraph;

/// Parameters of a proximity lookup.
///
/// `category` and `mask` are opaque to the chase planner; their meaning is
/// owned by the [`ProximityIndex`] implementation.
#[derive(Debug, Clone, Copy)]
pub struct ProximityQuery<'a> {
    pub point:      Vec3,
    pub category:   &'a str,
    pub max_radius: f32,
    pub mask:       LayerMask,
}

/// Locates graph nodes near a world point.
pub trait ProximityIndex {
    /// The closest node of `query.category` within `query.max_radius` of
    /// `query.point` whose layer is visible through `query.mask`, or `None`.
    fn nearest(&self, query: &ProximityQuery<'_>) -> Option<NodeId>;
}

impl<P: ProximityIndex + ?Sized> ProximityIndex for &P {
    fn nearest(&self, query: &ProximityQuery<'_>) -> Option<NodeId> {
        (**self).nearest(query)
    }
}

impl ProximityIndex for NavGraph {
    /// Walks the R-tree outward from the point and returns the first entry
    /// that passes the category and layer filters.  The walk stops at the
    /// radius, so distant nodes are never visited.
    fn nearest(&self, query: &ProximityQuery<'_>) -> Option<NodeId> {
        let category = self.category_index(query.category)?;
        let max_d2 = query.max_radius * query.max_radius;

        self.spatial_idx
            .nearest_neighbor_iter_with_distance_2(&query.point.to_array())
            .take_while(|(_, d2)| *d2 <= max_d2)
            .find(|(e, _)| e.category == category && query.mask.includes(e.layer))
            .map(|(e, _)| e.id)
    }
}
