//! Graph identifiers.
//!
//! A [`NodeId`] is a waypoint's position in the navigation graph's node
//! arrays; an [`EdgeId`] is a directed link's slot in the CSR link arrays.
//! Both are dense, so `index()` is a direct `Vec` index.

use std::fmt;

macro_rules! graph_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Marks a slot no search has filled in yet.
            pub const INVALID: $name = $name(u32::MAX);

            /// Id of the `i`-th entry of a graph array.
            #[inline]
            pub fn from_index(i: usize) -> Self {
                $name(i as u32)
            }

            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

graph_id! {
    /// A waypoint in the navigation graph.
    NodeId
}

graph_id! {
    /// A directed link between two waypoints.
    EdgeId
}
