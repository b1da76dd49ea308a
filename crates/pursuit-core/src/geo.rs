//! World-space geometry.
//!
//! Positions are single-precision `glam::Vec3` in world units.  Nodes also
//! carry a layer (0–31) that proximity queries filter with a [`LayerMask`],
//! the same way engine raycasts filter physics layers.

use std::fmt;

pub use glam::Vec3;

/// Bit set of layers a query is allowed to see.  Bit `n` set means layer `n`
/// is visible.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask with only `layer` visible.  Layers above 31 produce an empty mask.
    #[inline]
    pub fn only(layer: u8) -> Self {
        LayerMask(1u32.checked_shl(layer as u32).unwrap_or(0))
    }

    /// `true` if `layer` is visible through this mask.
    #[inline]
    pub fn includes(self, layer: u8) -> bool {
        self.0 & Self::only(layer).0 != 0
    }

    #[inline]
    pub fn with(self, layer: u8) -> Self {
        LayerMask(self.0 | Self::only(layer).0)
    }

    #[inline]
    pub fn without(self, layer: u8) -> Self {
        LayerMask(self.0 & !Self::only(layer).0)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl fmt::Display for LayerMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Strict range check: `true` if `a` and `b` are less than `range` apart.
///
/// Compares squared distances, so it is safe on hot paths.  A zero range
/// never matches.
#[inline]
pub fn within_range(a: Vec3, b: Vec3, range: f32) -> bool {
    a.distance_squared(b) < range * range
}
