//! Placement of the normalized terrain square in world space.

use glam::{DVec2, DVec3};

/// World offset and uniform scale of a terrain surface.
///
/// Normalized node coordinates `(x, y)` land on the world XZ plane: node X
/// becomes world X, node Y becomes world Z. Height is not part of the
/// quadtree and only `offset.y` carries through to patch origins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainTransform {
    /// World position of the root node's lower corner.
    pub offset: DVec3,
    /// Uniform world scale applied on top of the root footprint size.
    pub scale: f64,
}

impl TerrainTransform {
    /// Create a transform from a world offset and uniform scale.
    pub fn new(offset: DVec3, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// Project a world position onto the XZ plane.
    #[inline]
    pub fn planar(world: DVec3) -> DVec2 {
        DVec2::new(world.x, world.z)
    }

    /// Map a normalized point to world XZ for a root footprint of
    /// `footprint` terrain units.
    #[inline]
    pub fn to_world_xz(&self, local: DVec2, footprint: f64) -> DVec2 {
        local * (footprint * self.scale) + Self::planar(self.offset)
    }

    /// Map a normalized point to a world position at the terrain's base
    /// height.
    pub fn to_world(&self, local: DVec2, footprint: f64) -> DVec3 {
        let xz = self.to_world_xz(local, footprint);
        DVec3::new(xz.x, self.offset.y, xz.y)
    }

    /// World edge length of a node with normalized size `size`.
    pub fn world_size(&self, size: f64, footprint: f64) -> f64 {
        size * footprint * self.scale
    }

    /// Inverse of [`TerrainTransform::to_world_xz`].
    ///
    /// Returns `None` for a degenerate (zero) world footprint.
    pub fn to_local(&self, world: DVec3, footprint: f64) -> Option<DVec2> {
        let extent = footprint * self.scale;
        if extent == 0.0 || !extent.is_finite() {
            return None;
        }
        Some((Self::planar(world) - Self::planar(self.offset)) / extent)
    }
}

impl Default for TerrainTransform {
    fn default() -> Self {
        Self {
            offset: DVec3::ZERO,
            scale: 1.0,
        }
    }
}
