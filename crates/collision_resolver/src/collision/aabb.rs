//! Axis-aligned bounding box

use crate::foundation::math::Vec3;
use serde::Serialize;

/// Axis-Aligned Bounding Box in world space
///
/// Invariant: `min.x <= max.x`, `min.y <= max.y`, `min.z <= max.z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half-extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Check if this AABB intersects another AABB
    ///
    /// Closed-interval comparison: boxes that merely touch count as
    /// intersecting.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Estimate the intersection volume with another AABB
    ///
    /// Product of the per-axis overlap lengths, each clamped to zero.
    /// Returns 0 whenever the boxes do not overlap on some axis. The
    /// estimate ranks overlap severity; it is not an exact shape
    /// intersection volume.
    pub fn overlap_volume(&self, other: &AABB) -> f32 {
        let dx = (self.max.x.min(other.max.x) - self.min.x.max(other.min.x)).max(0.0);
        let dy = (self.max.y.min(other.max.y) - self.min.y.max(other.min.y)).max(0.0);
        let dz = (self.max.z.min(other.max.z) - self.min.z.max(other.min.z)).max(0.0);
        dx * dy * dz
    }

    /// Distance between this box's center and another's
    pub fn center_distance(&self, other: &AABB) -> f32 {
        (self.center() - other.center()).magnitude()
    }
}
