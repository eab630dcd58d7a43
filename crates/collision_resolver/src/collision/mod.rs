//! Collision detection against cached bounding volumes
//!
//! Overlap queries run in two phases: a cheap axis-aligned bounding-box
//! pre-check served from a freshness-windowed cache, then the scene
//! provider's exact shape test for confirmation. Confirmed overlaps are
//! ranked by estimated intersection volume so callers can address the
//! worst offender first.

mod aabb;
mod cache;
mod detector;

pub use aabb::AABB;
pub use cache::{BoundsCache, CacheStats, BOUNDS_FRESHNESS_WINDOW};
pub use detector::{CollisionDetail, CollisionDetector, DetectionReport};
